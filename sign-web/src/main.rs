//! sign-replay - feed a recorded landmark stream through the recognizer
//!
//! Reads one JSON message per line (the same messages a live client sends)
//! and writes each response as a JSON line on stdout. Logs go to stderr.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sign_web::protocol::handle_text;
use sign_web::{now_secs, RecognizerConfig, SignRecognizer};

#[derive(Parser, Debug)]
#[command(name = "sign-replay", version, about = "Replay a JSON-lines landmark stream")]
struct Cli {
    /// Input file of JSON messages, one per line (stdin when omitted or "-")
    input: Option<PathBuf>,

    /// Session id every message is routed to
    #[arg(short, long, default_value = "replay")]
    session: String,

    /// Recognizer config (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Frame rate used to timestamp messages; 0 uses the wall clock
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Print the health report after the stream ends
    #[arg(long)]
    health: bool,
}

fn open_input(path: Option<&PathBuf>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(p) if p.as_os_str() != "-" => {
            let file = File::open(p).with_context(|| format!("Failed to open {}", p.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => RecognizerConfig::load(path)?,
        None => RecognizerConfig::default(),
    };
    let recognizer = SignRecognizer::new(config)?;
    info!(
        session = %cli.session,
        signs = recognizer.lexicon().len(),
        "Replaying landmark stream"
    );

    let start = now_secs();
    let frame_secs = if cli.fps > 0.0 { Some(1.0 / cli.fps) } else { None };

    let input = open_input(cli.input.as_ref())?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut messages = 0usize;

    for (line_no, line) in input.lines().enumerate() {
        let line = line.context("Failed to read input")?;
        if line.trim().is_empty() {
            continue;
        }

        let now = match frame_secs {
            Some(step) => start + messages as f64 * step,
            None => now_secs(),
        };
        messages += 1;

        match handle_text(&recognizer, &cli.session, &line, now) {
            Some(reply) => {
                serde_json::to_writer(&mut out, &reply)?;
                writeln!(out)?;
            }
            None => {
                debug!(line = line_no + 1, "No reply");
            }
        }
    }

    if messages == 0 {
        warn!("Input contained no messages");
    }
    info!(
        messages,
        sentence = %recognizer.sentence(&cli.session),
        "Replay finished"
    );

    if cli.health {
        serde_json::to_writer_pretty(&mut out, &recognizer.health())?;
        writeln!(out)?;
    }
    Ok(())
}
