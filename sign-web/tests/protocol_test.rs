//! Stream protocol, config files and the replay binary

mod common;

use std::io::Write;
use std::process::{Command, Stdio};

use common::landmarks_message;
use serde_json::Value;
use sign_web::hand::fixtures::{pose, POINTING};
use sign_web::protocol::{handle_text, ServerMessage};
use sign_web::{PalmOrientation, RecognizerConfig, SignError, SignRecognizer};

fn replay_bin() -> &'static str {
    env!("CARGO_BIN_EXE_sign-replay")
}

#[test]
fn stream_builds_sentence_and_refines_it() {
    let r = SignRecognizer::new(RecognizerConfig::default()).unwrap();
    let msg = landmarks_message(&pose(POINTING, PalmOrientation::Up));

    let mut last = None;
    for i in 0..8 {
        last = handle_text(&r, "ws", &msg, i as f64 / 30.0);
    }
    match last {
        Some(ServerMessage::Prediction { gesture, sentence, .. }) => {
            assert_eq!(gesture.as_deref(), Some("1"));
            assert_eq!(sentence, "1");
        }
        other => panic!("unexpected {other:?}"),
    }

    match handle_text(&r, "ws", r#"{"type":"refine_sentence"}"#, 1.0) {
        Some(ServerMessage::RefinedSentence { original, refined, .. }) => {
            assert_eq!(original, "1");
            assert_eq!(refined, "1.");
        }
        other => panic!("unexpected {other:?}"),
    }

    let cleared = handle_text(&r, "ws", r#"{"type":"command","action":"clear"}"#, 1.1);
    assert!(matches!(cleared, Some(ServerMessage::Cleared { .. })));
    assert_eq!(r.sentence("ws"), "");
}

#[test]
fn unknown_message_type_is_an_error() {
    let r = SignRecognizer::new(RecognizerConfig::default()).unwrap();
    let reply = handle_text(&r, "ws", r#"{"type":"dance"}"#, 0.0);
    assert!(matches!(reply, Some(ServerMessage::Error { .. })));
}

#[test]
fn config_file_with_custom_lexicon() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("signs.toml"),
        r#"
[[sign]]
label = "POINT"
fingers = { index = ["extended"], middle = ["folded"] }
orientation = ["up"]
"#,
    )
    .unwrap();
    let config_path = dir.path().join("recognizer.toml");
    std::fs::write(
        &config_path,
        r#"
[recognition]
lexicon_path = "signs.toml"

[stabilizer]
buffer_size = 4
"#,
    )
    .unwrap();

    let config = RecognizerConfig::load(&config_path).unwrap();
    assert_eq!(config.stabilizer.buffer_size, 4);
    assert_eq!(config.stabilizer.majority_threshold, 0.65);

    let r = SignRecognizer::new(config).unwrap();
    assert_eq!(r.lexicon().len(), 1);

    let pointing = pose(POINTING, PalmOrientation::Up);
    for i in 0..4 {
        r.process_frame_at("s", &pointing, i as f64 / 30.0);
    }
    assert_eq!(r.sentence("s"), "POINT");
}

#[test]
fn invalid_config_is_rejected() {
    let err = RecognizerConfig::from_toml_str("[stabilizer]\nbuffer_size = 0\n").unwrap_err();
    assert!(matches!(err, SignError::InvalidConfig(_)));

    let err = RecognizerConfig::load(std::path::Path::new("/nonexistent/recognizer.toml")).unwrap_err();
    assert!(matches!(err, SignError::Io { .. }));
}

#[test]
fn replay_binary_answers_each_line() {
    let pointing = landmarks_message(&pose(POINTING, PalmOrientation::Up));
    let mut input = String::new();
    for _ in 0..8 {
        input.push_str(&pointing);
        input.push('\n');
    }
    input.push_str("not json\n");
    input.push_str("{\"type\":\"refine_sentence\"}\n");

    let mut child = Command::new(replay_bin())
        .args(["--session", "cli"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(input.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());

    let replies: Vec<Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(replies.len(), 10);
    assert_eq!(replies[7]["type"], "prediction");
    assert_eq!(replies[7]["sentence"], "1");
    assert_eq!(replies[8]["type"], "error");
    assert_eq!(replies[9]["type"], "refined_sentence");
    assert_eq!(replies[9]["refined"], "1.");
}
