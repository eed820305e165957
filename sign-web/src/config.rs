//! Recognizer configuration
//!
//! Loaded from TOML; every section and field is optional and falls back to
//! the tuned defaults below.
//!
//! ```toml
//! [recognition]
//! confidence_threshold = 0.75
//! lexicon_path = "signs.toml"
//!
//! [stabilizer]
//! buffer_size = 8
//! majority_threshold = 0.65
//! word_cooldown_secs = 0.5
//!
//! [filter]
//! min_cutoff = 1.5
//! beta = 8.0
//!
//! [session]
//! timeout_secs = 3600.0
//!
//! [refine]
//! provider = "groq"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SignError};
use crate::lexicon::SignLexicon;
use crate::recognizer::DEFAULT_CONFIDENCE_THRESHOLD;
use crate::refine::RefineSettings;
use crate::smoothing::FilterParams;
use crate::stabilizer::StabilizerParams;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognizerConfig {
    pub recognition: RecognitionSettings,
    pub stabilizer: StabilizerParams,
    pub filter: FilterParams,
    pub session: SessionSettings,
    pub refine: RefineSettings,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionSettings {
    /// Minimum match confidence for a label to be reported
    pub confidence_threshold: f32,
    /// TOML lexicon replacing the built-in table; relative paths resolve
    /// against the config file's directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lexicon_path: Option<PathBuf>,
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            lexicon_path: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    /// Idle time after which a session is evicted
    pub timeout_secs: f64,
    /// Minimum spacing between idle sweeps
    pub cleanup_interval_secs: f64,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 3600.0,
            cleanup_interval_secs: 300.0,
        }
    }
}

impl RecognizerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)
            .map_err(|e| SignError::InvalidConfig(format!("config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SignError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&text).map_err(|source| SignError::Toml {
            path: path.to_path_buf(),
            source,
        })?;

        if let (Some(lexicon), Some(dir)) = (&config.recognition.lexicon_path, path.parent()) {
            if lexicon.is_relative() {
                config.recognition.lexicon_path = Some(dir.join(lexicon));
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let threshold = self.recognition.confidence_threshold;
        if !(threshold > 0.0 && threshold <= 1.0) {
            return invalid(format!("confidence_threshold {threshold} not in (0, 1]"));
        }

        let stabilizer = &self.stabilizer;
        if stabilizer.buffer_size == 0 {
            return invalid("buffer_size must be at least 1".to_string());
        }
        if !(stabilizer.majority_threshold > 0.0 && stabilizer.majority_threshold < 1.0) {
            return invalid(format!(
                "majority_threshold {} not in (0, 1)",
                stabilizer.majority_threshold
            ));
        }
        if !(stabilizer.word_cooldown_secs >= 0.0) {
            return invalid("word_cooldown_secs must be non-negative".to_string());
        }

        let filter = &self.filter;
        if !(filter.min_cutoff > 0.0 && filter.d_cutoff > 0.0) {
            return invalid("filter cutoffs must be positive".to_string());
        }
        if !(filter.beta >= 0.0) {
            return invalid("filter beta must be non-negative".to_string());
        }

        let session = &self.session;
        if !(session.timeout_secs > 0.0 && session.cleanup_interval_secs > 0.0) {
            return invalid("session timeout and cleanup interval must be positive".to_string());
        }

        if !(0.0..=2.0).contains(&self.refine.temperature) || self.refine.max_tokens == Some(0) {
            return invalid("refine temperature must be in [0, 2] and max_tokens positive".to_string());
        }
        Ok(())
    }

    /// Configured lexicon file, or the built-in table
    pub fn lexicon(&self) -> Result<SignLexicon> {
        match &self.recognition.lexicon_path {
            Some(path) => SignLexicon::load(path),
            None => Ok(SignLexicon::standard()),
        }
    }
}

fn invalid(message: String) -> Result<()> {
    Err(SignError::InvalidConfig(message))
}
