//! Sign Web - real-time sign recognition from hand landmarks
//!
//! Per frame: one-euro smoothing → finger/palm features → rule matching
//! against the sign lexicon → majority vote and sentence assembly.
//!
//! Entry point for both the native library and the WASM module. Only contains:
//! - Module declarations
//! - Public re-exports

pub mod config;
pub mod error;
pub mod geometry;
pub mod hand;
pub mod landmarks;
pub mod lexicon;
pub mod pipeline;
pub mod protocol;
pub mod recognizer;
pub mod refine;
pub mod smoothing;
pub mod stabilizer;

#[cfg(feature = "web")]
mod bridge;

// Re-export wasm_bindgen functions for JS access
#[cfg(feature = "web")]
pub use bridge::{clear_session, configure, end_session, get_sentence, health, init_panic_hook, process_frame};

pub use config::RecognizerConfig;
pub use error::{Result, SignError};
pub use hand::{Finger, FingerState, HandFeatureExtractor, HandState, PalmOrientation};
pub use landmarks::{Landmark, LandmarkFrame, LANDMARK_COUNT};
pub use lexicon::{SignDefinition, SignLexicon, SpecialCheck};
pub use pipeline::{now_secs, FrameOutcome, Refinement, SignRecognizer};
pub use recognizer::{GestureMatcher, Prediction, Predictor, RuleBasedPredictor};
pub use stabilizer::TemporalStabilizer;
