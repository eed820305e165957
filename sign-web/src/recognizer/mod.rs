//! Recognizer module - per-frame sign prediction
//!
//! Re-exports only. All logic in submodules.

mod matcher;
mod model;
mod predictor;
mod window;

pub use matcher::{special_passes, GestureMatcher, DEFAULT_CONFIDENCE_THRESHOLD, TOUCH_THRESHOLD};
pub use model::{normalize_frame, InferenceBackend, ModelMode, ModelPredictor, MODEL_LABELS};
pub use predictor::{Prediction, Predictor, RuleBasedPredictor};
pub use window::{FrameWindow, SEQUENCE_LENGTH};
