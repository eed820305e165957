//! Pipeline module - per-session orchestration and the session registry
//!
//! Re-exports only. All logic in submodules.

mod recognizer;
mod registry;
mod session;

pub use recognizer::{now_secs, HealthConfig, HealthReport, Refinement, SignRecognizer};
pub use registry::{PredictorFactory, SessionRegistry, SharedSession};
pub use session::{FrameOutcome, SignSession};
