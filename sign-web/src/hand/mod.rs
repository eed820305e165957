//! Hand module - geometric feature extraction from landmark frames
//!
//! Re-exports only. All logic in submodules.

mod extractor;
mod state;

#[cfg(any(test, feature = "test-util"))]
pub mod fixtures;

pub use extractor::{
    classify_finger, classify_orientation, classify_thumb, palm_normal, HandFeatureExtractor,
    CURLED_BEND_DEG, FOLDED_BEND_DEG, THUMB_FOLDED_ANGLE_DEG, THUMB_TUCK_DISTANCE,
};
pub use state::{Finger, FingerState, HandState, PalmOrientation};
