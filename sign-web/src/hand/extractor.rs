//! Hand feature extraction - raw landmarks to `HandState`
//!
//! Smooths the frame, classifies each finger's bend, estimates palm
//! orientation. One extractor per tracking stream: its filter bank carries
//! temporal state.

use tracing::warn;

use super::state::{Finger, FingerState, HandState, PalmOrientation};
use crate::geometry::{angle_between, cross, distance, normalize, to_vec3, vector_between, Vec3};
use crate::landmarks::{
    Landmark, LandmarkFrame, INDEX_DIP, INDEX_MCP, INDEX_PIP, INDEX_TIP, MIDDLE_DIP, MIDDLE_MCP,
    MIDDLE_PIP, MIDDLE_TIP, PINKY_DIP, PINKY_MCP, PINKY_PIP, PINKY_TIP, RING_DIP, RING_MCP,
    RING_PIP, RING_TIP, THUMB_MCP, THUMB_TIP, WRIST,
};
use crate::smoothing::{FilterBank, FilterParams};

// ============================================================================
// CLASSIFICATION THRESHOLDS
// ============================================================================

/// Summed PIP + DIP bend above which a finger is folded into the palm
pub const FOLDED_BEND_DEG: f32 = 160.0;

/// Summed bend above which a finger counts as curled
pub const CURLED_BEND_DEG: f32 = 90.0;

/// Thumb direction vs. wrist→index-knuckle angle above which the thumb is folded
pub const THUMB_FOLDED_ANGLE_DEG: f32 = 60.0;

/// Thumb tip this close to the pinky knuckle is tucked across the palm
pub const THUMB_TUCK_DISTANCE: f32 = 0.05;

/// (MCP, PIP, DIP, TIP) chains for the four long fingers
const FINGER_CHAINS: [(Finger, [usize; 4]); 4] = [
    (Finger::Index, [INDEX_MCP, INDEX_PIP, INDEX_DIP, INDEX_TIP]),
    (Finger::Middle, [MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP]),
    (Finger::Ring, [RING_MCP, RING_PIP, RING_DIP, RING_TIP]),
    (Finger::Pinky, [PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP]),
];

// ============================================================================
// EXTRACTOR
// ============================================================================

pub struct HandFeatureExtractor {
    filters: FilterBank,
}

impl HandFeatureExtractor {
    pub fn new(params: FilterParams) -> Self {
        Self {
            filters: FilterBank::new(params),
        }
    }

    /// Validate, smooth and analyze one frame observed at `now` (seconds)
    ///
    /// Returns `None` when the frame does not hold exactly 21 points; the
    /// filter bank is not touched in that case.
    pub fn process(&mut self, raw: &[Landmark], now: f64) -> Option<HandState> {
        match LandmarkFrame::from_slice(raw) {
            Ok(frame) => Some(self.process_frame(&frame, now)),
            Err(e) => {
                warn!("Invalid landmarks, frame skipped: {}", e);
                None
            }
        }
    }

    /// Smooth and analyze an already validated frame
    pub fn process_frame(&mut self, frame: &LandmarkFrame, now: f64) -> HandState {
        let coords = match self.filters.smooth(frame, now) {
            Ok(smoothed) => smoothed,
            Err(e) => {
                warn!("Smoothing failed, using raw landmarks: {}", e);
                *frame
            }
        };
        analyze(coords, now)
    }

    pub fn filters(&self) -> &FilterBank {
        &self.filters
    }
}

impl Default for HandFeatureExtractor {
    fn default() -> Self {
        Self::new(FilterParams::for_signing())
    }
}

// ============================================================================
// GEOMETRY ANALYSIS
// ============================================================================

fn analyze(coords: LandmarkFrame, timestamp: f64) -> HandState {
    let p = |i: usize| to_vec3(coords.get(i));
    let wrist = p(WRIST);

    let mut fingers = [FingerState::Extended; 5];
    let mut bend_angles = [0.0; 5];

    for (finger, [mcp, pip, dip, tip]) in FINGER_CHAINS {
        let (state, bend) = classify_finger(&wrist, &p(mcp), &p(pip), &p(dip), &p(tip));
        fingers[finger.index()] = state;
        bend_angles[finger.index()] = bend;
    }

    fingers[Finger::Thumb.index()] = classify_thumb(
        &wrist,
        &p(THUMB_MCP),
        &p(THUMB_TIP),
        &p(INDEX_MCP),
        &p(PINKY_MCP),
    );

    let orientation = classify_orientation(&palm_normal(&wrist, &p(INDEX_MCP), &p(PINKY_MCP)));

    HandState::new(fingers, bend_angles, orientation, coords, timestamp)
}

/// Bend state and summed bend angle of one long finger
pub fn classify_finger(
    wrist: &Vec3,
    mcp: &Vec3,
    pip: &Vec3,
    dip: &Vec3,
    tip: &Vec3,
) -> (FingerState, f32) {
    let v_mcp_pip = vector_between(mcp, pip);
    let v_pip_dip = vector_between(pip, dip);
    let v_dip_tip = vector_between(dip, tip);

    let total_bend = angle_between(&v_mcp_pip, &v_pip_dip) + angle_between(&v_pip_dip, &v_dip_tip);

    // Tip closer to the wrist than the knuckle: curled toward the camera,
    // where the projected bend angle under-reports
    let tip_inside = distance(tip, wrist) < distance(mcp, wrist);

    let state = if total_bend > FOLDED_BEND_DEG {
        FingerState::Folded
    } else if total_bend > CURLED_BEND_DEG || tip_inside {
        FingerState::Curled
    } else {
        FingerState::Extended
    };

    (state, total_bend)
}

/// Thumb is only ever folded or extended
pub fn classify_thumb(
    wrist: &Vec3,
    thumb_mcp: &Vec3,
    thumb_tip: &Vec3,
    index_mcp: &Vec3,
    pinky_mcp: &Vec3,
) -> FingerState {
    let thumb_dir = vector_between(thumb_mcp, thumb_tip);
    let palm_dir = vector_between(wrist, index_mcp);

    if angle_between(&thumb_dir, &palm_dir) > THUMB_FOLDED_ANGLE_DEG {
        return FingerState::Folded;
    }
    if distance(thumb_tip, pinky_mcp) < THUMB_TUCK_DISTANCE {
        return FingerState::Folded;
    }
    FingerState::Extended
}

/// Unit normal of the palm plane spanned by wrist, index and pinky knuckles
pub fn palm_normal(wrist: &Vec3, index_mcp: &Vec3, pinky_mcp: &Vec3) -> Vec3 {
    let to_index = vector_between(wrist, index_mcp);
    let to_pinky = vector_between(wrist, pinky_mcp);
    normalize(&cross(&to_index, &to_pinky))
}

/// Dominant axis of the palm normal
///
/// An axis wins only when strictly largest; a tie falls through to y, then x.
pub fn classify_orientation(normal: &Vec3) -> PalmOrientation {
    let (abs_x, abs_y, abs_z) = (normal.x.abs(), normal.y.abs(), normal.z.abs());

    if abs_z > abs_x && abs_z > abs_y {
        if normal.z < 0.0 {
            PalmOrientation::Forward
        } else {
            PalmOrientation::Backward
        }
    } else if abs_y > abs_x {
        if normal.y < 0.0 {
            PalmOrientation::Up
        } else {
            PalmOrientation::Down
        }
    } else if normal.x < 0.0 {
        PalmOrientation::Left
    } else {
        PalmOrientation::Right
    }
}
