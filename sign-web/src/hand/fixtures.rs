//! Synthetic hand poses for tests
//!
//! Built with `cfg(test)` or the `test-util` feature.

use super::state::{FingerState, PalmOrientation};
use crate::geometry::{cross, normalize, Vec3};
use crate::landmarks::{Landmark, LANDMARK_COUNT};

use FingerState::{Extended, Folded};

pub const OPEN_HAND: [FingerState; 5] = [Extended; 5];
pub const POINTING: [FingerState; 5] = [Folded, Extended, Folded, Folded, Folded];
pub const FIST: [FingerState; 5] = [Folded; 5];

/// (finger direction, index→pinky direction) producing the requested palm normal
fn axes(orientation: PalmOrientation) -> (Vec3, Vec3) {
    let x = Vec3::new(1.0, 0.0, 0.0);
    let y = Vec3::new(0.0, 1.0, 0.0);
    let z = Vec3::new(0.0, 0.0, 1.0);
    match orientation {
        PalmOrientation::Up => (z, -x),
        PalmOrientation::Down => (z, x),
        PalmOrientation::Forward => (-y, -x),
        PalmOrientation::Backward => (-y, x),
        PalmOrientation::Left => (-y, z),
        PalmOrientation::Right => (-y, -z),
    }
}

fn lm(v: Vec3) -> Landmark {
    Landmark::new(v.x, v.y, v.z)
}

/// 21 landmarks for a hand with the given finger states (thumb first)
pub fn pose(fingers: [FingerState; 5], orientation: PalmOrientation) -> Vec<Landmark> {
    let (f, a) = axes(orientation);
    let n = normalize(&cross(&f, &a));
    let wrist = Vec3::new(0.5, 0.5, 0.0);

    let mut points = vec![Landmark::default(); LANDMARK_COUNT];
    points[0] = lm(wrist);

    // Thumb: CMC, MCP fixed; IP and TIP follow the palm or cross it
    let index_mcp = wrist + f * 0.1 - a * 0.03;
    let thumb_mcp = wrist + f * 0.05 - a * 0.065;
    let thumb_dir = match fingers[0] {
        Extended => normalize(&(index_mcp - wrist)),
        _ => a,
    };
    points[1] = lm(wrist + f * 0.03 - a * 0.04);
    points[2] = lm(thumb_mcp);
    points[3] = lm(thumb_mcp + thumb_dir * 0.03);
    points[4] = lm(thumb_mcp + thumb_dir * 0.06);

    let knuckles = [
        index_mcp,
        wrist + f * 0.105 - a * 0.005,
        wrist + f * 0.1 + a * 0.02,
        wrist + f * 0.09 + a * 0.045,
    ];
    let lengths = [0.04, 0.03, 0.025];

    for (k, mcp) in knuckles.iter().enumerate() {
        let (c60, s60) = (0.5, 3f32.sqrt() / 2.0);
        let dirs = match fingers[k + 1] {
            Extended => [f, f, f],
            FingerState::Curled => [f, f * c60 + n * s60, -f * c60 + n * s60],
            Folded => [f, n, -f],
        };
        let base = 5 + k * 4;
        let mut joint = *mcp;
        points[base] = lm(joint);
        for (j, (dir, len)) in dirs.iter().zip(lengths).enumerate() {
            joint += dir * len;
            points[base + j + 1] = lm(joint);
        }
    }

    points
}
