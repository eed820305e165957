//! Hand landmark frames as delivered by the hand-tracking model
//!
//! 21 points per frame in MediaPipe order. Frames are validated here, once,
//! so everything downstream can index the fixed-size array freely.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SignError};

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Points per frame
pub const LANDMARK_COUNT: usize = 21;

/// Scalar channels per frame (21 landmarks × x, y, z)
pub const CHANNEL_COUNT: usize = LANDMARK_COUNT * 3;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A single tracked point in normalized image coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    /// Depth relative to the wrist; some trackers omit it
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Exactly 21 landmarks of one hand for one frame
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LandmarkFrame {
    points: [Landmark; LANDMARK_COUNT],
}

impl LandmarkFrame {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build a frame from an arbitrary-length slice; anything but 21 points is rejected
    pub fn from_slice(points: &[Landmark]) -> Result<Self> {
        let points: [Landmark; LANDMARK_COUNT] =
            points.try_into().map_err(|_| SignError::InvalidLandmarkCount {
                expected: LANDMARK_COUNT,
                got: points.len(),
            })?;
        Ok(Self { points })
    }

    /// Build a frame from a flat `[x0, y0, z0, x1, ...]` array of 63 values
    pub fn from_flat(data: &[f32]) -> Result<Self> {
        if data.len() != CHANNEL_COUNT {
            return Err(SignError::InvalidLandmarkCount {
                expected: LANDMARK_COUNT,
                got: data.len() / 3,
            });
        }

        let mut points = [Landmark::default(); LANDMARK_COUNT];
        for (i, point) in points.iter_mut().enumerate() {
            *point = Landmark {
                x: data[i * 3],
                y: data[i * 3 + 1],
                z: data[i * 3 + 2],
            };
        }
        Ok(Self { points })
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }

    pub fn get(&self, index: usize) -> Landmark {
        self.points[index]
    }

    /// Flatten back to 63 scalars, channel `i * 3 + axis`
    pub fn to_flat(&self) -> [f32; CHANNEL_COUNT] {
        let mut flat = [0.0; CHANNEL_COUNT];
        for (i, p) in self.points.iter().enumerate() {
            flat[i * 3] = p.x;
            flat[i * 3 + 1] = p.y;
            flat[i * 3 + 2] = p.z;
        }
        flat
    }

    /// Index of the first landmark carrying a NaN or infinite coordinate
    pub fn first_non_finite(&self) -> Option<usize> {
        self.points.iter().position(|p| !p.is_finite())
    }
}
