//! Hand state - per-frame snapshot consumed by the matcher

use serde::{Deserialize, Serialize};

use crate::geometry::{to_vec3, Vec3};
use crate::landmarks::LandmarkFrame;

/// The five digits, thumb first
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Finger {
    Thumb,
    Index,
    Middle,
    Ring,
    Pinky,
}

impl Finger {
    pub const ALL: [Finger; 5] = [
        Finger::Thumb,
        Finger::Index,
        Finger::Middle,
        Finger::Ring,
        Finger::Pinky,
    ];

    pub fn index(&self) -> usize {
        match self {
            Finger::Thumb => 0,
            Finger::Index => 1,
            Finger::Middle => 2,
            Finger::Ring => 3,
            Finger::Pinky => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Finger::Thumb => "thumb",
            Finger::Index => "index",
            Finger::Middle => "middle",
            Finger::Ring => "ring",
            Finger::Pinky => "pinky",
        }
    }
}

/// Discrete bend classification of one finger
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FingerState {
    /// Fully curled into the palm
    Folded,
    /// Half curled / claw
    Curled,
    /// Straight
    Extended,
}

impl FingerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            FingerState::Folded => "folded",
            FingerState::Curled => "curled",
            FingerState::Extended => "extended",
        }
    }
}

/// Direction the palm normal points, camera coordinates
/// (x right, y down, z away from the camera)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PalmOrientation {
    Up,
    Down,
    Left,
    Right,
    Forward,
    Backward,
}

impl PalmOrientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            PalmOrientation::Up => "up",
            PalmOrientation::Down => "down",
            PalmOrientation::Left => "left",
            PalmOrientation::Right => "right",
            PalmOrientation::Forward => "forward",
            PalmOrientation::Backward => "backward",
        }
    }
}

/// Structured description of one hand at one instant
#[derive(Clone, Debug)]
pub struct HandState {
    fingers: [FingerState; 5],
    /// Summed joint bend in degrees; 0 for the thumb
    bend_angles: [f32; 5],
    orientation: PalmOrientation,
    /// Smoothed coordinates the classification was derived from
    landmarks: LandmarkFrame,
    /// Seconds, same clock as the frame timestamps
    timestamp: f64,
}

impl HandState {
    pub fn new(
        fingers: [FingerState; 5],
        bend_angles: [f32; 5],
        orientation: PalmOrientation,
        landmarks: LandmarkFrame,
        timestamp: f64,
    ) -> Self {
        Self {
            fingers,
            bend_angles,
            orientation,
            landmarks,
            timestamp,
        }
    }

    pub fn finger(&self, finger: Finger) -> FingerState {
        self.fingers[finger.index()]
    }

    pub fn bend_angle(&self, finger: Finger) -> f32 {
        self.bend_angles[finger.index()]
    }

    pub fn orientation(&self) -> PalmOrientation {
        self.orientation
    }

    pub fn landmarks(&self) -> &LandmarkFrame {
        &self.landmarks
    }

    pub fn point(&self, index: usize) -> Vec3 {
        to_vec3(self.landmarks.get(index))
    }

    pub fn timestamp(&self) -> f64 {
        self.timestamp
    }
}
