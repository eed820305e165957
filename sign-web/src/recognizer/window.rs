//! Sliding frame window for sequence models

use std::collections::VecDeque;

use crate::landmarks::CHANNEL_COUNT;

/// Frames a sequence model consumes
pub const SEQUENCE_LENGTH: usize = 30;

/// Last `SEQUENCE_LENGTH` normalized frames, oldest at the front
#[derive(Default)]
pub struct FrameWindow {
    frames: VecDeque<[f32; CHANNEL_COUNT]>,
}

impl FrameWindow {
    pub fn new() -> Self {
        Self {
            frames: VecDeque::with_capacity(SEQUENCE_LENGTH),
        }
    }

    pub fn push(&mut self, features: [f32; CHANNEL_COUNT]) {
        if self.frames.len() == SEQUENCE_LENGTH {
            self.frames.pop_front();
        }
        self.frames.push_back(features);
    }

    pub fn is_ready(&self) -> bool {
        self.frames.len() == SEQUENCE_LENGTH
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Model input, frame after frame
    pub fn as_flat(&self) -> Vec<f32> {
        self.frames.iter().flatten().copied().collect()
    }

    pub fn clear(&mut self) {
        self.frames.clear();
    }
}
