//! Learned-model predictor
//!
//! Inference itself is delegated to an `InferenceBackend` (ONNX runtime,
//! a JS-side model, a test double). This module owns preprocessing,
//! sequence buffering and decoding the class scores.

use tracing::{debug, warn};

use super::predictor::{Prediction, Predictor};
use super::window::FrameWindow;
use crate::landmarks::{Landmark, LandmarkFrame, CHANNEL_COUNT};

/// Class order the reference sign model was trained with
pub const MODEL_LABELS: [&str; 18] = [
    "HELLO",
    "THANK YOU",
    "PLEASE",
    "SORRY",
    "YES",
    "NO",
    "HELP",
    "I LOVE YOU",
    "GOOD MORNING",
    "GOOD NIGHT",
    "A",
    "B",
    "C",
    "D",
    "L",
    "O",
    "V",
    "Y",
];

/// Runs a trained classifier over preprocessed features
pub trait InferenceBackend: Send {
    /// One score per class, or `None` if inference failed
    fn scores(&mut self, input: &[f32]) -> Option<Vec<f32>>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelMode {
    /// 63 features from the current frame
    SingleFrame,
    /// 30 frames of 63 features; silent until the window fills
    Sequence,
}

/// Wrist-relative coordinates scaled by the largest absolute component
pub fn normalize_frame(frame: &LandmarkFrame) -> [f32; CHANNEL_COUNT] {
    let wrist = frame.get(0);
    let mut out = [0.0f32; CHANNEL_COUNT];
    for (i, p) in frame.points().iter().enumerate() {
        out[i * 3] = p.x - wrist.x;
        out[i * 3 + 1] = p.y - wrist.y;
        out[i * 3 + 2] = p.z - wrist.z;
    }

    let max_abs = out.iter().fold(0.0f32, |m, v| m.max(v.abs()));
    if max_abs > 0.0 {
        for v in &mut out {
            *v /= max_abs;
        }
    }
    out
}

pub struct ModelPredictor<B: InferenceBackend> {
    backend: B,
    labels: Vec<String>,
    mode: ModelMode,
    window: FrameWindow,
}

impl<B: InferenceBackend> ModelPredictor<B> {
    pub fn new(backend: B, labels: Vec<String>, mode: ModelMode) -> Self {
        Self {
            backend,
            labels,
            mode,
            window: FrameWindow::new(),
        }
    }

    /// Backend with the reference class list
    pub fn with_default_labels(backend: B, mode: ModelMode) -> Self {
        let labels = MODEL_LABELS.iter().map(|s| s.to_string()).collect();
        Self::new(backend, labels, mode)
    }

    pub fn mode(&self) -> ModelMode {
        self.mode
    }

    pub fn buffered_frames(&self) -> usize {
        self.window.frame_count()
    }

    fn decode(&self, scores: &[f32]) -> Prediction {
        let best = scores
            .iter()
            .enumerate()
            .fold(None::<(usize, f32)>, |best, (i, &s)| match best {
                Some((_, b)) if s <= b => best,
                _ => Some((i, s)),
            });

        match best.and_then(|(i, s)| self.labels.get(i).map(|label| (label, s))) {
            Some((label, confidence)) => Prediction::accepted(label.clone(), confidence),
            None => {
                warn!(classes = scores.len(), labels = self.labels.len(), "Model output has no usable class");
                Prediction::rejected()
            }
        }
    }
}

impl<B: InferenceBackend> Predictor for ModelPredictor<B> {
    fn predict(&mut self, landmarks: &[Landmark], _now: f64) -> Prediction {
        let frame = match LandmarkFrame::from_slice(landmarks) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(error = %e, "Skipping frame");
                return Prediction::rejected();
            }
        };
        let features = normalize_frame(&frame);

        let input = match self.mode {
            ModelMode::SingleFrame => features.to_vec(),
            ModelMode::Sequence => {
                self.window.push(features);
                if !self.window.is_ready() {
                    debug!(frames = self.window.frame_count(), "Sequence window filling");
                    return Prediction::rejected();
                }
                self.window.as_flat()
            }
        };

        match self.backend.scores(&input) {
            Some(scores) => self.decode(&scores),
            None => {
                warn!("Inference backend failed");
                Prediction::rejected()
            }
        }
    }

    fn reset(&mut self) {
        self.window.clear();
    }

    fn name(&self) -> &'static str {
        "model"
    }
}
