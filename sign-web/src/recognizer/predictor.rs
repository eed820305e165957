//! Predictor - the per-frame `landmarks -> (label, confidence)` capability
//!
//! The stabilizer downstream only sees `Prediction`s, so rule-based and
//! model-backed recognition are interchangeable per session.

use std::sync::Arc;

use serde::Serialize;

use super::matcher::GestureMatcher;
use crate::hand::HandFeatureExtractor;
use crate::landmarks::Landmark;
use crate::lexicon::SignLexicon;
use crate::smoothing::FilterParams;

/// Outcome of recognizing one frame
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Prediction {
    /// Present only when confidence reached the acceptance threshold
    pub label: Option<String>,
    pub confidence: f32,
}

impl Prediction {
    pub fn accepted(label: impl Into<String>, confidence: f32) -> Self {
        Self {
            label: Some(label.into()),
            confidence,
        }
    }

    pub fn below_threshold(confidence: f32) -> Self {
        Self {
            label: None,
            confidence,
        }
    }

    /// Frame could not be analyzed
    pub fn rejected() -> Self {
        Self::below_threshold(0.0)
    }
}

pub trait Predictor: Send {
    /// Recognize one frame captured at `now` (seconds)
    fn predict(&mut self, landmarks: &[Landmark], now: f64) -> Prediction;

    /// Drop any per-stream temporal state
    fn reset(&mut self) {}

    fn name(&self) -> &'static str;
}

// ============================================================================
// RULE-BASED PREDICTOR
// ============================================================================

/// Geometry rules against a sign lexicon
pub struct RuleBasedPredictor {
    extractor: HandFeatureExtractor,
    matcher: GestureMatcher,
}

impl RuleBasedPredictor {
    pub fn new(lexicon: Arc<SignLexicon>, params: FilterParams, threshold: f32) -> Self {
        Self {
            extractor: HandFeatureExtractor::new(params),
            matcher: GestureMatcher::new(lexicon, threshold),
        }
    }

    pub fn matcher(&self) -> &GestureMatcher {
        &self.matcher
    }

    pub fn extractor(&self) -> &HandFeatureExtractor {
        &self.extractor
    }
}

impl Predictor for RuleBasedPredictor {
    fn predict(&mut self, landmarks: &[Landmark], now: f64) -> Prediction {
        match self.extractor.process(landmarks, now) {
            Some(hand) => self.matcher.best_match(&hand),
            None => Prediction::rejected(),
        }
    }

    fn reset(&mut self) {
        self.extractor = HandFeatureExtractor::new(self.extractor.filters().params());
    }

    fn name(&self) -> &'static str {
        "rules"
    }
}
