//! One tracking stream: predictor (with its filter bank) plus stabilizer

use serde::Serialize;

use crate::landmarks::Landmark;
use crate::recognizer::Predictor;
use crate::stabilizer::{StabilizerParams, TemporalStabilizer};

/// Result of feeding one frame to a session
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FrameOutcome {
    pub label: Option<String>,
    pub confidence: f32,
    /// Sentence after this frame
    pub sentence: String,
    /// Word committed by this frame, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committed: Option<String>,
}

impl FrameOutcome {
    /// Frame that never reached a predictor
    pub fn rejected(sentence: String) -> Self {
        Self {
            label: None,
            confidence: 0.0,
            sentence,
            committed: None,
        }
    }
}

pub struct SignSession {
    predictor: Box<dyn Predictor>,
    stabilizer: TemporalStabilizer,
    last_activity: f64,
}

impl SignSession {
    pub fn new(predictor: Box<dyn Predictor>, params: StabilizerParams, now: f64) -> Self {
        Self {
            predictor,
            stabilizer: TemporalStabilizer::new(params),
            last_activity: now,
        }
    }

    pub fn process(&mut self, landmarks: &[Landmark], now: f64) -> FrameOutcome {
        self.last_activity = now;

        let prediction = self.predictor.predict(landmarks, now);
        let committed = prediction
            .label
            .as_deref()
            .and_then(|label| self.stabilizer.push(label, now));

        FrameOutcome {
            label: prediction.label,
            confidence: prediction.confidence,
            sentence: self.stabilizer.sentence(),
            committed,
        }
    }

    /// Empty the vote buffer and the sentence; filter state is kept
    pub fn clear(&mut self) {
        self.stabilizer.clear();
    }

    pub fn touch(&mut self, now: f64) {
        self.last_activity = now;
    }

    pub fn sentence(&self) -> String {
        self.stabilizer.sentence()
    }

    pub fn words(&self) -> &[String] {
        self.stabilizer.words()
    }

    pub fn pending_votes(&self) -> usize {
        self.stabilizer.pending_votes()
    }

    pub fn last_activity(&self) -> f64 {
        self.last_activity
    }

    pub fn idle_for(&self, now: f64) -> f64 {
        now - self.last_activity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::Prediction;

    /// Replays a fixed label for every frame
    struct Constant(Option<&'static str>);

    impl Predictor for Constant {
        fn predict(&mut self, _landmarks: &[Landmark], _now: f64) -> Prediction {
            match self.0 {
                Some(label) => Prediction::accepted(label, 1.0),
                None => Prediction::below_threshold(0.4),
            }
        }

        fn name(&self) -> &'static str {
            "constant"
        }
    }

    #[test]
    fn test_commits_after_full_buffer() {
        let mut session = SignSession::new(Box::new(Constant(Some("B"))), StabilizerParams::default(), 0.0);
        let outcomes: Vec<FrameOutcome> = (0..8).map(|i| session.process(&[], i as f64 * 0.03)).collect();
        assert!(outcomes[..7].iter().all(|o| o.committed.is_none()));
        assert_eq!(outcomes[7].committed.as_deref(), Some("B"));
        assert_eq!(outcomes[7].sentence, "B");
    }

    #[test]
    fn test_below_threshold_does_not_vote() {
        let mut session = SignSession::new(Box::new(Constant(None)), StabilizerParams::default(), 0.0);
        let outcome = session.process(&[], 1.0);
        assert_eq!(outcome.label, None);
        assert!((outcome.confidence - 0.4).abs() < 1e-6);
        assert_eq!(session.pending_votes(), 0);
        assert_eq!(session.last_activity(), 1.0);
    }

    #[test]
    fn test_clear() {
        let mut session = SignSession::new(Box::new(Constant(Some("B"))), StabilizerParams::default(), 0.0);
        for i in 0..10 {
            session.process(&[], i as f64);
        }
        session.clear();
        assert_eq!(session.sentence(), "");
        assert_eq!(session.pending_votes(), 0);
    }
}
