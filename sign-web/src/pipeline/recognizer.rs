//! Sign recognizer - the frame-level entry point
//!
//! Routes each frame to its session's pipeline (smoothing → features →
//! matching → stabilization) and owns the shared lexicon, session registry
//! and sentence refiner.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tracing::warn;

use super::registry::{PredictorFactory, SessionRegistry};
use super::session::FrameOutcome;
use crate::config::RecognizerConfig;
use crate::error::{Result, SignError};
use crate::landmarks::{Landmark, LANDMARK_COUNT};
use crate::lexicon::SignLexicon;
use crate::recognizer::{Predictor, RuleBasedPredictor};
use crate::refine::{build_refiner, fallback_format, Refiner};

/// Wall-clock seconds since the Unix epoch
pub fn now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Refinement {
    pub original: String,
    pub refined: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub version: &'static str,
    pub lexicon_size: usize,
    pub active_sessions: usize,
    pub config: HealthConfig,
}

#[derive(Clone, Debug, Serialize)]
pub struct HealthConfig {
    pub confidence_threshold: f32,
    pub buffer_size: usize,
    pub majority_threshold: f32,
    pub word_cooldown_secs: f64,
    pub refiner: &'static str,
}

pub struct SignRecognizer {
    config: RecognizerConfig,
    lexicon: Arc<SignLexicon>,
    registry: SessionRegistry,
    refiner: Box<dyn Refiner>,
}

impl SignRecognizer {
    /// Rule-based recognizer with the configured lexicon and refiner
    pub fn new(config: RecognizerConfig) -> Result<Self> {
        config.validate()?;
        let lexicon = config.lexicon()?;
        Ok(Self::with_lexicon(config, lexicon))
    }

    pub fn with_lexicon(config: RecognizerConfig, lexicon: SignLexicon) -> Self {
        let lexicon = Arc::new(lexicon);
        let factory: PredictorFactory = {
            let lexicon = Arc::clone(&lexicon);
            let params = config.filter;
            let threshold = config.recognition.confidence_threshold;
            Arc::new(move || {
                Box::new(RuleBasedPredictor::new(Arc::clone(&lexicon), params, threshold))
                    as Box<dyn Predictor>
            })
        };
        Self::with_predictor_factory(config, lexicon, factory)
    }

    /// Recognizer whose sessions use predictors built by `factory`
    pub fn with_predictor_factory(
        config: RecognizerConfig,
        lexicon: Arc<SignLexicon>,
        factory: PredictorFactory,
    ) -> Self {
        let registry = SessionRegistry::new(
            factory,
            config.stabilizer,
            config.session.timeout_secs,
            config.session.cleanup_interval_secs,
        );
        let refiner = build_refiner(&config.refine);
        Self {
            config,
            lexicon,
            registry,
            refiner,
        }
    }

    pub fn with_refiner(mut self, refiner: Box<dyn Refiner>) -> Self {
        self.refiner = refiner;
        self
    }

    // ========================================================================
    // FRAME PATH
    // ========================================================================

    pub fn process_frame(&self, session_id: &str, landmarks: &[Landmark]) -> FrameOutcome {
        self.process_frame_at(session_id, landmarks, now_secs())
    }

    /// Process one frame observed at `now` (seconds)
    ///
    /// A frame without exactly 21 points is logged and skipped: no session
    /// is created or touched.
    pub fn process_frame_at(&self, session_id: &str, landmarks: &[Landmark], now: f64) -> FrameOutcome {
        if landmarks.len() != LANDMARK_COUNT {
            warn!(
                session = session_id,
                expected = LANDMARK_COUNT,
                got = landmarks.len(),
                "Invalid landmark frame"
            );
            return FrameOutcome::rejected(self.sentence(session_id));
        }

        self.registry.maybe_sweep(now);
        let session = self.registry.get_or_create(session_id, now);
        let mut session = session.lock();
        session.process(landmarks, now)
    }

    /// Empty the sentence and vote buffer of a session; unknown ids are a no-op
    pub fn clear_session(&self, session_id: &str) {
        if let Some(session) = self.registry.get(session_id) {
            session.lock().clear();
        }
    }

    /// Release all state of a session (connection closed)
    pub fn end_session(&self, session_id: &str) -> Result<()> {
        if self.registry.evict(session_id) {
            Ok(())
        } else {
            Err(SignError::UnknownSession(session_id.to_string()))
        }
    }

    pub fn sentence(&self, session_id: &str) -> String {
        self.registry
            .get(session_id)
            .map(|s| s.lock().sentence())
            .unwrap_or_default()
    }

    pub fn words(&self, session_id: &str) -> Vec<String> {
        self.registry
            .get(session_id)
            .map(|s| s.lock().words().to_vec())
            .unwrap_or_default()
    }

    // ========================================================================
    // REFINEMENT / HEALTH
    // ========================================================================

    /// Refine a session's sentence; falls back to local formatting on error
    pub fn refine(&self, session_id: &str) -> Refinement {
        let words = self.words(session_id);
        let original = words.join(" ");
        let refined = match self.refiner.refine(&words) {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    session = session_id,
                    refiner = self.refiner.name(),
                    error = %e,
                    "Refinement failed, using basic formatting"
                );
                fallback_format(&original)
            }
        };
        Refinement { original, refined }
    }

    pub fn health(&self) -> HealthReport {
        HealthReport {
            status: "healthy",
            version: env!("CARGO_PKG_VERSION"),
            lexicon_size: self.lexicon.len(),
            active_sessions: self.registry.len(),
            config: HealthConfig {
                confidence_threshold: self.config.recognition.confidence_threshold,
                buffer_size: self.config.stabilizer.buffer_size,
                majority_threshold: self.config.stabilizer.majority_threshold,
                word_cooldown_secs: self.config.stabilizer.word_cooldown_secs,
                refiner: self.refiner.name(),
            },
        }
    }

    pub fn config(&self) -> &RecognizerConfig {
        &self.config
    }

    pub fn lexicon(&self) -> &SignLexicon {
        &self.lexicon
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::fixtures::{pose, FIST, POINTING};
    use crate::hand::PalmOrientation;
    use crate::refine::RefineError;

    struct Failing;

    impl Refiner for Failing {
        fn refine(&self, _words: &[String]) -> std::result::Result<String, RefineError> {
            Err(RefineError::Http {
                status: 503,
                message: "unavailable".into(),
            })
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    fn recognizer() -> SignRecognizer {
        SignRecognizer::new(RecognizerConfig::default()).unwrap()
    }

    fn feed(r: &SignRecognizer, id: &str, frame: &[Landmark], start: f64, n: usize) -> FrameOutcome {
        let mut last = FrameOutcome::rejected(String::new());
        for i in 0..n {
            last = r.process_frame_at(id, frame, start + i as f64 * 0.033);
        }
        last
    }

    #[test]
    fn test_short_frame_touches_nothing() {
        let r = recognizer();
        let outcome = r.process_frame_at("s", &[Landmark::default(); 20], 0.0);
        assert_eq!(outcome, FrameOutcome::rejected(String::new()));
        assert!(r.registry().is_empty());
    }

    #[test]
    fn test_sessions_are_independent() {
        let r = recognizer();
        let pointing = pose(POINTING, PalmOrientation::Up);
        feed(&r, "a", &pointing, 0.0, 8);
        assert_eq!(r.sentence("a"), "1");
        assert_eq!(r.sentence("b"), "");
    }

    #[test]
    fn test_refine_falls_back() {
        let r = recognizer().with_refiner(Box::new(Failing));
        let fist = pose(FIST, PalmOrientation::Up);
        feed(&r, "s", &fist, 0.0, 8);
        let refinement = r.refine("s");
        // a fist with the thumb tucked first matches E
        assert_eq!(refinement.original, "E");
        assert_eq!(refinement.refined, "E.");
    }

    #[test]
    fn test_end_session() {
        let r = recognizer();
        feed(&r, "s", &pose(POINTING, PalmOrientation::Up), 0.0, 1);
        assert!(r.end_session("s").is_ok());
        assert!(matches!(r.end_session("s"), Err(SignError::UnknownSession(_))));
    }

    #[test]
    fn test_health() {
        let r = recognizer();
        feed(&r, "s", &pose(POINTING, PalmOrientation::Up), 0.0, 1);
        let health = r.health();
        assert_eq!(health.status, "healthy");
        assert_eq!(health.lexicon_size, 73);
        assert_eq!(health.active_sessions, 1);
        assert_eq!(health.config.buffer_size, 8);
        assert_eq!(health.config.refiner, "basic");
    }
}
