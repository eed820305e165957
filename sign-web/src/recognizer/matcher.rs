//! Gesture matcher - scores a `HandState` against every lexicon entry
//!
//! Confidence is the fraction of a definition's checks that passed
//! (finger states, orientation, special predicate). Checks are strict:
//! a finger in a neighbouring state earns nothing.

use std::sync::Arc;

use super::predictor::Prediction;
use crate::geometry::distance;
use crate::hand::HandState;
use crate::landmarks::{INDEX_MCP, INDEX_TIP, MIDDLE_TIP, THUMB_TIP};
use crate::lexicon::{SignDefinition, SignLexicon, SpecialCheck};

/// Normalized distance below which two fingertips touch
pub const TOUCH_THRESHOLD: f32 = 0.05;

/// Default minimum confidence for a label to be reported
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.75;

// ============================================================================
// SPECIAL PREDICATES
// ============================================================================

fn tips_touch(hand: &HandState, a: usize, b: usize) -> bool {
    distance(&hand.point(a), &hand.point(b)) < TOUCH_THRESHOLD
}

/// Evaluate a named predicate on the smoothed coordinates
pub fn special_passes(check: SpecialCheck, hand: &HandState) -> bool {
    match check {
        SpecialCheck::ThumbIndexTouch => tips_touch(hand, THUMB_TIP, INDEX_TIP),
        SpecialCheck::ThumbMiddleTouch => tips_touch(hand, THUMB_TIP, MIDDLE_TIP),
        SpecialCheck::AllTipsTouch => {
            tips_touch(hand, THUMB_TIP, INDEX_TIP) && tips_touch(hand, THUMB_TIP, MIDDLE_TIP)
        }
        // x-axis heuristic
        SpecialCheck::ThumbUnderIndex => hand.point(THUMB_TIP).x > hand.point(INDEX_MCP).x,
        SpecialCheck::ThumbUnderMiddle
        | SpecialCheck::ThumbUnderRing
        | SpecialCheck::IndexMiddleCross
        | SpecialCheck::ThumbPinkyTouch
        | SpecialCheck::IndexMiddleThumbSnap => false,
    }
}

// ============================================================================
// MATCHER
// ============================================================================

pub struct GestureMatcher {
    lexicon: Arc<SignLexicon>,
    threshold: f32,
}

impl GestureMatcher {
    pub fn new(lexicon: Arc<SignLexicon>, threshold: f32) -> Self {
        Self { lexicon, threshold }
    }

    /// Fraction of applicable checks satisfied; 0 for a definition with none
    pub fn score(hand: &HandState, def: &SignDefinition) -> f32 {
        let mut hits = 0u32;
        let mut total = 0u32;

        for (finger, allowed) in def.fingers.iter() {
            total += 1;
            if allowed.contains(hand.finger(finger)) {
                hits += 1;
            }
        }

        if let Some(orientations) = &def.orientation {
            total += 1;
            if orientations.contains(&hand.orientation()) {
                hits += 1;
            }
        }

        if let Some(check) = def.special {
            total += 1;
            if special_passes(check, hand) {
                hits += 1;
            }
        }

        if total == 0 {
            return 0.0;
        }
        hits as f32 / total as f32
    }

    /// Best-scoring entry; earlier entries win ties
    ///
    /// The label is withheld when the best score is under the threshold, but
    /// the score is still reported.
    pub fn best_match(&self, hand: &HandState) -> Prediction {
        let mut best: Option<&SignDefinition> = None;
        let mut best_confidence = 0.0f32;

        for def in self.lexicon.iter() {
            let confidence = Self::score(hand, def);
            if confidence > best_confidence {
                best_confidence = confidence;
                best = Some(def);
            }
        }

        match best {
            Some(def) if best_confidence >= self.threshold => {
                Prediction::accepted(def.label.clone(), best_confidence)
            }
            _ => Prediction::below_threshold(best_confidence),
        }
    }

    pub fn lexicon(&self) -> &SignLexicon {
        &self.lexicon
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::fixtures::{pose, OPEN_HAND, POINTING};
    use crate::hand::{FingerState, HandFeatureExtractor, PalmOrientation};
    use crate::lexicon::StateSet;

    fn hand(fingers: [FingerState; 5], orientation: PalmOrientation) -> HandState {
        let mut extractor = HandFeatureExtractor::default();
        extractor
            .process(&pose(fingers, orientation), 1.0)
            .expect("fixture has 21 points")
    }

    /// Pointing hand with `tip` placed `offset` along x from landmark `anchor`
    fn moved_tip(tip: usize, anchor: usize, offset: f32) -> HandState {
        let mut points = pose(POINTING, PalmOrientation::Up);
        let mut moved = points[anchor];
        moved.x += offset;
        points[tip] = moved;
        // the first frame of a fresh extractor is not smoothed
        HandFeatureExtractor::default()
            .process(&points, 1.0)
            .expect("fixture has 21 points")
    }

    fn lexicon(signs: Vec<SignDefinition>) -> Arc<SignLexicon> {
        Arc::new(SignLexicon::new(signs).unwrap())
    }

    #[test]
    fn test_strict_finger_check() {
        let curled = [
            FingerState::Folded,
            FingerState::Curled,
            FingerState::Folded,
            FingerState::Folded,
            FingerState::Folded,
        ];
        let state = hand(curled, PalmOrientation::Up);
        let def = SignDefinition::new("IDX", [None, Some(StateSet::EXTENDED), None, None, None]);
        assert_eq!(GestureMatcher::score(&state, &def), 0.0);
    }

    #[test]
    fn test_vacuous_definition_scores_zero() {
        let state = hand(OPEN_HAND, PalmOrientation::Up);
        let def = SignDefinition::new("EMPTY", [None; 5]);
        assert_eq!(GestureMatcher::score(&state, &def), 0.0);
    }

    #[test]
    fn test_partial_score() {
        let state = hand(POINTING, PalmOrientation::Up);
        let def = SignDefinition::new(
            "HALF",
            [None, Some(StateSet::EXTENDED), Some(StateSet::EXTENDED), None, None],
        );
        assert!((GestureMatcher::score(&state, &def) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_unimplemented_special_never_passes() {
        let state = hand(POINTING, PalmOrientation::Up);
        let def = SignDefinition::new("SNAP", [None, Some(StateSet::EXTENDED), None, None, None])
            .special(SpecialCheck::IndexMiddleThumbSnap);
        assert!((GestureMatcher::score(&state, &def) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_first_entry_wins_ties() {
        let state = hand(POINTING, PalmOrientation::Up);
        let rule = [None, Some(StateSet::EXTENDED), None, None, None];
        let matcher = GestureMatcher::new(
            lexicon(vec![
                SignDefinition::new("FIRST", rule),
                SignDefinition::new("SECOND", rule),
            ]),
            0.75,
        );
        let prediction = matcher.best_match(&state);
        assert_eq!(prediction.label.as_deref(), Some("FIRST"));
        assert_eq!(prediction.confidence, 1.0);
    }

    #[test]
    fn test_below_threshold_keeps_confidence() {
        let state = hand(POINTING, PalmOrientation::Up);
        let def = SignDefinition::new(
            "HALF",
            [None, Some(StateSet::EXTENDED), Some(StateSet::EXTENDED), None, None],
        );
        let matcher = GestureMatcher::new(lexicon(vec![def]), 0.75);
        let prediction = matcher.best_match(&state);
        assert!(prediction.label.is_none());
        assert!((prediction.confidence - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_standard_lexicon_pointing_up() {
        let state = hand(POINTING, PalmOrientation::Up);
        let matcher = GestureMatcher::new(Arc::new(SignLexicon::standard()), 0.75);
        let prediction = matcher.best_match(&state);
        assert_eq!(prediction.label.as_deref(), Some("1"));
        assert_eq!(prediction.confidence, 1.0);
    }

    #[test]
    fn test_touch_threshold_is_strict() {
        let near = moved_tip(THUMB_TIP, INDEX_TIP, 0.049);
        assert!(special_passes(SpecialCheck::ThumbIndexTouch, &near));

        let far = moved_tip(THUMB_TIP, INDEX_TIP, 0.051);
        assert!(!special_passes(SpecialCheck::ThumbIndexTouch, &far));
    }

    #[test]
    fn test_thumb_middle_touch() {
        let state = moved_tip(THUMB_TIP, MIDDLE_TIP, 0.01);
        assert!(special_passes(SpecialCheck::ThumbMiddleTouch, &state));
        assert!(!special_passes(SpecialCheck::ThumbIndexTouch, &state));
    }

    #[test]
    fn test_all_tips_touch_needs_both() {
        let mut points = pose(POINTING, PalmOrientation::Up);
        let tip = points[THUMB_TIP];
        points[INDEX_TIP] = tip;
        let only_index = HandFeatureExtractor::default().process(&points, 1.0).unwrap();
        assert!(special_passes(SpecialCheck::ThumbIndexTouch, &only_index));
        assert!(!special_passes(SpecialCheck::AllTipsTouch, &only_index));

        points[MIDDLE_TIP] = tip;
        points[MIDDLE_TIP].y += 0.01;
        let both = HandFeatureExtractor::default().process(&points, 1.0).unwrap();
        assert!(special_passes(SpecialCheck::AllTipsTouch, &both));
    }

    #[test]
    fn test_thumb_under_index_uses_x_only() {
        let beyond = moved_tip(THUMB_TIP, INDEX_MCP, 0.02);
        assert!(special_passes(SpecialCheck::ThumbUnderIndex, &beyond));

        let before = moved_tip(THUMB_TIP, INDEX_MCP, -0.02);
        assert!(!special_passes(SpecialCheck::ThumbUnderIndex, &before));
    }

    #[test]
    fn test_special_counts_as_one_check() {
        let state = moved_tip(THUMB_TIP, INDEX_TIP, 0.0);
        let def = SignDefinition::new("PINCH", [None, Some(StateSet::EXTENDED), None, None, None])
            .special(SpecialCheck::ThumbIndexTouch);
        assert_eq!(GestureMatcher::score(&state, &def), 1.0);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let state = hand(POINTING, PalmOrientation::Up);
        // index, ring and orientation pass; middle does not
        let def = SignDefinition::new(
            "Q3",
            [
                None,
                Some(StateSet::EXTENDED),
                Some(StateSet::EXTENDED),
                Some(StateSet::FOLDED),
                None,
            ],
        )
        .facing(&[PalmOrientation::Up]);
        let matcher = GestureMatcher::new(lexicon(vec![def]), 0.75);
        let prediction = matcher.best_match(&state);
        assert_eq!(prediction.label.as_deref(), Some("Q3"));
        assert_eq!(prediction.confidence, 0.75);
    }
}
