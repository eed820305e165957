//! Sign definitions - declarative hand-shape rules
//!
//! A definition lists acceptable bend states per finger (absent finger =
//! don't care), optionally the allowed palm orientations, and optionally one
//! named geometric predicate.

use serde::{Deserialize, Serialize};

use crate::hand::{Finger, FingerState, PalmOrientation};

// ============================================================================
// FINGER STATE SET
// ============================================================================

/// Small bit set of acceptable `FingerState`s
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<FingerState>", into = "Vec<FingerState>")]
pub struct StateSet(u8);

impl StateSet {
    pub const FOLDED: StateSet = StateSet(1);
    pub const CURLED: StateSet = StateSet(1 << 1);
    pub const EXTENDED: StateSet = StateSet(1 << 2);

    const fn bit(state: FingerState) -> u8 {
        match state {
            FingerState::Folded => 1,
            FingerState::Curled => 1 << 1,
            FingerState::Extended => 1 << 2,
        }
    }

    pub const fn union(self, other: StateSet) -> StateSet {
        StateSet(self.0 | other.0)
    }

    pub fn contains(&self, state: FingerState) -> bool {
        self.0 & Self::bit(state) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn states(&self) -> impl Iterator<Item = FingerState> + '_ {
        [FingerState::Folded, FingerState::Curled, FingerState::Extended]
            .into_iter()
            .filter(|s| self.contains(*s))
    }
}

impl From<Vec<FingerState>> for StateSet {
    fn from(states: Vec<FingerState>) -> Self {
        StateSet(states.iter().fold(0, |acc, s| acc | Self::bit(*s)))
    }
}

impl From<StateSet> for Vec<FingerState> {
    fn from(set: StateSet) -> Self {
        set.states().collect()
    }
}

// ============================================================================
// PER-FINGER RULES
// ============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FingerRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumb: Option<StateSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<StateSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle: Option<StateSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring: Option<StateSet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinky: Option<StateSet>,
}

impl FingerRules {
    /// Rules in thumb-first order
    pub const fn from_array(rules: [Option<StateSet>; 5]) -> Self {
        let [thumb, index, middle, ring, pinky] = rules;
        Self {
            thumb,
            index,
            middle,
            ring,
            pinky,
        }
    }

    pub fn get(&self, finger: Finger) -> Option<StateSet> {
        match finger {
            Finger::Thumb => self.thumb,
            Finger::Index => self.index,
            Finger::Middle => self.middle,
            Finger::Ring => self.ring,
            Finger::Pinky => self.pinky,
        }
    }

    /// Constrained fingers only
    pub fn iter(&self) -> impl Iterator<Item = (Finger, StateSet)> + '_ {
        Finger::ALL
            .into_iter()
            .filter_map(|f| self.get(f).map(|set| (f, set)))
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }
}

// ============================================================================
// NAMED PREDICATES
// ============================================================================

/// Geometric predicates a definition may require
///
/// Only the touch checks and `ThumbUnderIndex` have a geometric test; the
/// rest are named by signs but never pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecialCheck {
    ThumbIndexTouch,
    ThumbMiddleTouch,
    AllTipsTouch,
    ThumbUnderIndex,
    ThumbUnderMiddle,
    ThumbUnderRing,
    IndexMiddleCross,
    ThumbPinkyTouch,
    IndexMiddleThumbSnap,
}

impl SpecialCheck {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialCheck::ThumbIndexTouch => "THUMB_INDEX_TOUCH",
            SpecialCheck::ThumbMiddleTouch => "THUMB_MIDDLE_TOUCH",
            SpecialCheck::AllTipsTouch => "ALL_TIPS_TOUCH",
            SpecialCheck::ThumbUnderIndex => "THUMB_UNDER_INDEX",
            SpecialCheck::ThumbUnderMiddle => "THUMB_UNDER_MIDDLE",
            SpecialCheck::ThumbUnderRing => "THUMB_UNDER_RING",
            SpecialCheck::IndexMiddleCross => "INDEX_MIDDLE_CROSS",
            SpecialCheck::ThumbPinkyTouch => "THUMB_PINKY_TOUCH",
            SpecialCheck::IndexMiddleThumbSnap => "INDEX_MIDDLE_THUMB_SNAP",
        }
    }
}

/// Descriptive shape notes; part of the schema, not scored
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeHint {
    NailsVisible,
    IndexMiddleTogether,
    IndexMiddleApart,
}

// ============================================================================
// DEFINITION
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SignDefinition {
    pub label: String,
    #[serde(default)]
    pub fingers: FingerRules,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<Vec<PalmOrientation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special: Option<SpecialCheck>,
    /// Fingers spread apart; not used in matching
    #[serde(default)]
    pub spread: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<ShapeHint>,
}

impl SignDefinition {
    /// Definition with finger rules in thumb-first order
    pub fn new(label: impl Into<String>, fingers: [Option<StateSet>; 5]) -> Self {
        Self {
            label: label.into(),
            fingers: FingerRules::from_array(fingers),
            orientation: None,
            special: None,
            spread: false,
            hint: None,
        }
    }

    pub fn facing(mut self, orientations: &[PalmOrientation]) -> Self {
        self.orientation = Some(orientations.to_vec());
        self
    }

    pub fn special(mut self, check: SpecialCheck) -> Self {
        self.special = Some(check);
        self
    }

    pub fn spread(mut self) -> Self {
        self.spread = true;
        self
    }

    pub fn hint(mut self, hint: ShapeHint) -> Self {
        self.hint = Some(hint);
        self
    }

    /// Number of checks the matcher will evaluate for this definition
    pub fn check_count(&self) -> usize {
        self.fingers.count()
            + usize::from(self.orientation.is_some())
            + usize::from(self.special.is_some())
    }
}
