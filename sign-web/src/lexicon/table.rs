//! Sign lexicon - ordered, read-only table of definitions
//!
//! Order is significant: the matcher keeps the first of equally scored
//! entries, so both the built-in table and TOML files preserve declaration
//! order.

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::definition::{ShapeHint, SignDefinition, SpecialCheck, StateSet};
use crate::error::{Result, SignError};
use crate::hand::PalmOrientation::{Down, Forward, Left, Right, Up};

#[derive(Clone, Debug, Default)]
pub struct SignLexicon {
    signs: Vec<SignDefinition>,
}

/// On-disk form: a list of `[[sign]]` tables
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct LexiconFile {
    #[serde(default)]
    sign: Vec<SignDefinition>,
}

impl SignLexicon {
    pub fn new(signs: Vec<SignDefinition>) -> Result<Self> {
        for def in &signs {
            validate(def)?;
        }
        Ok(Self { signs })
    }

    /// Built-in table of digits, letters and common words
    pub fn standard() -> Self {
        Self {
            signs: standard_signs(),
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let file: LexiconFile =
            toml::from_str(text).map_err(|e| SignError::InvalidConfig(format!("lexicon: {e}")))?;
        Self::new(file.sign)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| SignError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: LexiconFile = toml::from_str(&text).map_err(|source| SignError::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        let lexicon = Self::new(file.sign)?;
        info!(path = %path.display(), signs = lexicon.len(), "Loaded sign lexicon");
        Ok(lexicon)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SignDefinition> {
        self.signs.iter()
    }

    pub fn get(&self, label: &str) -> Option<&SignDefinition> {
        self.signs.iter().find(|d| d.label == label)
    }

    pub fn len(&self) -> usize {
        self.signs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signs.is_empty()
    }
}

fn validate(def: &SignDefinition) -> Result<()> {
    if def.label.trim().is_empty() {
        return Err(SignError::InvalidConfig("sign with empty label".into()));
    }
    if def.fingers.iter().any(|(_, set)| set.is_empty()) {
        return Err(SignError::InvalidConfig(format!(
            "sign {}: empty finger state set",
            def.label
        )));
    }
    if def.orientation.as_ref().is_some_and(|o| o.is_empty()) {
        return Err(SignError::InvalidConfig(format!(
            "sign {}: empty orientation set",
            def.label
        )));
    }
    Ok(())
}

// ============================================================================
// BUILT-IN TABLE
// ============================================================================

const ANY: Option<StateSet> = None;
const EXT: Option<StateSet> = Some(StateSet::EXTENDED);
const FOLD: Option<StateSet> = Some(StateSet::FOLDED);
const CURL: Option<StateSet> = Some(StateSet::CURLED);
const FOLD_CURL: Option<StateSet> = Some(StateSet::FOLDED.union(StateSet::CURLED));
const EXT_CURL: Option<StateSet> = Some(StateSet::EXTENDED.union(StateSet::CURLED));

/// Finger columns: thumb, index, middle, ring, pinky
fn sign(label: &str, fingers: [Option<StateSet>; 5]) -> SignDefinition {
    SignDefinition::new(label, fingers)
}

fn standard_signs() -> Vec<SignDefinition> {
    use ShapeHint::*;
    use SpecialCheck::*;

    vec![
        // Digits
        sign("0", [ANY, FOLD_CURL, EXT_CURL, EXT_CURL, EXT_CURL]).special(ThumbIndexTouch),
        sign("1", [ANY, EXT, FOLD, FOLD, FOLD]),
        sign("2", [ANY, EXT, EXT, FOLD, FOLD]),
        sign("3", [EXT, EXT, EXT, FOLD, FOLD]),
        sign("4", [FOLD, EXT, EXT, EXT, EXT]),
        sign("5", [EXT, EXT, EXT, EXT, EXT]).spread(),
        // Alphabet
        sign("A", [EXT, FOLD, FOLD, FOLD, FOLD]).facing(&[Up]),
        sign("B", [FOLD_CURL, EXT, EXT, EXT, EXT]).facing(&[Up]),
        sign("C", [EXT_CURL, CURL, CURL, CURL, CURL]).facing(&[Left, Right]),
        sign("D", [ANY, EXT, FOLD_CURL, FOLD_CURL, FOLD_CURL]).special(ThumbMiddleTouch),
        sign("E", [FOLD_CURL, FOLD_CURL, FOLD_CURL, FOLD_CURL, FOLD_CURL]).hint(NailsVisible),
        sign("F", [ANY, FOLD_CURL, EXT, EXT, EXT]).special(ThumbIndexTouch),
        sign("G", [EXT, EXT, FOLD, FOLD, FOLD]).facing(&[Left, Right]),
        sign("H", [ANY, EXT, EXT, FOLD, FOLD]).facing(&[Left, Right]),
        sign("I", [ANY, FOLD, FOLD, FOLD, EXT]).facing(&[Up]),
        sign("K", [EXT, EXT, EXT, FOLD, FOLD]).facing(&[Up]),
        sign("L", [EXT, EXT, FOLD, FOLD, FOLD]).facing(&[Up]),
        sign("M", [FOLD, FOLD, FOLD, FOLD, FOLD]).special(ThumbUnderRing),
        sign("N", [ANY, FOLD, FOLD, FOLD, FOLD]).special(ThumbUnderMiddle),
        sign("O", [ANY, CURL, CURL, CURL, CURL]).special(AllTipsTouch),
        sign("P", [EXT, EXT, EXT, FOLD, FOLD]).facing(&[Down]),
        sign("Q", [EXT, EXT, FOLD, FOLD, FOLD]).facing(&[Down]),
        sign("R", [ANY, EXT, EXT, FOLD, FOLD]).special(IndexMiddleCross),
        sign("S", [FOLD, FOLD, FOLD, FOLD, FOLD]).facing(&[Up]),
        sign("T", [ANY, FOLD, FOLD, FOLD, FOLD]).special(ThumbUnderIndex),
        sign("U", [ANY, EXT, EXT, FOLD, FOLD]).hint(IndexMiddleTogether),
        sign("V", [ANY, EXT, EXT, FOLD, FOLD]).hint(IndexMiddleApart),
        sign("W", [ANY, EXT, EXT, EXT, FOLD]),
        sign("X", [ANY, CURL, FOLD, FOLD, FOLD]).facing(&[Up, Left, Right]),
        sign("Y", [EXT, FOLD, FOLD, FOLD, EXT]),
        // Static start pose of the Z motion
        sign("Z_START", [ANY, EXT, FOLD, FOLD, FOLD]).facing(&[Up]),
        sign("I LOVE YOU", [EXT, EXT, FOLD, FOLD, EXT]),
        // Number words
        sign("ZERO", [EXT, CURL, EXT, EXT, EXT]).special(ThumbIndexTouch),
        sign("ONE", [ANY, EXT, FOLD, FOLD, FOLD]),
        sign("TWO", [ANY, EXT, EXT, FOLD, FOLD]).hint(IndexMiddleApart),
        sign("THREE", [EXT, EXT, EXT, EXT, FOLD]),
        sign("FOUR", [FOLD, EXT, EXT, EXT, EXT]),
        sign("FIVE", [EXT, EXT, EXT, EXT, EXT]),
        sign("SIX", [FOLD, EXT, EXT, EXT, FOLD]).special(ThumbPinkyTouch),
        sign("SEVEN", [FOLD, EXT, EXT, FOLD, EXT]),
        sign("EIGHT", [FOLD, EXT, FOLD, EXT, EXT]),
        sign("NINE", [FOLD, FOLD, EXT, EXT, EXT]),
        // Common words
        sign("HELLO", [EXT, EXT, EXT, EXT, EXT]),
        sign("YES", [EXT, FOLD, FOLD, FOLD, FOLD]),
        sign("NO", [EXT, EXT, EXT, FOLD, FOLD]).special(IndexMiddleThumbSnap),
        sign("OK", [ANY, CURL, EXT, EXT, EXT]).special(ThumbIndexTouch),
        sign("CALL", [EXT, FOLD, FOLD, FOLD, EXT]),
        sign("STOP", [EXT, EXT, EXT, EXT, EXT]).facing(&[Forward]),
        sign("HELP", [EXT, FOLD, FOLD, FOLD, FOLD]).facing(&[Up]),
        sign("THANK YOU", [EXT, EXT, EXT, EXT, EXT]).facing(&[Forward]),
        sign("PLEASE", [FOLD, EXT, EXT, EXT, EXT]),
        sign("SORRY", [FOLD, FOLD, FOLD, FOLD, FOLD]),
        sign("GOOD", [EXT, FOLD, FOLD, FOLD, FOLD]).facing(&[Forward]),
        sign("BAD", [EXT, EXT, EXT, EXT, EXT]).facing(&[Down]),
        sign("WATER", [EXT, EXT, FOLD, FOLD, FOLD]).special(ThumbIndexTouch),
        sign("FOOD", [CURL, CURL, CURL, CURL, CURL]).special(AllTipsTouch),
        sign("DRINK", [EXT, CURL, CURL, CURL, CURL]),
        sign("MONEY", [EXT, EXT, EXT, FOLD, FOLD]).special(ThumbIndexTouch),
        sign("HOME", [CURL, CURL, CURL, CURL, CURL]),
        sign("WORK", [FOLD, FOLD, FOLD, FOLD, FOLD]).facing(&[Down]),
        sign("FRIEND", [CURL, CURL, FOLD, FOLD, FOLD]),
        sign("LOVE", [FOLD, FOLD, FOLD, FOLD, FOLD]),
        sign("HAPPY", [EXT, EXT, EXT, EXT, EXT]).facing(&[Up]),
        sign("SAD", [FOLD, EXT, EXT, EXT, EXT]).facing(&[Down]),
        sign("HUNGRY", [EXT, CURL, CURL, CURL, CURL]).facing(&[Down]),
        sign("TIRED", [CURL, CURL, CURL, CURL, CURL]).facing(&[Down]),
        sign("BATHROOM", [EXT, FOLD, FOLD, FOLD, FOLD]).special(ThumbIndexTouch),
        sign("PHONE", [EXT, FOLD, FOLD, FOLD, EXT]),
        sign("WAIT", [EXT, EXT, EXT, EXT, EXT]).spread(),
        sign("COME", [FOLD, CURL, FOLD, FOLD, FOLD]),
        sign("GO", [FOLD, EXT, FOLD, FOLD, FOLD]).facing(&[Forward]),
        sign("MORE", [CURL, CURL, CURL, CURL, CURL]).special(AllTipsTouch),
        sign("FINISHED", [EXT, EXT, EXT, EXT, EXT]).spread().facing(&[Down]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hand::{Finger, FingerState};

    #[test]
    fn test_standard_table_order() {
        let lexicon = SignLexicon::standard();
        assert_eq!(lexicon.len(), 73);
        let labels: Vec<&str> = lexicon.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(&labels[..3], &["0", "1", "2"]);
        assert_eq!(labels[6], "A");
        assert_eq!(labels.last(), Some(&"FINISHED"));
        assert!(!labels.contains(&"J"));
    }

    #[test]
    fn test_every_standard_sign_has_checks() {
        for def in SignLexicon::standard().iter() {
            assert!(def.check_count() > 0, "{} has no checks", def.label);
        }
    }

    #[test]
    fn test_from_toml_preserves_order() {
        let text = r#"
            [[sign]]
            label = "POINT"
            fingers = { index = ["extended"], middle = ["folded", "curled"] }
            orientation = ["up"]

            [[sign]]
            label = "PINCH"
            special = "THUMB_INDEX_TOUCH"
            hint = "NAILS_VISIBLE"
        "#;
        let lexicon = SignLexicon::from_toml_str(text).unwrap();
        assert_eq!(lexicon.len(), 2);

        let point = lexicon.get("POINT").unwrap();
        let middle = point.fingers.get(Finger::Middle).unwrap();
        assert!(middle.contains(FingerState::Curled));
        assert!(!middle.contains(FingerState::Extended));
        assert_eq!(point.check_count(), 3);

        let labels: Vec<&str> = lexicon.iter().map(|d| d.label.as_str()).collect();
        assert_eq!(labels, vec!["POINT", "PINCH"]);
    }

    #[test]
    fn test_rejects_unknown_special() {
        let text = r#"
            [[sign]]
            label = "BAD"
            special = "THUMB_WAVE"
        "#;
        assert!(SignLexicon::from_toml_str(text).is_err());
    }

    #[test]
    fn test_rejects_empty_orientation_set() {
        let text = r#"
            [[sign]]
            label = "NOWHERE"
            orientation = []
        "#;
        assert!(matches!(
            SignLexicon::from_toml_str(text),
            Err(SignError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signs.toml");
        std::fs::write(&path, "[[sign]]\nlabel = \"FLAT\"\nfingers = { thumb = [\"folded\"] }\n")
            .unwrap();
        let lexicon = SignLexicon::load(&path).unwrap();
        assert_eq!(lexicon.len(), 1);
        assert!(SignLexicon::load(&dir.path().join("missing.toml")).is_err());
    }
}
