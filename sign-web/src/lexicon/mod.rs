//! Lexicon module - sign definitions and the ordered sign table
//!
//! Re-exports only. All logic in submodules.

mod definition;
mod table;

pub use definition::{FingerRules, ShapeHint, SignDefinition, SpecialCheck, StateSet};
pub use table::SignLexicon;
