//! Deterministic local sentence formatting

use super::{RefineError, Refiner};

/// ASL gloss to English substitutions, applied in order after lowercasing
const SUBSTITUTIONS: [(&str, &str); 5] = [
    (" me ", " I "),
    ("me go", "I go"),
    ("me want", "I want"),
    ("me need", "I need"),
    ("you me", "you and I"),
];

/// Lowercase, substitute, capitalize, terminate with a period
pub fn fallback_format(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut refined = text.to_lowercase();
    for (gloss, english) in SUBSTITUTIONS {
        refined = refined.replace(gloss, english);
    }

    let mut chars = refined.chars();
    let mut out = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => return String::new(),
    };

    if !out.ends_with(['.', '!', '?']) {
        out.push('.');
    }
    out
}

/// Refiner that never leaves the process
#[derive(Clone, Copy, Debug, Default)]
pub struct BasicRefiner;

impl Refiner for BasicRefiner {
    fn refine(&self, words: &[String]) -> Result<String, RefineError> {
        Ok(fallback_format(&words.join(" ")))
    }

    fn name(&self) -> &'static str {
        "basic"
    }
}
