//! Smoothing module - jitter reduction for raw landmark streams
//!
//! Re-exports only. All logic in submodules.

mod filter_bank;
mod one_euro;

pub use filter_bank::FilterBank;
pub use one_euro::{FilterParams, OneEuroFilter};
