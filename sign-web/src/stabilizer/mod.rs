//! Stabilizer module - majority vote and sentence assembly
//!
//! Re-exports only. All logic in submodules.

mod sentence;
mod temporal;
mod vote;

pub use sentence::Sentence;
pub use temporal::{StabilizerParams, TemporalStabilizer};
pub use vote::VoteBuffer;
