//! Temporal stabilizer - turns noisy per-frame labels into committed words
//!
//! Stage one is a majority vote over a full buffer, after which the buffer
//! is emptied so the next sign starts from scratch. Stage two drops a
//! repeat of the previous word inside the cooldown window.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::sentence::Sentence;
use super::vote::VoteBuffer;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StabilizerParams {
    /// Votes gathered before a decision
    pub buffer_size: usize,
    /// Fraction of the buffer the winning label must exceed
    pub majority_threshold: f32,
    pub word_cooldown_secs: f64,
}

impl Default for StabilizerParams {
    fn default() -> Self {
        Self {
            buffer_size: 8,
            majority_threshold: 0.65,
            word_cooldown_secs: 0.5,
        }
    }
}

pub struct TemporalStabilizer {
    votes: VoteBuffer,
    sentence: Sentence,
    majority_threshold: f32,
}

impl TemporalStabilizer {
    pub fn new(params: StabilizerParams) -> Self {
        Self {
            votes: VoteBuffer::new(params.buffer_size),
            sentence: Sentence::new(params.word_cooldown_secs),
            majority_threshold: params.majority_threshold,
        }
    }

    /// Record one accepted label seen at `now`
    ///
    /// Returns the word if this vote committed it to the sentence.
    pub fn push(&mut self, label: &str, now: f64) -> Option<String> {
        self.votes.push(label);
        if !self.votes.is_full() {
            return None;
        }

        let needed = self.votes.capacity() as f32 * self.majority_threshold;
        let winner = match self.votes.majority() {
            Some((word, count)) if count as f32 > needed => word.to_string(),
            _ => return None,
        };
        self.votes.clear();

        if self.sentence.commit(&winner, now) {
            info!(word = %winner, sentence = %self.sentence.text(), "Committed word");
            Some(winner)
        } else {
            None
        }
    }

    pub fn sentence(&self) -> String {
        self.sentence.text()
    }

    pub fn words(&self) -> &[String] {
        self.sentence.words()
    }

    pub fn pending_votes(&self) -> usize {
        self.votes.len()
    }

    pub fn clear(&mut self) {
        self.votes.clear();
        self.sentence.clear();
    }
}

impl Default for TemporalStabilizer {
    fn default() -> Self {
        Self::new(StabilizerParams::default())
    }
}
