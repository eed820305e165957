//! Committed word sequence with repeat suppression

use tracing::debug;

pub struct Sentence {
    words: Vec<String>,
    last_commit: Option<f64>,
    cooldown_secs: f64,
}

impl Sentence {
    pub fn new(cooldown_secs: f64) -> Self {
        Self {
            words: Vec::new(),
            last_commit: None,
            cooldown_secs,
        }
    }

    /// Append `word` committed at `now`
    ///
    /// Returns `false` when the word repeats the previous one inside the
    /// cooldown window; that counts as the same sign still being held.
    pub fn commit(&mut self, word: &str, now: f64) -> bool {
        if let (Some(last), Some(at)) = (self.words.last(), self.last_commit) {
            if last == word && now - at < self.cooldown_secs {
                debug!(word, elapsed = now - at, "Suppressed repeated word");
                return false;
            }
        }
        self.words.push(word.to_string());
        self.last_commit = Some(now);
        true
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn text(&self) -> String {
        self.words.join(" ")
    }

    pub fn last_commit(&self) -> Option<f64> {
        self.last_commit
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn clear(&mut self) {
        self.words.clear();
        self.last_commit = None;
    }
}
