//! Fixed-capacity vote buffer of recent accepted labels

use std::collections::VecDeque;

pub struct VoteBuffer {
    labels: VecDeque<String>,
    capacity: usize,
}

impl VoteBuffer {
    /// Capacity is clamped to at least one slot
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            labels: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a label, evicting the oldest when full
    pub fn push(&mut self, label: impl Into<String>) {
        if self.labels.len() == self.capacity {
            self.labels.pop_front();
        }
        self.labels.push_back(label.into());
    }

    /// Most frequent label and its count; the earliest-seen label wins ties
    pub fn majority(&self) -> Option<(&str, usize)> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for label in &self.labels {
            match counts.iter_mut().find(|(l, _)| *l == label.as_str()) {
                Some((_, n)) => *n += 1,
                None => counts.push((label.as_str(), 1)),
            }
        }

        let mut best: Option<(&str, usize)> = None;
        for (label, count) in counts {
            if best.map_or(true, |(_, b)| count > b) {
                best = Some((label, count));
            }
        }
        best
    }

    pub fn is_full(&self) -> bool {
        self.labels.len() == self.capacity
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }
}
