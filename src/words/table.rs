// src/words/table.rs
// =============================================================================
// The word frequency table shared by every crawl worker.
//
// Many workers add words at the same time, so a plain HashMap would lose
// updates. We use `dashmap`, a HashMap split into shards that each have their
// own lock. Incrementing through `entry()` holds the shard lock for the whole
// read-modify-write, so no increment is ever lost.
//
// Lifetime: created when the crawl starts, written by workers while it runs,
// and only read (through `snapshot`) after the workers are done.
//
// Rust concepts:
// - Interior mutability: `&self` methods that still change data
// - Send + Sync: Types that can be shared between threads
// =============================================================================

use dashmap::DashMap;
use std::collections::HashMap;

use super::classify::{classify, split_words};

#[derive(Debug, Default)]
pub struct FrequencyTable {
    counts: DashMap<String, u64>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `token`, creating the entry if needed.
    pub fn merge(&self, token: String) {
        *self.counts.entry(token).or_insert(0) += 1;
    }

    /// Splits a text run into words and merges every countable one.
    ///
    /// Returns how many tokens were counted.
    pub fn merge_text(&self, text: &str) -> usize {
        let mut counted = 0;
        for word in split_words(text) {
            if let Some(token) = classify(word) {
                self.merge(token);
                counted += 1;
            }
        }
        counted
    }

    /// Copies the current counts into a plain map.
    pub fn snapshot(&self) -> HashMap<String, u64> {
        self.counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }
}
