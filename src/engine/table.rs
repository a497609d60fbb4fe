//! Shared aggregate table with sharded locking.
//!
//! The word space is partitioned by hash into a fixed number of shards, each
//! behind its own mutex, so merges touching disjoint shards proceed in
//! parallel. A merge locks exactly one shard at a time, visiting shards in
//! ascending index order, so no circular wait is possible.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::Mutex;

use super::tokenizer::LocalCount;

/// Number of independent lock shards partitioning the word space.
pub const SHARD_COUNT: usize = 16;

/// One logical row of the aggregate: global total plus per-file counts.
///
/// Invariant: `total == per_file.values().sum()` immediately after every
/// merge, never only eventually.
#[derive(Debug, Default, Clone)]
pub struct WordRecord {
    pub total: u64,
    /// Occurrences keyed by file index (enumeration order).
    pub per_file: HashMap<usize, u64>,
}

/// Thread-safe word -> [`WordRecord`] table shared by all workers.
///
/// Mutated only through [`merge`](Self::merge) during the processing phase;
/// [`into_records`](Self::into_records) consumes the table once the
/// dispatcher has joined all workers.
pub struct AggregateTable {
    shards: Vec<Mutex<HashMap<String, WordRecord>>>,
}

impl AggregateTable {
    pub fn new() -> Self {
        Self {
            shards: (0..SHARD_COUNT).map(|_| Mutex::new(HashMap::new())).collect(),
        }
    }

    fn shard_index(word: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        word.hash(&mut hasher);
        (hasher.finish() as usize) % SHARD_COUNT
    }

    /// Fold one file's local counts into the table.
    ///
    /// Safe to call concurrently from any number of workers. The local counts
    /// are grouped by shard first, then each shard is locked once, in
    /// ascending index order, with no other lock held.
    pub fn merge(&self, file_index: usize, local: LocalCount) {
        let mut buckets: Vec<Vec<(String, u64)>> = (0..SHARD_COUNT).map(|_| Vec::new()).collect();
        for (word, count) in local {
            buckets[Self::shard_index(&word)].push((word, count));
        }

        for (shard, bucket) in buckets.into_iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }
            let mut entries = self.shards[shard].lock().expect("table shard poisoned");
            for (word, count) in bucket {
                let record = entries.entry(word).or_default();
                record.total += count;
                *record.per_file.entry(file_index).or_insert(0) += count;
            }
        }
    }

    /// Consume the table into its records. Call after all workers joined.
    pub fn into_records(self) -> Vec<(String, WordRecord)> {
        self.shards
            .into_iter()
            .flat_map(|shard| shard.into_inner().expect("table shard poisoned"))
            .collect()
    }
}

impl Default for AggregateTable {
    fn default() -> Self {
        Self::new()
    }
}
