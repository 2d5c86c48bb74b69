// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory activity store keyed by user id.
//!
//! Each user's collection is replaced wholesale on write (read, extend,
//! write back under the per-key lock). Concurrent writers for one user are
//! last-write-wins.

use dashmap::DashMap;
use std::sync::Arc;

use crate::models::ActivityRecord;

/// Per-user activity record collections.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<DashMap<String, Vec<ActivityRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records for a user, in insertion order.
    pub fn list(&self, user_id: &str) -> Vec<ActivityRecord> {
        self.records
            .get(user_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    /// Append records to a user's collection. Returns the new collection size.
    pub fn append(&self, user_id: &str, records: Vec<ActivityRecord>) -> usize {
        let mut updated = self.list(user_id);
        updated.extend(records);
        let count = updated.len();
        self.records.insert(user_id.to_string(), updated);
        count
    }

    /// Wipe a user's collection. Returns how many records were removed.
    pub fn reset(&self, user_id: &str) -> usize {
        self.records
            .remove(user_id)
            .map(|(_, records)| records.len())
            .unwrap_or(0)
    }
}
