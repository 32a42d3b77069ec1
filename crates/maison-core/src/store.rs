//! Record storage abstraction.
//!
//! `MaisonStore` is the only path through which records are read or written.
//! Records are never deleted, so the key set only grows.

use std::collections::HashMap;

use crate::types::{AccountKey, Maison};

/// Partial map from account to record.
pub trait MaisonStore {
    /// Record for `key`, if any.
    fn get(&self, key: &AccountKey) -> Option<&Maison>;

    /// Insert or replace the record for `key`.
    fn put(&mut self, key: AccountKey, record: Maison);

    /// Whether a record exists for `key`, regardless of its status.
    fn contains(&self, key: &AccountKey) -> bool {
        self.get(key).is_some()
    }

    /// Number of stored records.
    fn len(&self) -> usize;

    /// Whether the store holds no records.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All keys with a record, in unspecified order.
    fn accounts(&self) -> Vec<AccountKey>;
}

/// In-memory store backed by a `HashMap`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: HashMap<AccountKey, Maison>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl MaisonStore for MemoryStore {
    fn get(&self, key: &AccountKey) -> Option<&Maison> {
        self.records.get(key)
    }

    fn put(&mut self, key: AccountKey, record: Maison) {
        self.records.insert(key, record);
    }

    fn contains(&self, key: &AccountKey) -> bool {
        self.records.contains_key(key)
    }

    fn len(&self) -> usize {
        self.records.len()
    }

    fn accounts(&self) -> Vec<AccountKey> {
        self.records.keys().cloned().collect()
    }
}
