use crate::{CacheEntry, CacheKey};
use std::collections::HashMap;

/// Index of an entry inside a [`CacheStore`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(usize);

/// Arena-backed, read-only snapshot of collected API responses.
///
/// Entries live in insertion order; lookups go through a key index.
#[derive(Clone, Debug, Default)]
pub struct CacheStore {
    entries: Vec<CacheEntry>,
    index: HashMap<CacheKey, EntryId>,
}

impl CacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, replacing any entry with the same key.
    pub fn insert(&mut self, entry: CacheEntry) -> EntryId {
        if let Some(&id) = self.index.get(&entry.key) {
            self.entries[id.0] = entry;
            return id;
        }
        let id = EntryId(self.entries.len());
        self.index.insert(entry.key.clone(), id);
        self.entries.push(entry);
        id
    }

    pub fn id_of(&self, key: &CacheKey) -> Option<EntryId> {
        self.index.get(key).copied()
    }

    pub fn get(&self, key: &CacheKey) -> Option<&CacheEntry> {
        self.id_of(key).map(|id| &self.entries[id.0])
    }

    pub fn entry(&self, id: EntryId) -> Option<&CacheEntry> {
        self.entries.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CacheEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
