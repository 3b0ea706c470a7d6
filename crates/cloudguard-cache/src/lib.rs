//! Cache snapshot access for checks.
//!
//! The snapshot is populated by an external collector before a run and is read-only while
//! checks evaluate. Every successful lookup is recorded so a run can report exactly which
//! entries fed its findings.

#![forbid(unsafe_code)]

mod entry;
mod key;
mod load;
mod source;
mod store;

pub use entry::{CacheEntry, DataError};
pub use key::CacheKey;
pub use source::{SourceRecord, SourceTracker};
pub use store::{CacheStore, EntryId};

/// Look up `key` and record it in `tracker` when present.
///
/// `None` means "not collected yet": nothing is recorded and callers skip silently.
pub fn resolve<'c>(
    cache: &'c CacheStore,
    tracker: &SourceTracker,
    key: &CacheKey,
) -> Option<&'c CacheEntry> {
    let entry = cache.get(key)?;
    tracker.record(key);
    Some(entry)
}
