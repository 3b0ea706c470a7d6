use crate::model::CheckSpec;
use std::collections::{BTreeSet, HashMap};

/// Maps resource-change event names to the checks that must be re-run.
///
/// Event names are matched case-insensitively.
#[derive(Clone, Debug, Default)]
pub struct RealtimeTriggerIndex {
    by_event: HashMap<String, BTreeSet<&'static str>>,
    empty: BTreeSet<&'static str>,
}

impl RealtimeTriggerIndex {
    pub fn from_specs<'a>(specs: impl IntoIterator<Item = &'a CheckSpec>) -> Self {
        let mut by_event: HashMap<String, BTreeSet<&'static str>> = HashMap::new();
        for spec in specs {
            for event in spec.realtime_triggers {
                by_event
                    .entry(normalize(event))
                    .or_default()
                    .insert(spec.id);
            }
        }
        Self {
            by_event,
            empty: BTreeSet::new(),
        }
    }

    /// Check ids affected by `event`; unknown events map to the empty set.
    pub fn checks_for(&self, event: &str) -> &BTreeSet<&'static str> {
        self.by_event.get(&normalize(event)).unwrap_or(&self.empty)
    }

    /// Known event names, sorted.
    pub fn events(&self) -> Vec<&str> {
        let mut events: Vec<&str> = self.by_event.keys().map(String::as_str).collect();
        events.sort_unstable();
        events
    }

    pub fn is_empty(&self) -> bool {
        self.by_event.is_empty()
    }
}

fn normalize(event: &str) -> String {
    event.trim().to_ascii_lowercase()
}
