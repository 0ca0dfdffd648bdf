use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Identifiers of entries that have already been relayed.
///
/// Stored on disk as a JSON object mapping each id to `true`. Only key
/// membership matters. The set is never pruned.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeenSet {
    entries: BTreeMap<String, bool>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Returns `true` if the id was not already present.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        self.entries.insert(id.into(), true).is_none()
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.entries.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SeenSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}
