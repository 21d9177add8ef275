//! Name-keyed cache of parsed agents.
//!
//! There is no implicit invalidation: entries stay until evicted or cleared.

use super::loader::ParsedAgent;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
pub struct AgentCache {
    entries: RwLock<HashMap<String, Arc<ParsedAgent>>>,
}

impl AgentCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<Arc<ParsedAgent>> {
        self.entries.read().get(name).cloned()
    }

    /// Insert, replacing any previous entry for the name.
    pub fn put(&self, name: &str, agent: Arc<ParsedAgent>) {
        self.entries.write().insert(name.to_string(), agent);
    }

    pub fn evict(&self, name: &str) -> Option<Arc<ParsedAgent>> {
        self.entries.write().remove(name)
    }

    /// Remove every entry, returning how many were dropped.
    pub fn clear(&self) -> usize {
        let mut entries = self.entries.write();
        let count = entries.len();
        entries.clear();
        count
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cached names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read().keys().cloned().collect();
        names.sort();
        names
    }
}
