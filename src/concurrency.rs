//! Per-agent-name locking
//!
//! Loads and reloads of the same agent name are serialized so that a reload
//! cannot interleave with a concurrent load and leave a stale entry behind.
//! Different names proceed independently.

use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;

/// Lock registry keyed by agent name.
pub struct AgentLockManager {
    locks: RwLock<HashMap<String, Arc<Mutex<()>>>>,
}

impl AgentLockManager {
    pub fn new() -> Self {
        Self {
            locks: RwLock::new(HashMap::new()),
        }
    }

    /// Get or create the lock for a name.
    pub fn get_lock(&self, name: &str) -> Arc<Mutex<()>> {
        {
            let map = self.locks.read();
            if let Some(lock) = map.get(name) {
                return lock.clone();
            }
        }

        let mut map = self.locks.write();
        // Another caller may have inserted it between the two guards.
        map.entry(name.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop locks nobody currently holds a handle to.
    pub fn prune(&self) -> usize {
        let mut map = self.locks.write();
        let before = map.len();
        map.retain(|_, lock| Arc::strong_count(lock) > 1);
        before - map.len()
    }

    pub fn len(&self) -> usize {
        self.locks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AgentLockManager {
    fn default() -> Self {
        Self::new()
    }
}
