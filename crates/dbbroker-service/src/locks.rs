//! Per-key async mutual exclusion.
//!
//! Two transitions on the same instance (or binding) id must not
//! interleave their admin steps. [`KeyedLocks`] hands out one async mutex
//! per key and forgets the key once nobody holds or waits for it.
//!
//! The instance and binding services must share one table so that a
//! binding transition excludes deletion of its instance.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type Slot = Arc<AsyncMutex<()>>;

#[derive(Clone, Default)]
pub struct KeyedLocks {
    slots: Arc<Mutex<HashMap<String, Slot>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait until `key` is free and hold it until the guard is dropped.
    pub async fn acquire(&self, key: &str) -> KeyGuard {
        let slot = self.table().entry(key.to_owned()).or_default().clone();
        let guard = slot.clone().lock_owned().await;
        KeyGuard {
            key: key.to_owned(),
            slot,
            guard: Some(guard),
            locks: self.clone(),
        }
    }

    /// Number of keys currently held or waited on.
    pub fn len(&self) -> usize {
        self.table().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn table(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        // The map is left consistent by every critical section.
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Holds one key of a [`KeyedLocks`] table.
pub struct KeyGuard {
    key: String,
    slot: Slot,
    guard: Option<OwnedMutexGuard<()>>,
    locks: KeyedLocks,
}

impl KeyGuard {
    #[cfg(test)]
    fn key(&self) -> &str {
        &self.key
    }
}

/// Key held by every transition that touches instance `id`, including
/// binding transitions on it.
pub(crate) fn instance_key(id: &str) -> String {
    format!("instance/{id}")
}

/// Key held by every transition on binding `id`. Always taken after the
/// instance key.
pub(crate) fn binding_key(id: &str) -> String {
    format!("binding/{id}")
}

impl Drop for KeyGuard {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut slots = self.locks.table();
        // Remaining references: the table entry and `self.slot`.
        if Arc::strong_count(&self.slot) == 2 {
            slots.remove(&self.key);
        }
    }
}
