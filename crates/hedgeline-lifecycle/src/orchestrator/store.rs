//! Policy store with per-policy write locks
//!
//! Records live in a `DashMap`. Each policy id also gets its own async mutex;
//! a transition holds it from first read to final write, so create and settle
//! on the same policy never interleave while distinct policies proceed in
//! parallel. Records are replaced whole, never edited in place.
//!
//! A lock entry lives only while someone holds or waits on it. The last
//! [`PolicyGuard`] to drop removes it under the map's shard lock, so a
//! concurrent [`PolicyStore::lock`] either sees the old entry or inserts a
//! fresh one.

use super::state::{PolicyRecord, PolicyState};
use dashmap::DashMap;
use hedgeline_common::{PolicyId, Result};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// In-memory policy records
#[derive(Default)]
pub struct PolicyStore {
    records: DashMap<PolicyId, PolicyRecord>,
    locks: DashMap<PolicyId, Arc<Mutex<()>>>,
}

impl PolicyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the single-writer lock for `id`
    pub async fn lock(&self, id: PolicyId) -> PolicyGuard<'_> {
        let lock = self
            .locks
            .entry(id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        PolicyGuard {
            id,
            locks: &self.locks,
            guard: Some(lock.lock_owned().await),
        }
    }

    /// Lock entries currently held or awaited
    pub fn lock_count(&self) -> usize {
        self.locks.len()
    }

    pub fn get(&self, id: PolicyId) -> Option<PolicyRecord> {
        self.records.get(&id).map(|record| record.clone())
    }

    pub fn contains(&self, id: PolicyId) -> bool {
        self.records.contains_key(&id)
    }

    /// Write a record; callers must hold the policy's lock
    pub(crate) fn commit(&self, record: PolicyRecord) {
        self.records.insert(record.id, record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Ids of policies currently in `state`
    pub fn ids_in_state(&self, state: PolicyState) -> Vec<PolicyId> {
        let mut ids: Vec<PolicyId> = self
            .records
            .iter()
            .filter(|entry| entry.state == state)
            .map(|entry| *entry.key())
            .collect();
        ids.sort();
        ids
    }

    /// Serialize every record, ordered by id
    pub fn to_json(&self) -> Result<String> {
        let mut records: Vec<PolicyRecord> =
            self.records.iter().map(|entry| entry.value().clone()).collect();
        records.sort_by_key(|record| record.id);
        Ok(serde_json::to_string(&records)?)
    }

    /// Rebuild a store from [`PolicyStore::to_json`] output
    pub fn from_json(json: &str) -> Result<Self> {
        let records: Vec<PolicyRecord> = serde_json::from_str(json)?;
        let store = Self::new();
        for record in records {
            store.records.insert(record.id, record);
        }
        Ok(store)
    }
}

/// Holds a policy's write lock; the entry is dropped with its last user
pub struct PolicyGuard<'a> {
    id: PolicyId,
    locks: &'a DashMap<PolicyId, Arc<Mutex<()>>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for PolicyGuard<'_> {
    fn drop(&mut self) {
        // Release the mutex first so its Arc no longer counts
        self.guard.take();
        self.locks
            .remove_if(&self.id, |_, lock| Arc::strong_count(lock) == 1);
    }
}
