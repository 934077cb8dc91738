//! In-memory table store

use std::sync::Mutex;

use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;
use tokio::sync::watch;
use uuid::Uuid;

use super::Snapshot;
use super::StoreState;
use super::Subscription;
use super::TableStore;
use crate::error::StoreError;
use crate::model::Collection;
use crate::model::Record;
use crate::ops::Batch;
use crate::ops::Operation;

/// An in-process table store backed by concurrent hash maps.
///
/// This is the reference [`TableStore`] implementation: every committed
/// transaction rebuilds the full snapshot and pushes it to all
/// subscriptions, which is exactly the redelivery contract remote backends
/// provide. Data lives only as long as the process.
///
/// # Example
///
/// ```
/// use gridsync_lib::store::MemoryStore;
///
/// let store = MemoryStore::new();
/// let subscription = store.subscribe_state();
/// assert!(subscription.state().data.is_some());
/// ```
#[derive(Debug)]
pub struct MemoryStore {
    columns: DashMap<Uuid, Record>,
    rows: DashMap<Uuid, Record>,
    tx: watch::Sender<StoreState>,
    // Serializes transactions so each published snapshot reflects exactly
    // one committed batch.
    commit_lock: Mutex<()>,
}

impl MemoryStore {
    /// Creates an empty store.
    ///
    /// The store starts with an empty snapshot already delivered: an empty
    /// table is a loaded table.
    pub fn new() -> Self {
        let initial = StoreState {
            data: Some(Snapshot::default()),
            is_loading: false,
            error: None,
        };
        let (tx, _rx) = watch::channel(initial);
        Self {
            columns: DashMap::new(),
            rows: DashMap::new(),
            tx,
            commit_lock: Mutex::new(()),
        }
    }

    /// Opens a subscription without going through the trait object.
    pub fn subscribe_state(&self) -> Subscription {
        Subscription::new(self.tx.subscribe())
    }

    fn collection(&self, collection: Collection) -> &DashMap<Uuid, Record> {
        match collection {
            Collection::Columns => &self.columns,
            Collection::Rows => &self.rows,
        }
    }

    fn apply(&self, op: &Operation) {
        match op {
            Operation::Create { collection, record } => {
                self.collection(*collection).insert(record.id(), record.clone());
            }
            Operation::Update { collection, record } => {
                // Unknown ids are benign races, not upserts.
                match self.collection(*collection).get_mut(&record.id()) {
                    Some(mut existing) => existing.merge(record),
                    None => debug!(
                        "update of unknown {} document {} ignored",
                        collection,
                        record.id()
                    ),
                }
            }
            Operation::Delete { collection, id } => {
                if self.collection(*collection).remove(id).is_none() {
                    debug!("delete of unknown {} document {} ignored", collection, id);
                }
            }
        }
    }

    fn publish(&self) {
        let snapshot = Snapshot {
            columns: self.columns.iter().map(|e| e.value().clone()).collect(),
            rows: self.rows.iter().map(|e| e.value().clone()).collect(),
        };
        debug!(
            "publishing snapshot: {} columns, {} rows",
            snapshot.columns.len(),
            snapshot.rows.len()
        );
        self.tx.send_replace(StoreState {
            data: Some(snapshot),
            is_loading: false,
            error: None,
        });
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TableStore for MemoryStore {
    fn subscribe(&self) -> Subscription {
        self.subscribe_state()
    }

    async fn transact(&self, batch: Batch) -> Result<(), StoreError> {
        batch.validate()?;

        let _guard = self.commit_lock.lock().expect("store commit lock poisoned");
        for op in batch.operations() {
            self.apply(op);
        }
        self.publish();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::Op;

    #[tokio::test]
    async fn publishes_one_snapshot_per_transaction() {
        let store = MemoryStore::new();
        let mut subscription = store.subscribe_state();

        let batch = Batch::new()
            .add(Op::create(
                Collection::Columns,
                Record::new(Uuid::new_v4()).set("name", "A"),
            ))
            .add(Op::create(
                Collection::Columns,
                Record::new(Uuid::new_v4()).set("name", "B"),
            ));
        store.transact(batch).await.unwrap();

        assert!(subscription.changed().await);
        let state = subscription.state();
        assert_eq!(state.data.unwrap().columns.len(), 2);
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn unknown_ids_commit_as_noops() {
        let store = MemoryStore::new();

        let batch = Batch::new()
            .add(Op::update(
                Collection::Rows,
                Record::new(Uuid::new_v4()).set("cells", serde_json::json!(["x"])),
            ))
            .add(Op::delete(Collection::Rows, Uuid::new_v4()));
        store.transact(batch).await.unwrap();

        let state = store.subscribe_state().state();
        assert!(state.data.unwrap().rows.is_empty());
    }

    #[tokio::test]
    async fn oversized_batch_changes_nothing() {
        let store = MemoryStore::new();

        let batch: Batch = (0..=crate::ops::MAX_OPERATIONS)
            .map(|_| {
                Op::create(
                    Collection::Rows,
                    Record::new(Uuid::new_v4()).set("cells", serde_json::json!([])),
                )
            })
            .collect();

        assert!(matches!(
            store.transact(batch).await,
            Err(StoreError::BatchTooLarge { .. })
        ));
        let state = store.subscribe_state().state();
        assert!(state.data.unwrap().rows.is_empty());
    }
}
