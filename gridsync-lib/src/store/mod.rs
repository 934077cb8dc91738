//! Remote table store boundary
//!
//! The engine never talks to a concrete backend. It is handed an
//! `Arc<dyn TableStore>` and consumes two things through it: a continuous
//! subscription that redelivers the full snapshot of both collections on
//! every change, and a transactional mutation endpoint that applies a
//! [`Batch`] all-or-nothing. [`MemoryStore`] is the in-process reference
//! implementation; tests swap in their own.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use futures::Stream;
use tokio::sync::watch;

use crate::error::StoreError;
use crate::model::Record;
use crate::ops::Batch;

/// The complete state of both collections at one point in logical time.
///
/// Snapshots are immutable once delivered: the engine derives views from
/// them and never patches them in place.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    /// Raw column documents, in storage order.
    pub columns: Vec<Record>,
    /// Raw row documents, in storage order.
    pub rows: Vec<Record>,
}

/// One delivery from the subscription.
///
/// `data` is `None` until the first snapshot arrives. `error` carries the
/// most recent subscription failure, if any; a failed subscription keeps the
/// last good `data`.
#[derive(Debug, Clone)]
pub struct StoreState {
    /// The latest confirmed snapshot.
    pub data: Option<Snapshot>,
    /// `true` until the first snapshot (or first error) arrives.
    pub is_loading: bool,
    /// The latest subscription error, if any.
    pub error: Option<StoreError>,
}

impl StoreState {
    /// The initial, not-yet-delivered state.
    pub fn loading() -> Self {
        Self {
            data: None,
            is_loading: true,
            error: None,
        }
    }
}

/// A live subscription to the store.
///
/// Wraps a `watch` receiver: late subscribers immediately observe the latest
/// state, and every committed change is redelivered as a full snapshot.
#[derive(Debug, Clone)]
pub struct Subscription {
    rx: watch::Receiver<StoreState>,
}

impl Subscription {
    /// Creates a subscription from a watch receiver.
    pub fn new(rx: watch::Receiver<StoreState>) -> Self {
        Self { rx }
    }

    /// Returns a clone of the latest delivered state.
    pub fn state(&self) -> StoreState {
        self.rx.borrow().clone()
    }

    /// Waits for the next delivery.
    ///
    /// Returns `false` once the store is gone and no further snapshots will
    /// arrive.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }

    /// Adapts the subscription into a stream of states.
    ///
    /// The stream yields the current state first, then one item per
    /// delivery, and ends when the store is dropped.
    pub fn into_stream(mut self) -> impl Stream<Item = StoreState> {
        async_stream::stream! {
            yield self.state();
            while self.changed().await {
                yield self.state();
            }
        }
    }
}

/// The remote table store, at its interface boundary.
///
/// Implementations must apply each [`Batch`] atomically and then push a
/// fresh snapshot to every subscription. The engine issues no retries; a
/// rejected transaction surfaces to the caller as-is.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Opens a subscription delivering the full current snapshot whenever
    /// either collection changes.
    fn subscribe(&self) -> Subscription;

    /// Applies a batch of operations as one atomic transaction.
    async fn transact(&self, batch: Batch) -> Result<(), StoreError>;
}
