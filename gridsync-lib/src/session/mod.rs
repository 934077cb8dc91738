//! Per-user session state
//!
//! A session owns what the store never sees: which rows are selected, which
//! page is shown, which cell is mid-edit. All of it is a projection over the
//! engine's confirmed view, re-derived on every snapshot — reconciliation is
//! unconditional, so transient state can never reference an entity the store
//! no longer holds.

mod editor;
mod pager;
mod selection;

pub use editor::*;
pub use pager::*;
pub use selection::*;

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::TableEngine;
use crate::error::Error;
use crate::model::Row;
use crate::store::Subscription;
use crate::view::TableView;

/// One user's live session over a shared table.
///
/// Bundles the engine handle with the transient state and keeps the latter
/// valid against every delivered snapshot. The session is single-task by
/// construction: one loop awaits deliveries, reconciles, then handles the
/// next user action.
///
/// # Example
///
/// ```ignore
/// let mut session = TableSession::new(engine);
/// loop {
///     tokio::select! {
///         open = session.changed() => {
///             if !open { break }
///             render(&session);
///         }
///         action = ui_events.recv() => handle(&mut session, action).await?,
///     }
/// }
/// ```
pub struct TableSession {
    engine: TableEngine,
    subscription: Subscription,
    /// Selected row ids.
    pub selection: Selection,
    /// Pagination window.
    pub pager: Pager,
    /// In-place cell edit state.
    pub editor: CellEditor,
}

impl TableSession {
    /// Creates a session over the given engine with default transient state.
    pub fn new(engine: TableEngine) -> Self {
        let subscription = engine.subscribe();
        Self {
            engine,
            subscription,
            selection: Selection::new(),
            pager: Pager::new(),
            editor: CellEditor::new(),
        }
    }

    /// Returns the engine handle.
    pub fn engine(&self) -> &TableEngine {
        &self.engine
    }

    /// Derives the current sorted view.
    pub fn view(&self) -> TableView {
        self.engine.view()
    }

    /// Re-derives all transient state against the current view.
    ///
    /// Runs on every snapshot, whether or not the change came from this
    /// session, and regardless of whether the triggering mutation succeeded.
    /// Idempotent: reconciling twice with no intervening snapshot changes
    /// nothing.
    pub fn reconcile(&mut self) {
        let view = self.engine.view();
        self.selection.reconcile(&view.rows);
        self.pager.reconcile(view.row_count());
        self.editor.reconcile(&view);
    }

    /// Waits for the next snapshot, then reconciles.
    ///
    /// Returns `false` once the store is gone.
    pub async fn changed(&mut self) -> bool {
        let open = self.subscription.changed().await;
        self.reconcile();
        open
    }

    /// Runs the reconciliation loop until cancelled or the store closes.
    pub async fn drive(&mut self, cancel: &CancellationToken) {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                open = self.changed() => {
                    if !open {
                        break;
                    }
                }
            }
        }
    }

    /// Returns the rows visible on the current page.
    pub fn visible_rows(&self) -> Vec<Row> {
        let view = self.engine.view();
        self.pager.page_slice(&view.rows).to_vec()
    }

    /// Commits the in-progress cell edit, if any.
    ///
    /// On failure the editor stays in `Editing` with the draft retained and
    /// the error is handed back for user-visible reporting.
    pub async fn commit_edit(&mut self) -> Result<(), Error> {
        let engine = self.engine.clone();
        self.editor.commit(&engine).await
    }

    /// Deletes every selected row in one atomic batch.
    ///
    /// An empty selection is a no-op. The selection itself is corrected by
    /// the reconciliation that follows the store's next snapshot.
    pub async fn delete_selected(&mut self) -> Result<(), Error> {
        let ids: Vec<Uuid> = self.selection.ids();
        self.engine.delete_rows(&ids).await
    }
}
