//! Cell edit state machine

use uuid::Uuid;

use crate::TableEngine;
use crate::error::Error;
use crate::view::TableView;

/// The lifecycle of an in-place cell edit.
///
/// At most one cell is ever being edited. `Saving` is `Editing` with a
/// mutation in flight: the draft is carried along so a failed save can hand
/// it back instead of losing the user's input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditState {
    /// No edit in progress.
    #[default]
    Idle,
    /// A cell is being edited locally; no network activity.
    Editing {
        /// The row being edited.
        row_id: Uuid,
        /// The logical column index being edited.
        column_index: usize,
        /// The current draft value.
        draft: String,
    },
    /// The draft is being written to the store.
    Saving {
        /// The row being edited.
        row_id: Uuid,
        /// The logical column index being edited.
        column_index: usize,
        /// The draft value in flight.
        draft: String,
    },
}

impl EditState {
    /// Returns the edit target, if an edit is in progress.
    pub fn target(&self) -> Option<(Uuid, usize)> {
        match self {
            Self::Idle => None,
            Self::Editing {
                row_id,
                column_index,
                ..
            }
            | Self::Saving {
                row_id,
                column_index,
                ..
            } => Some((*row_id, *column_index)),
        }
    }
}

/// Drives the edit lifecycle for a single grid.
///
/// Transitions follow a strict contract:
///
/// - starting a new edit while another cell is `Editing` discards that draft
///   without issuing a mutation (switching cells cancels);
/// - losing focus on the *same* cell commits (commit is the only path that
///   writes);
/// - a failed save returns to `Editing` with the draft retained, never
///   silently dropping typed input;
/// - a vanished target row forces the machine back to `Idle`.
#[derive(Debug, Clone, Default)]
pub struct CellEditor {
    state: EditState,
}

impl CellEditor {
    /// Creates an editor in `Idle`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current state.
    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// Returns `true` if the given cell is the one being edited or saved.
    pub fn is_editing_cell(&self, row_id: Uuid, column_index: usize) -> bool {
        self.state.target() == Some((row_id, column_index))
    }

    /// Returns the current draft, if an edit is in progress.
    pub fn draft(&self) -> Option<&str> {
        match &self.state {
            EditState::Idle => None,
            EditState::Editing { draft, .. } | EditState::Saving { draft, .. } => Some(draft),
        }
    }

    /// Starts editing a cell, seeding the draft from its current value.
    ///
    /// If another cell is `Editing`, its draft is discarded (no mutation is
    /// issued for it). Ignored while a save is in flight, and ignored for
    /// rows not present in the view — such an edit would be discarded by the
    /// next reconciliation anyway.
    pub fn begin(&mut self, view: &TableView, row_id: Uuid, column_index: usize) {
        if matches!(self.state, EditState::Saving { .. }) {
            return;
        }
        if view.row(row_id).is_none() {
            return;
        }
        self.state = EditState::Editing {
            row_id,
            column_index,
            draft: view.cell_value(row_id, column_index).to_string(),
        };
    }

    /// Replaces the draft with the latest keystroke state. `Editing` only.
    pub fn set_draft(&mut self, value: impl Into<String>) {
        if let EditState::Editing { draft, .. } = &mut self.state {
            *draft = value.into();
        }
    }

    /// Cancels the current edit, discarding the draft.
    ///
    /// Only an `Editing` draft can be cancelled; an in-flight save cannot be
    /// recalled.
    pub fn cancel(&mut self) {
        if matches!(self.state, EditState::Editing { .. }) {
            self.state = EditState::Idle;
        }
    }

    /// Commits the draft through the engine.
    ///
    /// `Editing -> Saving -> Idle` on success. On failure the machine
    /// returns to `Editing` with the same draft and hands the error back for
    /// user-visible reporting; it does not retry. Does nothing in `Idle` or
    /// `Saving`.
    pub async fn commit(&mut self, engine: &TableEngine) -> Result<(), Error> {
        let EditState::Editing {
            row_id,
            column_index,
            draft,
        } = self.state.clone()
        else {
            return Ok(());
        };

        self.state = EditState::Saving {
            row_id,
            column_index,
            draft: draft.clone(),
        };

        match engine.update_cell(row_id, column_index, draft.clone()).await {
            Ok(()) => {
                self.state = EditState::Idle;
                Ok(())
            }
            Err(error) => {
                self.state = EditState::Editing {
                    row_id,
                    column_index,
                    draft,
                };
                Err(error)
            }
        }
    }

    /// Drops the edit if its row vanished from the view.
    ///
    /// Runs on every snapshot: a row deleted by any session while its cell
    /// is `Editing` or `Saving` forces the machine back to `Idle`.
    pub fn reconcile(&mut self, view: &TableView) {
        if let Some((row_id, _)) = self.state.target()
            && view.row(row_id).is_none()
        {
            self.state = EditState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::MemoryStore;

    async fn engine_with_row() -> (TableEngine, Uuid) {
        let engine = TableEngine::builder()
            .store(Arc::new(MemoryStore::new()))
            .build();
        engine.add_column("A").await.unwrap();
        engine.add_column("B").await.unwrap();
        let row_id = engine
            .add_row(vec!["a".to_string(), "b".to_string()])
            .await
            .unwrap();
        (engine, row_id)
    }

    #[tokio::test]
    async fn begin_seeds_draft_from_current_value() {
        let (engine, row_id) = engine_with_row().await;
        let mut editor = CellEditor::new();

        editor.begin(&engine.view(), row_id, 1);

        assert_eq!(editor.draft(), Some("b"));
        assert!(editor.is_editing_cell(row_id, 1));
    }

    #[tokio::test]
    async fn begin_on_absent_cell_seeds_empty_draft() {
        let (engine, row_id) = engine_with_row().await;
        let mut editor = CellEditor::new();

        editor.begin(&engine.view(), row_id, 7);

        assert_eq!(editor.draft(), Some(""));
    }

    #[tokio::test]
    async fn begin_on_missing_row_stays_idle() {
        let (engine, _) = engine_with_row().await;
        let mut editor = CellEditor::new();

        editor.begin(&engine.view(), Uuid::new_v4(), 0);

        assert_eq!(*editor.state(), EditState::Idle);
    }

    #[tokio::test]
    async fn switching_cells_discards_the_previous_draft() {
        let (engine, row_id) = engine_with_row().await;
        let mut editor = CellEditor::new();

        editor.begin(&engine.view(), row_id, 0);
        editor.set_draft("typed but never committed");
        editor.begin(&engine.view(), row_id, 1);

        assert_eq!(editor.draft(), Some("b"));
        // Nothing was written for the abandoned draft.
        assert_eq!(engine.view().cell_value(row_id, 0), "a");
    }

    #[tokio::test]
    async fn commit_writes_and_returns_to_idle() {
        let (engine, row_id) = engine_with_row().await;
        let mut editor = CellEditor::new();

        editor.begin(&engine.view(), row_id, 0);
        editor.set_draft("edited");
        editor.commit(&engine).await.unwrap();

        assert_eq!(*editor.state(), EditState::Idle);
        assert_eq!(engine.view().cell_value(row_id, 0), "edited");
    }

    #[tokio::test]
    async fn cancel_discards_without_writing() {
        let (engine, row_id) = engine_with_row().await;
        let mut editor = CellEditor::new();

        editor.begin(&engine.view(), row_id, 0);
        editor.set_draft("discarded");
        editor.cancel();

        assert_eq!(*editor.state(), EditState::Idle);
        assert_eq!(engine.view().cell_value(row_id, 0), "a");
    }

    #[tokio::test]
    async fn reconcile_drops_edit_of_vanished_row() {
        let (engine, row_id) = engine_with_row().await;
        let mut editor = CellEditor::new();

        editor.begin(&engine.view(), row_id, 0);
        engine.delete_row(row_id).await.unwrap();
        editor.reconcile(&engine.view());

        assert_eq!(*editor.state(), EditState::Idle);
    }

    #[tokio::test]
    async fn commit_in_idle_is_a_noop() {
        let (engine, _) = engine_with_row().await;
        let mut editor = CellEditor::new();

        editor.commit(&engine).await.unwrap();
        assert_eq!(*editor.state(), EditState::Idle);
    }
}
