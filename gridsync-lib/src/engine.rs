//! Table data engine

use std::sync::Arc;

use chrono::Utc;
use log::debug;
use uuid::Uuid;

use crate::error::Error;
use crate::model::Collection;
use crate::model::Column;
use crate::model::Record;
use crate::model::Row;
use crate::model::fields;
use crate::ops::Batch;
use crate::ops::Op;
use crate::store::Subscription;
use crate::store::TableStore;
use crate::view::TableView;

/// The table data engine.
///
/// Owns the translation from raw store snapshots to the sorted
/// [`TableView`] and translates every mutating operation into exactly one
/// atomic batch against the injected [`TableStore`]. The engine never
/// patches its view locally: a mutation becomes visible only through the
/// next pushed snapshot, so the view is always a state the store actually
/// committed.
///
/// The handle is cheap to clone (`Arc` internally) and can be shared across
/// tasks.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use gridsync_lib::TableEngine;
/// use gridsync_lib::store::MemoryStore;
///
/// let engine = TableEngine::builder()
///     .store(Arc::new(MemoryStore::new()))
///     .build();
///
/// let column_id = engine.add_column("Status").await?;
/// let row_id = engine.add_row(vec![]).await?;
/// engine.update_cell(row_id, 0, "open").await?;
/// ```
#[derive(Clone)]
pub struct TableEngine {
    inner: Arc<TableEngineInner>,
}

struct TableEngineInner {
    store: Arc<dyn TableStore>,
    subscription: Subscription,
}

impl TableEngine {
    /// Creates a new builder for constructing an engine.
    pub fn builder() -> TableEngineBuilder<Missing> {
        TableEngineBuilder::new()
    }

    /// Derives the sorted, typed view from the latest delivered snapshot.
    pub fn view(&self) -> TableView {
        TableView::from_state(&self.inner.subscription.state())
    }

    /// Opens a fresh subscription for consumers that await changes.
    pub fn subscribe(&self) -> Subscription {
        self.inner.subscription.clone()
    }

    // =========================================================================
    // Column operations
    // =========================================================================

    /// Creates a new column at the end of the column order.
    ///
    /// The new sort key is `max(existing orders) + 1` (or `0` for the first
    /// column). Existing rows are untouched: their cell sequences simply
    /// lack a trailing entry, which reads as the empty string.
    pub async fn add_column(&self, name: impl Into<String>) -> Result<Uuid, Error> {
        let view = self.view();
        let column = Column {
            id: Uuid::new_v4(),
            name: name.into(),
            order: view.max_column_order().unwrap_or(-1) + 1,
            created_at: now_millis(),
        };
        let id = column.id;

        let batch = Batch::new().add(Op::create(Collection::Columns, column.into_record()));
        self.transact(batch).await?;
        Ok(id)
    }

    /// Renames a column. No cascade: cell positions are unaffected.
    pub async fn update_column(
        &self,
        column_id: Uuid,
        new_name: impl Into<String>,
    ) -> Result<(), Error> {
        let record = Record::new(column_id).set(fields::NAME, new_name.into());
        let batch = Batch::new().add(Op::update(Collection::Columns, record));
        self.transact(batch).await
    }

    /// Deletes a column and splices its cell out of every row, atomically.
    ///
    /// The column's sorted position determines which cell index is removed;
    /// cells after it shift left. The row rewrites and the column delete
    /// travel in one batch of `rows + 1` operations, so no snapshot can
    /// observe rows misaligned with the surviving columns. Unknown column
    /// ids are a no-op.
    pub async fn delete_column(&self, column_id: Uuid) -> Result<(), Error> {
        let view = self.view();
        let Some(position) = view.column_position(column_id) else {
            debug!("delete_column: column {column_id} no longer exists");
            return Ok(());
        };

        let mut batch = Batch::new();
        for row in &view.rows {
            let mut cells = row.cells.clone();
            if position < cells.len() {
                cells.remove(position);
            }
            batch.push(Op::update(
                Collection::Rows,
                Record::new(row.id).set(fields::CELLS, cells),
            ));
        }
        batch.push(Op::delete(Collection::Columns, column_id));
        self.transact(batch).await
    }

    // =========================================================================
    // Row operations
    // =========================================================================

    /// Creates a new row from the given cells.
    ///
    /// Short sequences are right-padded with empty strings to the current
    /// column count; longer sequences are preserved as-is (the caller may be
    /// racing a column addition).
    pub async fn add_row(&self, mut cells: Vec<String>) -> Result<Uuid, Error> {
        let view = self.view();
        if cells.len() < view.column_count() {
            cells.resize(view.column_count(), String::new());
        }

        let now = now_millis();
        let row = Row {
            id: Uuid::new_v4(),
            cells,
            created_at: now,
            updated_at: now,
        };
        let id = row.id;

        let batch = Batch::new().add(Op::create(Collection::Rows, row.into_record()));
        self.transact(batch).await?;
        Ok(id)
    }

    /// Replaces a row's entire cell sequence and bumps its `updatedAt`.
    pub async fn update_row(&self, row_id: Uuid, cells: Vec<String>) -> Result<(), Error> {
        let record = Record::new(row_id)
            .set(fields::CELLS, cells)
            .set(fields::UPDATED_AT, now_millis());
        let batch = Batch::new().add(Op::update(Collection::Rows, record));
        self.transact(batch).await
    }

    /// Sets a single cell, padding the row's cells with empty strings if the
    /// index lies beyond the current sequence.
    ///
    /// A row deleted by another session between read and write is a benign
    /// race: the operation silently succeeds without mutating anything.
    pub async fn update_cell(
        &self,
        row_id: Uuid,
        column_index: usize,
        value: impl Into<String>,
    ) -> Result<(), Error> {
        let view = self.view();
        let Some(row) = view.row(row_id) else {
            debug!("update_cell: row {row_id} no longer exists");
            return Ok(());
        };

        let mut cells = row.cells.clone();
        if cells.len() <= column_index {
            cells.resize(column_index + 1, String::new());
        }
        cells[column_index] = value.into();

        let record = Record::new(row_id)
            .set(fields::CELLS, cells)
            .set(fields::UPDATED_AT, now_millis());
        let batch = Batch::new().add(Op::update(Collection::Rows, record));
        self.transact(batch).await
    }

    /// Deletes a single row. Unknown ids are a no-op.
    pub async fn delete_row(&self, row_id: Uuid) -> Result<(), Error> {
        self.delete_rows(&[row_id]).await
    }

    /// Deletes a set of rows in one atomic batch.
    ///
    /// An empty set issues no transaction at all; ids that no longer exist
    /// commit as no-ops.
    pub async fn delete_rows(&self, row_ids: &[Uuid]) -> Result<(), Error> {
        if row_ids.is_empty() {
            return Ok(());
        }

        let batch: Batch = row_ids
            .iter()
            .map(|id| Op::delete(Collection::Rows, *id))
            .collect();
        self.transact(batch).await
    }

    async fn transact(&self, batch: Batch) -> Result<(), Error> {
        self.inner.store.transact(batch).await?;
        Ok(())
    }
}

fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`TableEngine`].
///
/// Uses the typestate pattern so the required store is set at compile time.
pub struct TableEngineBuilder<Store> {
    store: Store,
}

impl TableEngineBuilder<Missing> {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self { store: Missing }
    }

    /// Sets the table store the engine mutates and subscribes to.
    pub fn store(self, store: Arc<dyn TableStore>) -> TableEngineBuilder<Set<Arc<dyn TableStore>>> {
        TableEngineBuilder { store: Set(store) }
    }
}

impl Default for TableEngineBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl TableEngineBuilder<Set<Arc<dyn TableStore>>> {
    /// Builds the [`TableEngine`], opening its subscription.
    pub fn build(self) -> TableEngine {
        let store = self.store.0;
        let subscription = store.subscribe();
        TableEngine {
            inner: Arc::new(TableEngineInner {
                store,
                subscription,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::store::MemoryStore;

    fn engine_over(store: Arc<MemoryStore>) -> TableEngine {
        TableEngine::builder().store(store).build()
    }

    #[tokio::test]
    async fn add_column_assigns_next_order() {
        let engine = engine_over(Arc::new(MemoryStore::new()));

        engine.add_column("A").await.unwrap();
        engine.add_column("B").await.unwrap();

        let view = engine.view();
        let orders: Vec<i64> = view.columns.iter().map(|c| c.order).collect();
        assert_eq!(orders, [0, 1]);
    }

    #[tokio::test]
    async fn add_row_pads_to_column_count() {
        let engine = engine_over(Arc::new(MemoryStore::new()));
        engine.add_column("A").await.unwrap();
        engine.add_column("B").await.unwrap();
        engine.add_column("C").await.unwrap();

        let short = engine.add_row(vec!["x".to_string()]).await.unwrap();
        let long = engine
            .add_row(vec!["1".into(), "2".into(), "3".into(), "4".into()])
            .await
            .unwrap();

        let view = engine.view();
        assert_eq!(view.row(short).unwrap().cells, ["x", "", ""]);
        assert_eq!(view.row(long).unwrap().cells, ["1", "2", "3", "4"]);
    }

    #[tokio::test]
    async fn update_cell_pads_through_target_index() {
        let engine = engine_over(Arc::new(MemoryStore::new()));
        let row_id = engine
            .add_row(vec!["a".to_string(), "b".to_string()])
            .await
            .unwrap();

        engine.update_cell(row_id, 5, "x").await.unwrap();

        let view = engine.view();
        assert_eq!(view.row(row_id).unwrap().cells, ["a", "b", "", "", "", "x"]);
    }

    #[tokio::test]
    async fn update_cell_on_missing_row_is_a_noop() {
        let engine = engine_over(Arc::new(MemoryStore::new()));
        engine.add_row(vec![]).await.unwrap();

        engine.update_cell(Uuid::new_v4(), 0, "x").await.unwrap();

        let view = engine.view();
        assert_eq!(view.row_count(), 1);
        assert_eq!(view.rows[0].cells, Vec::<String>::new());
    }

    #[tokio::test]
    async fn delete_rows_with_no_ids_is_a_noop() {
        let engine = engine_over(Arc::new(MemoryStore::new()));
        engine.add_row(vec![]).await.unwrap();

        engine.delete_rows(&[]).await.unwrap();
        engine.delete_row(Uuid::new_v4()).await.unwrap();

        assert_eq!(engine.view().row_count(), 1);
    }

    #[tokio::test]
    async fn delete_column_splices_every_row() {
        let engine = engine_over(Arc::new(MemoryStore::new()));
        engine.add_column("A").await.unwrap();
        let b = engine.add_column("B").await.unwrap();
        engine.add_column("C").await.unwrap();

        let r1 = engine
            .add_row(vec!["a".into(), "b".into(), "c".into()])
            .await
            .unwrap();
        let r2 = engine.add_row(vec!["x".to_string()]).await.unwrap();

        engine.delete_column(b).await.unwrap();

        let view = engine.view();
        assert_eq!(view.column_count(), 2);
        let names: Vec<&str> = view.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["A", "C"]);
        assert_eq!(view.row(r1).unwrap().cells, ["a", "c"]);
        assert_eq!(view.row(r2).unwrap().cells, ["x", ""]);
    }

    #[tokio::test]
    async fn delete_unknown_column_is_a_noop() {
        let engine = engine_over(Arc::new(MemoryStore::new()));
        engine.add_column("A").await.unwrap();
        let row = engine.add_row(vec!["a".to_string()]).await.unwrap();

        engine.delete_column(Uuid::new_v4()).await.unwrap();

        let view = engine.view();
        assert_eq!(view.column_count(), 1);
        assert_eq!(view.row(row).unwrap().cells, ["a"]);
    }
}
