//! Sorted, typed view over a raw snapshot

use uuid::Uuid;

use crate::error::StoreError;
use crate::model::Column;
use crate::model::Row;
use crate::store::StoreState;

/// The table as it renders: typed, sorted, and safe to index.
///
/// A view is a pure function of the last delivered [`StoreState`]. Columns
/// are sorted ascending by `(order, id)` and rows ascending by
/// `(created_at, id)`, regardless of the order the store returned them, so
/// every session derives the same positional layout — which is what makes
/// index-based cell addressing coherent across sessions.
#[derive(Debug, Clone, Default)]
pub struct TableView {
    /// Columns in render order.
    pub columns: Vec<Column>,
    /// Rows in render order.
    pub rows: Vec<Row>,
    /// `true` until the subscription delivers its first snapshot.
    pub is_loading: bool,
    /// The latest subscription error, if any.
    pub error: Option<StoreError>,
}

impl TableView {
    /// Derives the sorted view from a delivered store state.
    pub fn from_state(state: &StoreState) -> Self {
        let (mut columns, mut rows) = match &state.data {
            Some(snapshot) => (
                snapshot.columns.iter().map(Column::from_record).collect::<Vec<_>>(),
                snapshot.rows.iter().map(Row::from_record).collect::<Vec<_>>(),
            ),
            None => (Vec::new(), Vec::new()),
        };

        columns.sort_by(|a, b| a.order.cmp(&b.order).then(a.id.cmp(&b.id)));
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));

        Self {
            columns,
            rows,
            is_loading: state.is_loading,
            error: state.error.clone(),
        }
    }

    /// Returns the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Returns the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the row with the given id, if it exists.
    pub fn row(&self, id: Uuid) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }

    /// Returns the sorted position of the column with the given id.
    pub fn column_position(&self, id: Uuid) -> Option<usize> {
        self.columns.iter().position(|c| c.id == id)
    }

    /// Returns the cell value at `(row_id, column_index)`.
    ///
    /// Reads as the empty string when the row is gone or the index is past
    /// the row's cell sequence.
    pub fn cell_value(&self, row_id: Uuid, column_index: usize) -> &str {
        self.row(row_id).map(|r| r.cell(column_index)).unwrap_or_default()
    }

    /// Returns the highest column `order`, or `None` for an empty column set.
    pub fn max_column_order(&self) -> Option<i64> {
        self.columns.iter().map(|c| c.order).max()
    }
}
