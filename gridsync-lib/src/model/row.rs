//! Row entity

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::Record;
use super::fields;

/// A data row.
///
/// `cells[k]` belongs to the column at sorted position `k`. The sequence may
/// be shorter than the column count (a column was added after this row was
/// written); absent entries read as the empty string and must never be
/// indexed out of bounds — use [`Row::cell`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// Unique identifier, assigned at creation.
    pub id: Uuid,
    /// Cell values, positionally aligned to the sorted column order.
    pub cells: Vec<String>,
    /// Creation time, epoch milliseconds. Fixes display order.
    pub created_at: i64,
    /// Last mutation time, epoch milliseconds.
    pub updated_at: i64,
}

impl Row {
    /// Returns the cell at logical column index `k`, reading absent entries
    /// as the empty string.
    pub fn cell(&self, k: usize) -> &str {
        self.cells.get(k).map(String::as_str).unwrap_or_default()
    }

    /// Decodes a row from a store document, defaulting missing fields.
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.id(),
            cells: record.get_str_array(fields::CELLS).unwrap_or_default(),
            created_at: record.get_i64(fields::CREATED_AT).unwrap_or(0),
            updated_at: record.get_i64(fields::UPDATED_AT).unwrap_or(0),
        }
    }

    /// Encodes this row as a store document.
    pub fn into_record(self) -> Record {
        Record::new(self.id)
            .set(fields::CELLS, self.cells)
            .set(fields::CREATED_AT, self.created_at)
            .set(fields::UPDATED_AT, self.updated_at)
    }
}
