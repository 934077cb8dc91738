//! Column entity

use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use super::Record;
use super::fields;

/// A column definition.
///
/// `order` is a relative sort key: it is not required to be contiguous or
/// unique, only its relative ordering matters. Ties are broken by `id` so
/// every session renders the same column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Unique identifier, assigned at creation.
    pub id: Uuid,
    /// Display label.
    pub name: String,
    /// Numeric sort key.
    pub order: i64,
    /// Creation time, epoch milliseconds.
    pub created_at: i64,
}

impl Column {
    /// Decodes a column from a store document.
    ///
    /// Decoding is lenient: a missing `name` reads as empty, and missing
    /// `order`/`createdAt` read as 0, so documents written by older or
    /// foreign clients still render.
    pub fn from_record(record: &Record) -> Self {
        Self {
            id: record.id(),
            name: record.get_str(fields::NAME).unwrap_or_default().to_string(),
            order: record.get_i64(fields::ORDER).unwrap_or(0),
            created_at: record.get_i64(fields::CREATED_AT).unwrap_or(0),
        }
    }

    /// Encodes this column as a store document.
    pub fn into_record(self) -> Record {
        Record::new(self.id)
            .set(fields::NAME, self.name)
            .set(fields::ORDER, self.order)
            .set(fields::CREATED_AT, self.created_at)
    }
}
