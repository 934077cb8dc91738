//! Create/update/delete operations
//!
//! Operations are the unit the store transacts in. They are built with the
//! [`Op`] helper and grouped into a [`Batch`](super::Batch); a lone operation
//! still travels as a one-element batch.
//!
//! # Example
//!
//! ```
//! use gridsync_lib::model::{Collection, Record};
//! use gridsync_lib::ops::{Batch, Op};
//! use uuid::Uuid;
//!
//! let id = Uuid::new_v4();
//! let batch = Batch::new()
//!     .add(Op::create(Collection::Columns, Record::new(id).set("name", "Status")))
//!     .add(Op::delete(Collection::Rows, Uuid::new_v4()));
//!
//! assert_eq!(batch.operation_count(), 2);
//! ```

use uuid::Uuid;

use crate::model::Collection;
use crate::model::Record;

/// A single mutation against one document in one collection.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Create a new document.
    Create {
        /// Target collection.
        collection: Collection,
        /// The document to create; its id becomes the document id.
        record: Record,
    },

    /// Update fields of an existing document.
    ///
    /// Fields absent from `record` are left untouched. Updating an unknown
    /// id commits as a no-op.
    Update {
        /// Target collection.
        collection: Collection,
        /// Fields to merge; the record's id addresses the document.
        record: Record,
    },

    /// Delete a document. Deleting an unknown id commits as a no-op.
    Delete {
        /// Target collection.
        collection: Collection,
        /// Document id.
        id: Uuid,
    },
}

impl Operation {
    /// Returns the collection this operation targets.
    pub fn collection(&self) -> Collection {
        match self {
            Self::Create { collection, .. }
            | Self::Update { collection, .. }
            | Self::Delete { collection, .. } => *collection,
        }
    }

    /// Returns the id of the document this operation addresses.
    pub fn target_id(&self) -> Uuid {
        match self {
            Self::Create { record, .. } | Self::Update { record, .. } => record.id(),
            Self::Delete { id, .. } => *id,
        }
    }
}

/// Helper for building [`Operation`]s.
pub struct Op;

impl Op {
    /// Builds a Create operation.
    pub fn create(collection: Collection, record: Record) -> Operation {
        Operation::Create { collection, record }
    }

    /// Builds an Update operation.
    pub fn update(collection: Collection, record: Record) -> Operation {
        Operation::Update { collection, record }
    }

    /// Builds a Delete operation.
    pub fn delete(collection: Collection, id: Uuid) -> Operation {
        Operation::Delete { collection, id }
    }
}
