//! Atomic operation batches

use crate::error::StoreError;

use super::Operation;

/// Maximum operations the store accepts in one transaction.
pub const MAX_OPERATIONS: usize = 1000;

/// An ordered list of operations applied as one atomic transaction.
///
/// All operations in a batch commit together or not at all; there is no
/// partial application and no reordering. This is what makes cascading
/// mutations safe: a column delete and the rewrite of every row travel in
/// the same batch, so no snapshot can ever observe a half-applied cascade.
#[derive(Debug, Clone, Default)]
pub struct Batch {
    operations: Vec<Operation>,
}

impl Batch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an operation to the batch.
    pub fn add(mut self, op: Operation) -> Self {
        self.operations.push(op);
        self
    }

    /// Adds an operation in place.
    pub fn push(&mut self, op: Operation) {
        self.operations.push(op);
    }

    /// Returns the operations in submission order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Consumes the batch and returns the operations.
    pub fn into_operations(self) -> Vec<Operation> {
        self.operations
    }

    /// Returns the number of operations in the batch.
    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    /// Returns the number of operations in the batch.
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    /// Returns `true` if the batch has no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Validates the batch against the store's transaction size limit.
    pub fn validate(&self) -> Result<(), StoreError> {
        let count = self.operation_count();
        if count > MAX_OPERATIONS {
            return Err(StoreError::BatchTooLarge {
                count,
                max: MAX_OPERATIONS,
            });
        }
        Ok(())
    }
}

impl FromIterator<Operation> for Batch {
    fn from_iter<I: IntoIterator<Item = Operation>>(iter: I) -> Self {
        Self {
            operations: iter.into_iter().collect(),
        }
    }
}
