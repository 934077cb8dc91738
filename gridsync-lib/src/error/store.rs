//! Store error types

/// Errors surfaced by the remote table store.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    /// The store rejected a transaction. Nothing in the batch was applied.
    #[error("transaction rejected: {message}")]
    Rejected {
        /// Human-readable rejection message.
        message: String,
        /// Structured error body, if the store provided one.
        detail: Option<RejectionDetail>,
    },

    /// The store connection is gone and no further snapshots will arrive.
    #[error("store closed")]
    Closed,

    /// The batch exceeds the store's transaction size limit.
    #[error("batch of {count} operations exceeds the maximum of {max}")]
    BatchTooLarge {
        /// Number of operations in the offending batch.
        count: usize,
        /// Maximum operations per transaction.
        max: usize,
    },
}

impl StoreError {
    /// Creates a rejection with just a message.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
            detail: None,
        }
    }

    /// Creates a rejection carrying a structured error body.
    pub fn rejected_with_detail(message: impl Into<String>, detail: RejectionDetail) -> Self {
        Self::Rejected {
            message: message.into(),
            detail: Some(detail),
        }
    }

    /// Returns the structured rejection body, if any.
    pub fn detail(&self) -> Option<&RejectionDetail> {
        match self {
            Self::Rejected { detail, .. } => detail.as_ref(),
            _ => None,
        }
    }
}

/// Structured error body attached to a rejected transaction.
///
/// Stores that return machine-readable failures put the user-facing text in
/// `message` and an optional stable identifier in `code`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectionDetail {
    /// Stable error code, if the store assigns one.
    pub code: Option<String>,
    /// Human-readable error message from the store body.
    pub message: String,
}

impl RejectionDetail {
    /// Creates a detail with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    /// Creates a detail with a code and message.
    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for RejectionDetail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "[{}] {}", code, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}
