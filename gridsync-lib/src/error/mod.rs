//! Error types

mod auth;
mod store;

pub use auth::*;
pub use store::*;

/// Top-level error for engine operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    /// The remote store rejected or lost a transaction.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Authentication collaborator error.
    #[error(transparent)]
    Auth(#[from] AuthError),
}
