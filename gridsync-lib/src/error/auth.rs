//! Auth collaborator error types

/// Errors reported by the authentication collaborator.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AuthError {
    /// The submitted one-time code was not accepted.
    #[error("invalid code")]
    InvalidCode,

    /// The one-time code expired before it was verified.
    #[error("code expired")]
    CodeExpired,

    /// Requesting or verifying a code failed upstream.
    #[error("auth request failed: {message}")]
    RequestFailed {
        /// Human-readable failure message.
        message: String,
    },

    /// An operation that requires a session was invoked without one.
    #[error("not authenticated")]
    NotAuthenticated,
}

impl AuthError {
    /// Creates a request failure with the given message.
    pub fn request_failed(message: impl Into<String>) -> Self {
        Self::RequestFailed {
            message: message.into(),
        }
    }
}
