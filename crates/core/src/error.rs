//! Error types for the GameChat domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant, and every error can be
//! folded into one of four [`ErrorKind`]s at the transport boundary.

use thiserror::Error;

/// The top-level error type for all GameChat operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Caller errors ---
    #[error("Invalid request: {0}")]
    Validation(String),

    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Retrieval errors ---
    #[error("Retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    // --- Classification ---
    #[error("Unrecognized classification label: {reply:?}")]
    Classification { reply: String },

    // --- Session storage ---
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// The caller-facing category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller sent something unusable.
    Validation,
    /// A backend (completion, retrieval) failed or misbehaved.
    Service,
    /// A backend exceeded its time bound.
    Timeout,
    /// Anything else. Details stay in the logs.
    Unexpected,
}

impl Error {
    /// Map this error onto the caller-facing taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validation(_) => ErrorKind::Validation,
            Error::Provider(ProviderError::Timeout(_)) => ErrorKind::Timeout,
            Error::Provider(_) | Error::Retrieval(_) | Error::Classification { .. } => {
                ErrorKind::Service
            }
            Error::Session(_) | Error::Config { .. } | Error::Serialization(_) | Error::Internal(_) => {
                ErrorKind::Unexpected
            }
        }
    }
}

// --- Bounded context errors ---

#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider returned no content")]
    EmptyResponse,
}

#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Row source unavailable: {0}")]
    Unavailable(String),

    #[error("Column not found: {0}")]
    UnknownColumn(String),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Session storage failed: {0}")]
    Storage(String),
}
