//! Error types for the remote API boundary.

use thiserror::Error;

/// Misuse of the gateway by the client itself, never a network outcome.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum CallerError {
    #[error("no session token; log in first")]
    MissingToken,
    #[error("session changed while the request was in flight")]
    StaleSession,
}

/// Typed outcome of a failed remote call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ApiError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("server error ({status})")]
    Server { status: u16 },
    #[error("server unreachable: {0}")]
    NetworkUnreachable(String),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error(transparent)]
    Caller(#[from] CallerError),
}

impl ApiError {
    /// True for errors that would repeat for every call in the same session.
    #[must_use]
    pub fn is_session_fatal(&self) -> bool {
        matches!(self, Self::Unauthorized | Self::Caller(_))
    }
}

/// Errors raised while building an `ApiConfig`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid api url: {raw}")]
    InvalidUrl { raw: String },
    #[error("invalid timeout seconds: {raw}")]
    InvalidTimeout { raw: String },
}
