//! Error types for the gangway adapter.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, backend service, storage, and input
//! validation errors. Backend errors are carried unchanged (status code,
//! error kind, message) so callers can inspect them.

use std::fmt;
use thiserror::Error;

/// The unified error type for gangway operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (invalid credentials, missing or expired session).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Backend service errors (HTTP errors with a backend error body).
    #[error("service error: {0}")]
    Service(#[from] ServiceError),

    /// Identity snapshot storage errors.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation errors (malformed filters, bad pagination, invalid ids).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the backend HTTP status code, if this is a service error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Service(e) => Some(e.status),
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error (including response decoding failures).
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Credentials were rejected by the backend.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No identity snapshot is present; the caller must log in.
    #[error("not authenticated")]
    NotAuthenticated,

    /// The backend rejected the session; the caller must log in again.
    #[error("session expired")]
    SessionExpired,
}

/// Backend service error carrying the original status and error body.
///
/// The status code and the backend's own error `type` string are preserved
/// unchanged so upstream code can match on them.
#[derive(Debug)]
pub struct ServiceError {
    /// HTTP status code.
    pub status: u16,
    /// Backend error type (if present), e.g. `user_unauthorized`.
    pub kind: Option<String>,
    /// Error message from the backend.
    pub message: Option<String>,
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref kind) = self.kind {
            write!(f, " [{}]", kind)?;
        }
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ServiceError {}

impl ServiceError {
    /// Create a new service error.
    pub fn new(status: u16, kind: Option<String>, message: Option<String>) -> Self {
        Self {
            status,
            kind,
            message,
        }
    }

    /// Check if this is an authorization failure (401 or 403).
    pub fn is_auth_error(&self) -> bool {
        self.status == 401 || self.status == 403
    }

    /// Check if this is a not-found response.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

/// Identity snapshot storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem I/O failed.
    #[error("io error: {message}")]
    Io { message: String },

    /// Snapshot serialization or deserialization failed.
    #[error("serialization error: {message}")]
    Serde { message: String },

    /// No platform data directory is available.
    #[error("no data directory available")]
    NoDataDir,
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serde {
            message: err.to_string(),
        }
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid endpoint URL.
    #[error("invalid endpoint '{value}': {reason}")]
    Endpoint { value: String, reason: String },

    /// Invalid database identifier.
    #[error("invalid database id '{value}': {reason}")]
    DatabaseId { value: String, reason: String },

    /// Invalid collection identifier.
    #[error("invalid collection id '{value}': {reason}")]
    CollectionId { value: String, reason: String },

    /// Invalid document identifier.
    #[error("invalid document id '{value}': {reason}")]
    DocumentId { value: String, reason: String },

    /// Malformed filter value.
    #[error("invalid filter '{key}': {reason}")]
    Filter { key: String, reason: String },

    /// Pagination parameters out of range.
    #[error("invalid pagination: {reason}")]
    Pagination { reason: String },

    /// Resource name not present in the resource map.
    #[error("unknown resource '{resource}'")]
    UnknownResource { resource: String },

    /// Malformed backend document.
    #[error("malformed document: {reason}")]
    Document { reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
