//! Error types for the blog service.
//!
//! [`ServiceError`] covers per-request failures and converts into a
//! `tonic::Status` with the matching code. Internal failures never carry
//! store detail to the caller; that detail is logged where it happens.
//!
//! [`ServerError`] covers server bootstrap: TLS material, binding, transport.

use crate::conversions::ConversionError;
use std::path::PathBuf;
use tonic::Status;

/// Message sent to callers for any internal failure
pub const INTERNAL_MESSAGE: &str = "internal server error";

/// Message sent to callers when no post matches the identifier
pub const NOT_FOUND_MESSAGE: &str = "blog post with given ID is not found";

/// Message sent to callers for a malformed identifier
pub const INVALID_ID_MESSAGE: &str = "given ID is invalid";

/// Per-request failure
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The request could not be mapped to domain types
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] ConversionError),

    /// No post has the requested identifier
    #[error("Blog not found")]
    NotFound,

    /// Store or serialization failure (already logged)
    #[error("Internal error")]
    Internal,
}

impl ServiceError {
    /// Log a store failure and turn it into an internal error
    pub fn store<E: std::error::Error>(operation: &'static str, err: E) -> Self {
        tracing::error!(operation, error = %err, "store operation failed");
        ServiceError::Internal
    }
}

impl From<ServiceError> for Status {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidRequest(ConversionError::InvalidBlogId(_)) => {
                Status::invalid_argument(INVALID_ID_MESSAGE)
            }
            ServiceError::InvalidRequest(e @ ConversionError::MissingField(_)) => {
                Status::invalid_argument(e.to_string())
            }
            ServiceError::NotFound => Status::not_found(NOT_FOUND_MESSAGE),
            ServiceError::Internal => Status::internal(INTERNAL_MESSAGE),
        }
    }
}

/// Server bootstrap failure
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// A TLS certificate or key file could not be read
    #[error("Failed to read TLS file {path}: {source}")]
    TlsFile {
        /// Offending path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The listen address is not a valid socket address
    #[error("Invalid listen address: {0}")]
    Address(#[from] std::net::AddrParseError),

    /// Binding the listener failed
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Reflection service could not be built
    #[error("Reflection setup failed: {0}")]
    Reflection(#[from] tonic_reflection::server::Error),

    /// TLS configuration or serving failed
    #[error("Transport error: {0}")]
    Transport(#[from] tonic::transport::Error),
}
