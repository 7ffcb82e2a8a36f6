//! Error types for the blog SDK.

use std::path::PathBuf;
use thiserror::Error;

/// SDK operation errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// The server rejected the request as malformed
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// No post has the requested identifier
    #[error("Not found: {0}")]
    NotFound(String),

    /// The call did not complete within the configured timeout
    #[error("request timeout")]
    Timeout,

    /// Connection error (network, DNS, TLS handshake)
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Any other gRPC failure
    #[error("gRPC error: {0}")]
    GrpcError(String),

    /// The server answered with something the client cannot use
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Endpoint URI could not be parsed
    #[error("Invalid endpoint {endpoint}: {reason}")]
    InvalidEndpoint {
        /// Offending URI
        endpoint: String,
        /// Parser message
        reason: String,
    },

    /// The CA certificate could not be read
    #[error("error reading CA certificate {path}: {source}")]
    CaCertificate {
        /// Offending path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl SdkError {
    /// Whether the failure was a missed deadline
    pub fn is_timeout(&self) -> bool {
        matches!(self, SdkError::Timeout)
    }
}

impl From<tonic::Status> for SdkError {
    fn from(status: tonic::Status) -> Self {
        use tonic::Code;

        match status.code() {
            Code::InvalidArgument => SdkError::InvalidArgument(status.message().to_string()),
            Code::NotFound => SdkError::NotFound(status.message().to_string()),
            Code::DeadlineExceeded => SdkError::Timeout,
            Code::Unavailable => {
                SdkError::ConnectionError(format!("gRPC unavailable: {}", status.message()))
            }
            _ => SdkError::GrpcError(format!("{}: {}", status.code(), status.message())),
        }
    }
}

impl From<tonic::transport::Error> for SdkError {
    fn from(e: tonic::transport::Error) -> Self {
        SdkError::ConnectionError(error_chain(&e))
    }
}

/// Render an error followed by each of its causes, `: `-separated
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        // Some wrappers repeat their cause in their own message
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
