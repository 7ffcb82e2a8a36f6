//! Client connection settings.

use std::path::PathBuf;
use std::time::Duration;

/// Address of a locally running server
pub const DEFAULT_ENDPOINT: &str = "https://localhost:50051";

/// Name the server certificate is verified against
pub const DEFAULT_TLS_DOMAIN: &str = "localhost";

/// Upper bound on every call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// How to reach the blog service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server URI, `https://` or `http://`
    pub endpoint: String,

    /// PEM certificate used to verify the server. `None` means plaintext.
    pub ca_cert_path: Option<PathBuf>,

    /// Server name checked against the certificate
    pub tls_domain: String,

    /// Per-call deadline
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            ca_cert_path: None,
            tls_domain: DEFAULT_TLS_DOMAIN.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl ClientConfig {
    /// Settings for `endpoint` with default TLS domain and timeout
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Verify the server with the given CA certificate
    pub fn with_ca_cert(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_cert_path = Some(path.into());
        self
    }

    /// Override the expected server name
    pub fn with_tls_domain(mut self, domain: impl Into<String>) -> Self {
        self.tls_domain = domain.into();
        self
    }

    /// Override the per-call deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
