//! gRPC server configuration and lifecycle management
//!
//! Handles server initialization, TLS setup, health reporting, optional
//! reflection and graceful shutdown.

use std::future::Future;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use blog_domain::BlogStore;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::{Identity, Server, ServerTlsConfig};

use crate::error::ServerError;
use crate::proto::blog_service_server::BlogServiceServer;
use crate::proto::FILE_DESCRIPTOR_SET;
use crate::service::{BlogServiceImpl, DEFAULT_STREAM_BUFFER_SIZE};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server listen address
    pub addr: String,

    /// Server port
    pub port: u16,

    /// Enable TLS
    pub enable_tls: bool,

    /// TLS certificate path
    pub tls_cert_path: Option<PathBuf>,

    /// TLS key path
    pub tls_key_path: Option<PathBuf>,

    /// Register the gRPC reflection service
    pub enable_reflection: bool,

    /// Messages buffered per list stream
    pub stream_buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0".to_string(),
            port: 50051,
            enable_tls: false,
            tls_cert_path: None,
            tls_key_path: None,
            enable_reflection: false,
            stream_buffer_size: DEFAULT_STREAM_BUFFER_SIZE,
        }
    }
}

impl ServerConfig {
    /// Create a new server configuration
    pub fn new(addr: impl Into<String>, port: u16) -> Self {
        Self {
            addr: addr.into(),
            port,
            ..Default::default()
        }
    }

    /// Enable TLS with certificate paths
    pub fn with_tls(mut self, cert_path: impl Into<PathBuf>, key_path: impl Into<PathBuf>) -> Self {
        self.enable_tls = true;
        self.tls_cert_path = Some(cert_path.into());
        self.tls_key_path = Some(key_path.into());
        self
    }

    /// Enable or disable the reflection service
    pub fn with_reflection(mut self, enabled: bool) -> Self {
        self.enable_reflection = enabled;
        self
    }

    /// Get the full server address
    pub fn full_address(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }

    /// Read the certificate and key, if TLS is enabled
    ///
    /// # Errors
    /// Returns [`ServerError::TlsFile`] naming the path that could not be read
    pub fn load_tls(&self) -> Result<Option<ServerTlsConfig>, ServerError> {
        if !self.enable_tls {
            return Ok(None);
        }

        let cert = read_pem(self.tls_cert_path.as_deref())?;
        let key = read_pem(self.tls_key_path.as_deref())?;

        Ok(Some(
            ServerTlsConfig::new().identity(Identity::from_pem(cert, key)),
        ))
    }
}

fn read_pem(path: Option<&Path>) -> Result<Vec<u8>, ServerError> {
    let path = path.unwrap_or_else(|| Path::new(""));
    std::fs::read(path).map_err(|source| ServerError::TlsFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Bind the configured address and serve until `shutdown` resolves
///
/// # Errors
/// Returns error if TLS material cannot be loaded, the address cannot be
/// bound, or the transport fails
pub async fn start_server<S, F>(
    config: ServerConfig,
    store: Arc<S>,
    shutdown: F,
) -> Result<(), ServerError>
where
    S: BlogStore + 'static,
    F: Future<Output = ()> + Send,
{
    let addr: SocketAddr = config.full_address().parse()?;
    let listener = TcpListener::bind(addr).await?;

    serve_with_listener(config, store, listener, shutdown).await
}

/// Serve on an already bound listener until `shutdown` resolves
///
/// Health status is flipped to not-serving before the transport stops.
pub async fn serve_with_listener<S, F>(
    config: ServerConfig,
    store: Arc<S>,
    listener: TcpListener,
    shutdown: F,
) -> Result<(), ServerError>
where
    S: BlogStore + 'static,
    F: Future<Output = ()> + Send,
{
    let local_addr = listener.local_addr()?;

    let (mut health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter
        .set_serving::<BlogServiceServer<BlogServiceImpl<S>>>()
        .await;

    let reflection = if config.enable_reflection {
        Some(
            tonic_reflection::server::Builder::configure()
                .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
                .build_v1()?,
        )
    } else {
        None
    };

    let service = BlogServiceImpl::new(store).with_stream_buffer_size(config.stream_buffer_size);

    let mut builder = Server::builder();
    if let Some(tls) = config.load_tls()? {
        builder = builder.tls_config(tls)?;
    }

    tracing::info!(
        addr = %local_addr,
        tls = config.enable_tls,
        reflection = config.enable_reflection,
        "blog gRPC server starting"
    );

    let shutdown = async move {
        shutdown.await;
        tracing::info!("shutdown requested, stopping server");
        health_reporter
            .set_not_serving::<BlogServiceServer<BlogServiceImpl<S>>>()
            .await;
    };

    builder
        .add_service(health_service)
        .add_optional_service(reflection)
        .add_service(BlogServiceServer::new(service))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await?;

    tracing::info!("blog gRPC server stopped");

    Ok(())
}
