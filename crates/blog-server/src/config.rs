//! Runtime configuration for the `blog-server` binary.
//!
//! Every setting comes from a CLI flag or its environment variable (a `.env`
//! file is loaded first). [`ServerArgs`] is the raw parse; [`Settings`] is the
//! validated form the server runs with.

use std::path::PathBuf;

use blog_grpc::ServerConfig;
use blog_store::{DEFAULT_COLLECTION, DEFAULT_DATABASE};
use clap::Parser;
use thiserror::Error;

/// Runtime mode that turns on gRPC reflection
pub const DEVELOPMENT_ENV: &str = "development";

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required setting present but empty
    #[error("{0} environment variable is not set")]
    Missing(&'static str),

    /// Certificate or key file does not exist
    #[error("error creating server TLS: file not found\ncertificate file: {cert}\nkey file: {key}")]
    TlsFileNotFound {
        /// Certificate path
        cert: String,
        /// Key path
        key: String,
    },

    /// Value out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Command-line and environment settings for the blog server.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "blog-server",
    version,
    about = "gRPC CRUD service for blog posts"
)]
pub struct ServerArgs {
    /// Runtime mode. `development` enables gRPC reflection.
    ///
    /// Environment variable: `APP_ENV`
    #[arg(long, env = "APP_ENV")]
    pub app_env: String,

    /// PEM certificate chain presented to clients.
    ///
    /// Environment variable: `SSL_CERT_FILE`
    #[arg(long, env = "SSL_CERT_FILE")]
    pub cert_file: PathBuf,

    /// PEM private key for the certificate.
    ///
    /// Environment variable: `SSL_KEY_FILE`
    #[arg(long, env = "SSL_KEY_FILE")]
    pub key_file: PathBuf,

    /// Store connection URI. `memory://` selects the in-process store.
    ///
    /// Environment variable: `MONGODB_URI`
    #[arg(long, env = "MONGODB_URI")]
    pub mongodb_uri: String,

    /// Database holding the posts collection.
    ///
    /// Environment variable: `BLOG_DATABASE`
    #[arg(long, env = "BLOG_DATABASE", default_value = DEFAULT_DATABASE)]
    pub database: String,

    /// Collection holding the posts.
    ///
    /// Environment variable: `BLOG_COLLECTION`
    #[arg(long, env = "BLOG_COLLECTION", default_value = DEFAULT_COLLECTION)]
    pub collection: String,

    /// Interface to listen on.
    ///
    /// Environment variable: `SERVER_HOST`
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    ///
    /// Environment variable: `SERVER_PORT`
    #[arg(long, env = "SERVER_PORT", default_value_t = 50051)]
    pub port: u16,

    /// List messages buffered ahead of a slow client.
    ///
    /// Environment variable: `STREAM_BUFFER_SIZE`
    #[arg(long, env = "STREAM_BUFFER_SIZE", default_value_t = 16)]
    pub stream_buffer_size: usize,
}

/// Where the posts live
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    /// Connection URI
    pub uri: String,
    /// Database name
    pub database: String,
    /// Collection name
    pub collection: String,
}

/// Validated server settings
#[derive(Debug, Clone)]
pub struct Settings {
    /// Runtime mode
    pub app_env: String,
    /// Transport settings
    pub server: ServerConfig,
    /// Store settings
    pub store: StoreSettings,
}

impl Settings {
    /// Whether the server runs in development mode
    pub fn is_development(&self) -> bool {
        self.app_env == DEVELOPMENT_ENV
    }
}

impl TryFrom<ServerArgs> for Settings {
    type Error = ConfigError;

    fn try_from(args: ServerArgs) -> Result<Self, Self::Error> {
        if args.app_env.is_empty() {
            return Err(ConfigError::Missing("APP_ENV"));
        }
        if args.mongodb_uri.is_empty() {
            return Err(ConfigError::Missing("MONGODB_URI"));
        }
        if args.cert_file.as_os_str().is_empty() {
            return Err(ConfigError::Missing("SSL_CERT_FILE"));
        }
        if args.key_file.as_os_str().is_empty() {
            return Err(ConfigError::Missing("SSL_KEY_FILE"));
        }
        if !args.cert_file.is_file() || !args.key_file.is_file() {
            return Err(ConfigError::TlsFileNotFound {
                cert: args.cert_file.display().to_string(),
                key: args.key_file.display().to_string(),
            });
        }
        if args.stream_buffer_size == 0 {
            return Err(ConfigError::Invalid(
                "STREAM_BUFFER_SIZE must be greater than 0".to_string(),
            ));
        }

        let mut server =
            ServerConfig::new(args.host, args.port).with_tls(args.cert_file, args.key_file);
        server.stream_buffer_size = args.stream_buffer_size;

        let mut settings = Self {
            app_env: args.app_env,
            server,
            store: StoreSettings {
                uri: args.mongodb_uri,
                database: args.database,
                collection: args.collection,
            },
        };
        settings.server.enable_reflection = settings.is_development();

        Ok(settings)
    }
}
