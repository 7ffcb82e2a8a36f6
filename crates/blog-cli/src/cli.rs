//! CLI command definitions and argument parsing.

use std::path::PathBuf;
use std::time::Duration;

use blog_sdk::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_TLS_DOMAIN};
use clap::{Args, Parser, Subcommand};

use crate::error::{CliError, Result};
use crate::output::OutputFormat;

/// Blog CLI - create, read, update, delete and list blog posts over gRPC.
#[derive(Debug, Parser)]
#[command(name = "blog-client")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// CA certificate used to verify the server
    #[arg(long, env = "SSL_CERT_FILE", global = true)]
    pub ca_cert: Option<PathBuf>,

    /// Server URI
    #[arg(long, env = "BLOG_ENDPOINT", default_value = DEFAULT_ENDPOINT, global = true)]
    pub endpoint: String,

    /// Server name expected in its certificate
    #[arg(long, env = "BLOG_TLS_DOMAIN", default_value = DEFAULT_TLS_DOMAIN, global = true)]
    pub tls_domain: String,

    /// Per-call timeout in milliseconds
    #[arg(long, env = "BLOG_TIMEOUT_MS", default_value_t = 1000, global = true)]
    pub timeout_ms: u64,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = CliFormat::Table, global = true)]
    pub format: CliFormat,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Cli {
    /// Build SDK connection settings from the parsed arguments
    ///
    /// An `https` endpoint needs a CA certificate.
    pub fn client_config(&self) -> Result<ClientConfig> {
        if self.timeout_ms == 0 {
            return Err(CliError::Config(
                "BLOG_TIMEOUT_MS must be greater than 0".to_string(),
            ));
        }

        let mut config = ClientConfig::new(self.endpoint.clone())
            .with_tls_domain(self.tls_domain.clone())
            .with_timeout(Duration::from_millis(self.timeout_ms));

        match &self.ca_cert {
            Some(path) => config = config.with_ca_cert(path.clone()),
            None if self.endpoint.starts_with("https://") => {
                return Err(CliError::Config(
                    "SSL_CERT_FILE environment variable is not set".to_string(),
                ));
            }
            None => {}
        }

        Ok(config)
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (IDs only)
    Quiet,
}

impl From<CliFormat> for OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => OutputFormat::Table,
            CliFormat::Json => OutputFormat::Json,
            CliFormat::Quiet => OutputFormat::Quiet,
        }
    }
}

/// CLI commands.
#[derive(Debug, Default, Subcommand)]
pub enum Command {
    /// Create, read, update, delete a sample post, then list all posts
    #[default]
    Demo,

    /// Create a post
    Create(PostArgs),

    /// Show a post
    Read(IdArgs),

    /// Replace every field of a post
    Update(UpdateArgs),

    /// Delete a post
    Delete(IdArgs),

    /// List every post
    List,
}

/// Post fields.
#[derive(Debug, Clone, Args)]
pub struct PostArgs {
    /// Author identifier
    #[arg(short, long, default_value = "")]
    pub author_id: String,

    /// Title
    #[arg(short, long, default_value = "")]
    pub title: String,

    /// Body text
    #[arg(short, long, default_value = "")]
    pub content: String,
}

/// Arguments naming one post.
#[derive(Debug, Clone, Args)]
pub struct IdArgs {
    /// Post identifier (24 hex characters)
    pub id: String,
}

/// Arguments for the update command.
#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    /// Post identifier (24 hex characters)
    pub id: String,

    #[command(flatten)]
    pub post: PostArgs,
}
