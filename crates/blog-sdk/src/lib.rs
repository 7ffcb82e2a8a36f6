//! Blog Rust SDK
//!
//! Async client for the blog gRPC service. Every call is bounded by the
//! timeout in [`ClientConfig`].
//!
//! # Example
//!
//! ```no_run
//! use blog_domain::NewBlog;
//! use blog_sdk::{BlogClient, ClientConfig};
//!
//! # async fn demo() -> Result<(), blog_sdk::SdkError> {
//! let config = ClientConfig::new("https://localhost:50051").with_ca_cert("ca.crt");
//! let client = BlogClient::connect(&config).await?;
//!
//! let blog = client
//!     .create_blog(NewBlog::new("author", "Title", "Body"))
//!     .await?;
//! let read = client.read_blog(&blog.id).await?;
//! assert_eq!(read, blog);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod config;
mod error;

pub use client::BlogClient;
pub use config::{ClientConfig, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, DEFAULT_TLS_DOMAIN};
pub use error::SdkError;
