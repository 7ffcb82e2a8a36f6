//! Blog Server
//!
//! Wires configuration, logging and the chosen store into the blog gRPC
//! service and runs it until the process is asked to stop.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod shutdown;

use std::future::Future;
use std::sync::Arc;

use anyhow::Context;
use blog_grpc::start_server;
use blog_store::{is_memory_uri, MemoryStore, MongoStore};
use tracing_subscriber::EnvFilter;

pub use config::{ConfigError, ServerArgs, Settings, StoreSettings};
pub use shutdown::shutdown_signal;

/// Install the global `tracing` subscriber
///
/// `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Open the configured store and serve until `shutdown` resolves
///
/// # Errors
/// Returns error if the store is unreachable or the server fails to start
pub async fn run<F>(settings: Settings, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send,
{
    tracing::info!(
        app_env = %settings.app_env,
        database = %settings.store.database,
        collection = %settings.store.collection,
        "starting blog server"
    );

    if is_memory_uri(&settings.store.uri) {
        tracing::warn!("using in-memory store, posts will not survive a restart");
        start_server(settings.server, Arc::new(MemoryStore::new()), shutdown).await?;
        return Ok(());
    }

    let store = MongoStore::connect(
        &settings.store.uri,
        &settings.store.database,
        &settings.store.collection,
    )
    .await
    .context("error connecting to MongoDB")?;

    let served = start_server(settings.server, Arc::new(store.clone()), shutdown).await;

    store.shutdown().await;
    tracing::info!("MongoDB connection closed");

    served?;
    Ok(())
}
