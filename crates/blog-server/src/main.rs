//! Blog Server
//!
//! Serves the blog gRPC API over TLS, backed by MongoDB.

use blog_server::{init_tracing, run, shutdown_signal, ServerArgs, Settings};
use clap::Parser;

#[tokio::main]
async fn main() {
    if let Err(e) = start().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn start() -> anyhow::Result<()> {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let settings = Settings::try_from(ServerArgs::parse())?;
    init_tracing();

    run(settings, shutdown_signal()).await
}
