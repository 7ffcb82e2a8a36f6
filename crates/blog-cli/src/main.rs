//! Blog CLI - command-line client for the blog gRPC service.

use blog_cli::{commands, Cli, Formatter};
use blog_sdk::BlogClient;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> blog_cli::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.client_config()?;
    let formatter = Formatter::new(cli.format.into(), !cli.no_color);
    let client = BlogClient::connect(&config).await?;

    let mut stdout = std::io::stdout().lock();
    commands::execute(cli.command.unwrap_or_default(), &client, &formatter, &mut stdout).await
}
