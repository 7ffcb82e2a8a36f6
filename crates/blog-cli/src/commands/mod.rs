//! Command implementations.

pub mod demo;
pub mod posts;

pub use self::demo::{execute_demo, DemoOutcome};
pub use self::posts::{execute_create, execute_delete, execute_list, execute_read, execute_update};

use crate::cli::Command;
use crate::error::Result;
use crate::output::Formatter;
use blog_sdk::BlogClient;
use std::io::Write;

/// Run one command against a connected client, writing results to `out`.
pub async fn execute<W: Write>(
    command: Command,
    client: &BlogClient,
    formatter: &Formatter,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::Demo => execute_demo(client, formatter, out).await.map(|_| ()),
        Command::Create(args) => execute_create(args, client, formatter, out).await,
        Command::Read(args) => execute_read(args, client, formatter, out).await,
        Command::Update(args) => execute_update(args, client, formatter, out).await,
        Command::Delete(args) => execute_delete(args, client, formatter, out).await,
        Command::List => execute_list(client, formatter, out).await,
    }
}
