//! Single-operation commands.

use crate::cli::{IdArgs, PostArgs, UpdateArgs};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use blog_domain::{BlogId, NewBlog};
use blog_sdk::BlogClient;
use std::io::Write;

impl From<PostArgs> for NewBlog {
    fn from(args: PostArgs) -> Self {
        NewBlog::new(args.author_id, args.title, args.content)
    }
}

fn parse_id(id: &str) -> Result<BlogId> {
    BlogId::parse(id).map_err(|e| CliError::InvalidInput(e.to_string()))
}

/// Execute the create command.
pub async fn execute_create<W: Write>(
    args: PostArgs,
    client: &BlogClient,
    formatter: &Formatter,
    out: &mut W,
) -> Result<()> {
    let blog = client.create_blog(args.into()).await?;
    writeln!(out, "{}", formatter.format_blog(&blog)?)?;
    Ok(())
}

/// Execute the read command.
pub async fn execute_read<W: Write>(
    args: IdArgs,
    client: &BlogClient,
    formatter: &Formatter,
    out: &mut W,
) -> Result<()> {
    let blog = client.read_blog(&parse_id(&args.id)?).await?;
    writeln!(out, "{}", formatter.format_blog(&blog)?)?;
    Ok(())
}

/// Execute the update command.
pub async fn execute_update<W: Write>(
    args: UpdateArgs,
    client: &BlogClient,
    formatter: &Formatter,
    out: &mut W,
) -> Result<()> {
    let blog = NewBlog::from(args.post).with_id(parse_id(&args.id)?);
    client.update_blog(&blog).await?;
    writeln!(out, "{}", formatter.format_blog(&blog)?)?;
    Ok(())
}

/// Execute the delete command.
pub async fn execute_delete<W: Write>(
    args: IdArgs,
    client: &BlogClient,
    formatter: &Formatter,
    out: &mut W,
) -> Result<()> {
    let id = parse_id(&args.id)?;
    client.delete_blog(&id).await?;
    if formatter.is_quiet() {
        writeln!(out, "{}", id)?;
    } else {
        writeln!(out, "{}", formatter.success(&format!("blog {} has been deleted", id)))?;
    }
    Ok(())
}

/// Execute the list command.
pub async fn execute_list<W: Write>(
    client: &BlogClient,
    formatter: &Formatter,
    out: &mut W,
) -> Result<()> {
    let blogs = client.list_blogs().await?;
    writeln!(out, "{}", formatter.format_blogs(&blogs)?)?;
    Ok(())
}
