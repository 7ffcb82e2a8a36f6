//! Demo command: one post through its whole lifecycle.
//!
//! Each step hands its result to the next through plain local values, and
//! the first failure ends the run.

use crate::error::Result;
use crate::output::Formatter;
use blog_domain::{Blog, NewBlog};
use blog_sdk::BlogClient;
use std::io::Write;

/// What the demo saw at each step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoOutcome {
    /// Post as created
    pub created: Blog,
    /// Post as read back after creation
    pub read: Blog,
    /// Post after the update
    pub updated: Blog,
    /// Posts listed after the delete
    pub listed: Vec<Blog>,
}

/// Fields of the post the demo creates.
pub fn sample_blog() -> NewBlog {
    NewBlog::new(
        "this is a sample ID",
        "This is a Sample Blog Post",
        "This is some content for the sample blog post.",
    )
}

/// Fields the demo replaces the sample with.
pub fn updated_fields() -> NewBlog {
    NewBlog::new(
        "Updated Author ID",
        "This is an Updated Title",
        "The content was also updated.",
    )
}

/// Execute the demo command.
pub async fn execute_demo<W: Write>(
    client: &BlogClient,
    formatter: &Formatter,
    out: &mut W,
) -> Result<DemoOutcome> {
    let created = client.create_blog(sample_blog()).await?;
    report(out, formatter, "blog has been created:", &created)?;

    let read = client.read_blog(&created.id).await?;
    report(out, formatter, "blog has been read:", &read)?;

    let updated = updated_fields().with_id(read.id);
    client.update_blog(&updated).await?;
    report(out, formatter, "blog has been updated:", &updated)?;

    client.delete_blog(&updated.id).await?;
    report(out, formatter, "blog has been deleted:", &updated)?;

    if !formatter.is_quiet() {
        writeln!(out, "{}", formatter.info("listing blogs:"))?;
    }
    let listed = client.list_blogs().await?;
    writeln!(out, "{}", formatter.format_blogs(&listed)?)?;

    Ok(DemoOutcome {
        created,
        read,
        updated,
        listed,
    })
}

fn report<W: Write>(out: &mut W, formatter: &Formatter, heading: &str, blog: &Blog) -> Result<()> {
    if !formatter.is_quiet() {
        writeln!(out, "{}", formatter.success(heading))?;
    }
    writeln!(out, "{}", formatter.format_blog(blog)?)?;
    Ok(())
}
