//! Output formatting for the CLI.

use crate::error::Result;
use blog_domain::Blog;
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (IDs only) format
    Quiet,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format a list of posts.
    pub fn format_blogs(&self, blogs: &[Blog]) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_blogs_json(blogs),
            OutputFormat::Table => Ok(self.format_blogs_table(blogs)),
            OutputFormat::Quiet => Ok(Self::format_blogs_quiet(blogs)),
        }
    }

    /// Format a single post.
    pub fn format_blog(&self, blog: &Blog) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&blog_json(blog))?),
            _ => self.format_blogs(std::slice::from_ref(blog)),
        }
    }

    fn format_blogs_json(&self, blogs: &[Blog]) -> Result<String> {
        let values: Vec<serde_json::Value> = blogs.iter().map(blog_json).collect();
        Ok(serde_json::to_string_pretty(&values)?)
    }

    fn format_blogs_table(&self, blogs: &[Blog]) -> String {
        if blogs.is_empty() {
            return self.colorize("No blog posts found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Author", "Title", "Content"]);

        for blog in blogs {
            builder.push_record([
                blog.id.to_string(),
                blog.author_id.clone(),
                blog.title.clone(),
                blog.content.clone(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    fn format_blogs_quiet(blogs: &[Blog]) -> String {
        let ids: Vec<String> = blogs.iter().map(|b| b.id.to_string()).collect();
        ids.join("\n")
    }

    /// Whether step headings should be printed alongside results.
    pub fn is_quiet(&self) -> bool {
        self.format == OutputFormat::Quiet
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn blog_json(blog: &Blog) -> serde_json::Value {
    serde_json::json!({
        "id": blog.id.to_string(),
        "author_id": blog.author_id,
        "title": blog.title,
        "content": blog.content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use blog_domain::{BlogId, NewBlog};

    fn create_test_blog() -> Blog {
        NewBlog::new("alice", "Hello", "First post").with_id(BlogId::generate())
    }

    #[test]
    fn test_json_format() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let blog = create_test_blog();

        let output = formatter.format_blog(&blog).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["id"], blog.id.to_string());
        assert_eq!(value["author_id"], "alice");
    }

    #[test]
    fn test_json_list_is_array() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = formatter.format_blogs(&[create_test_blog(), create_test_blog()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_table_format() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let blog = create_test_blog();

        let output = formatter.format_blog(&blog).unwrap();
        assert!(output.contains("Title"));
        assert!(output.contains(&blog.id.to_string()));
        assert!(output.contains("First post"));
    }

    #[test]
    fn test_empty_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.format_blogs(&[]).unwrap(), "No blog posts found.");
    }

    #[test]
    fn test_quiet_format() {
        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let blogs = vec![create_test_blog(), create_test_blog()];

        let output = formatter.format_blogs(&blogs).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines, vec![blogs[0].id.to_string(), blogs[1].id.to_string()]);
    }

    #[test]
    fn test_no_color() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        assert_eq!(formatter.success("done"), "✓ done");
    }
}
