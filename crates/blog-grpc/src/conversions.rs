//! Type conversions between proto and domain types
//!
//! The only real transformation is the identifier: a hex string on the wire,
//! a `BlogId` in the domain.

use crate::proto;
use blog_domain::{Blog, BlogId, InvalidBlogId, NewBlog};

/// Error type for conversion failures
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Identifier is not a well-formed store key
    #[error(transparent)]
    InvalidBlogId(#[from] InvalidBlogId),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
}

/// Unwrap an optional message field
pub fn require<T>(field: Option<T>, name: &'static str) -> Result<T, ConversionError> {
    field.ok_or(ConversionError::MissingField(name))
}

/// Parse a wire identifier
pub fn blog_id_from_proto(id: &str) -> Result<BlogId, ConversionError> {
    Ok(BlogId::parse(id)?)
}

/// Convert proto Blog to an unsaved domain blog, ignoring its `id`
pub fn new_blog_from_proto(blog: proto::Blog) -> NewBlog {
    NewBlog {
        author_id: blog.author_id,
        title: blog.title,
        content: blog.content,
    }
}

/// Convert an unsaved domain blog to a proto Blog with an empty `id`
pub fn new_blog_to_proto(blog: NewBlog) -> proto::Blog {
    proto::Blog {
        id: String::new(),
        author_id: blog.author_id,
        title: blog.title,
        content: blog.content,
    }
}

/// Convert proto Blog to domain Blog; the `id` must be well-formed
pub fn blog_from_proto(blog: proto::Blog) -> Result<Blog, ConversionError> {
    let id = blog_id_from_proto(&blog.id)?;
    Ok(new_blog_from_proto(blog).with_id(id))
}

/// Convert domain Blog to proto Blog
pub fn blog_to_proto(blog: Blog) -> proto::Blog {
    proto::Blog {
        id: blog.id.to_string(),
        author_id: blog.author_id,
        title: blog.title,
        content: blog.content,
    }
}
