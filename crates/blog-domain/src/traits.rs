//! Trait definitions for external interactions
//!
//! The storage boundary lives here so the service layer never sees a concrete
//! driver. Infrastructure implementations live in `blog-store`.

use crate::{Blog, BlogId, NewBlog};
use futures::stream::BoxStream;

/// Stream of stored blogs in store enumeration order
pub type BlogStream<E> = BoxStream<'static, Result<Blog, E>>;

/// Trait for storing and retrieving blog posts
///
/// Every method maps to exactly one store operation. Absence is reported in
/// the `Ok` value (`None` or `false`) so callers can tell it apart from a
/// store failure.
///
/// Implementations must be safe to share between concurrent requests.
#[async_trait::async_trait]
pub trait BlogStore: Send + Sync {
    /// Error type for store operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Insert a new post and return the identifier the store assigned
    async fn insert_blog(&self, blog: NewBlog) -> Result<BlogId, Self::Error>;

    /// Get a post by ID
    async fn find_blog(&self, id: BlogId) -> Result<Option<Blog>, Self::Error>;

    /// Replace every mutable field of the post keyed by `blog.id`
    ///
    /// Returns `false` when no post has that identifier.
    async fn replace_blog(&self, blog: Blog) -> Result<bool, Self::Error>;

    /// Delete a post by ID
    ///
    /// Returns `false` when nothing was deleted.
    async fn delete_blog(&self, id: BlogId) -> Result<bool, Self::Error>;

    /// Enumerate every stored post
    async fn list_blogs(&self) -> Result<BlogStream<Self::Error>, Self::Error>;
}
