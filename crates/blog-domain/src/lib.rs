//! Blog Domain Layer
//!
//! Core model for the blog service. Every other crate in the workspace depends
//! on the types and the storage trait defined here.
//!
//! ## Key Concepts
//!
//! - **Blog**: a post with an author, a title and a content body
//! - **BlogId**: the store-assigned identifier, immutable once created
//! - **NewBlog**: an entity that has not been stored yet and has no identifier
//! - **BlogStore**: the boundary to the document store
//!
//! Store implementations live in `blog-store`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod blog;
pub mod traits;

// Re-exports for convenience
pub use blog::{Blog, BlogId, InvalidBlogId, NewBlog};
pub use traits::{BlogStore, BlogStream};
