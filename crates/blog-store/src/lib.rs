//! Blog Storage Layer
//!
//! Implements the BlogStore trait on top of MongoDB, plus an in-process
//! store for development and tests.
//!
//! # Architecture
//!
//! - [`MongoStore`]: one collection of [`BlogDocument`]s, one driver call per
//!   operation, `_id` assigned by the server on insert
//! - [`MemoryStore`]: the same contract held in a `Vec`, insertion ordered
//!
//! # Examples
//!
//! ```no_run
//! use blog_store::MongoStore;
//!
//! # async fn demo() -> Result<(), blog_store::StoreError> {
//! let store = MongoStore::connect("mongodb://localhost:27017", "blog", "post").await?;
//! // Store is now ready for blog operations
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod document;
mod memory;
mod mongo;

pub use document::BlogDocument;
pub use memory::MemoryStore;
pub use mongo::MongoStore;

use thiserror::Error;

/// Default database name
pub const DEFAULT_DATABASE: &str = "blog";

/// Default collection name
pub const DEFAULT_COLLECTION: &str = "post";

/// URI scheme that selects the in-process store instead of MongoDB
pub const MEMORY_URI_SCHEME: &str = "memory://";

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Driver or server error
    #[error("Database error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// The store assigned a key that is not an ObjectId
    #[error("Unexpected inserted key type: {0}")]
    UnexpectedKey(String),

    /// A stored document came back without its `_id`
    #[error("Stored document has no _id")]
    MissingKey,
}

/// Whether `uri` selects the in-process store
pub fn is_memory_uri(uri: &str) -> bool {
    uri.starts_with(MEMORY_URI_SCHEME)
}
