//! Blog module - the single entity served by this system

use bson::oid::ObjectId;
use std::fmt;
use std::str::FromStr;

/// Returned when a string is not a well-formed blog identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("given ID is invalid: {input:?}")]
pub struct InvalidBlogId {
    /// The rejected input
    pub input: String,
}

/// Unique identifier for a blog post, assigned by the store on insert.
///
/// Wraps the store-native 12-byte ObjectId. The textual form is 24 lowercase
/// hex characters, which is also what travels over the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BlogId(ObjectId);

impl BlogId {
    /// Generate a fresh identifier.
    ///
    /// Only in-process stores need this; a real document store assigns its own.
    pub fn generate() -> Self {
        Self(ObjectId::new())
    }

    /// Parse an identifier from its hex form
    ///
    /// # Examples
    ///
    /// ```
    /// use blog_domain::BlogId;
    ///
    /// let id = BlogId::parse("65a1f0c2e4b0a1b2c3d4e5f6").unwrap();
    /// assert_eq!(id.to_string(), "65a1f0c2e4b0a1b2c3d4e5f6");
    /// assert!(BlogId::parse("not-an-id").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, InvalidBlogId> {
        ObjectId::parse_str(s).map(Self).map_err(|_| InvalidBlogId {
            input: s.to_string(),
        })
    }

    /// The underlying store key
    pub fn object_id(&self) -> ObjectId {
        self.0
    }
}

impl From<ObjectId> for BlogId {
    fn from(oid: ObjectId) -> Self {
        Self(oid)
    }
}

impl FromStr for BlogId {
    type Err = InvalidBlogId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for BlogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

/// A blog post that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewBlog {
    /// Identifier of the author
    pub author_id: String,

    /// Post title
    pub title: String,

    /// Post body
    pub content: String,
}

impl NewBlog {
    /// Create a new unsaved blog post
    pub fn new(
        author_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            author_id: author_id.into(),
            title: title.into(),
            content: content.into(),
        }
    }

    /// Attach a store-assigned identifier
    pub fn with_id(self, id: BlogId) -> Blog {
        Blog {
            id,
            author_id: self.author_id,
            title: self.title,
            content: self.content,
        }
    }
}

/// A stored blog post.
///
/// Updates replace every mutable field at once; the identifier never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blog {
    /// Store-assigned identifier
    pub id: BlogId,

    /// Identifier of the author
    pub author_id: String,

    /// Post title
    pub title: String,

    /// Post body
    pub content: String,
}

impl Blog {
    /// The mutable part of the post, without its identifier
    pub fn fields(&self) -> NewBlog {
        NewBlog {
            author_id: self.author_id.clone(),
            title: self.title.clone(),
            content: self.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blog_id_display_and_parse() {
        let id = BlogId::generate();
        let id_str = id.to_string();

        assert_eq!(id_str.len(), 24);
        assert_eq!(BlogId::parse(&id_str).unwrap(), id);
    }

    #[test]
    fn test_blog_id_invalid_string() {
        assert!(BlogId::parse("").is_err());
        assert!(BlogId::parse("not-a-valid-id").is_err());
        // right length, not hex
        assert!(BlogId::parse("zzzzzzzzzzzzzzzzzzzzzzzz").is_err());
        // hex, one char short
        assert!(BlogId::parse("65a1f0c2e4b0a1b2c3d4e5f").is_err());
    }

    #[test]
    fn test_invalid_id_keeps_input() {
        let err = BlogId::parse("abc").unwrap_err();
        assert_eq!(err.input, "abc");
    }

    #[test]
    fn test_new_blog_with_id() {
        let id = BlogId::generate();
        let blog = NewBlog::new("author", "title", "content").with_id(id);

        assert_eq!(blog.id, id);
        assert_eq!(blog.fields(), NewBlog::new("author", "title", "content"));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = BlogId::generate();
        let b = BlogId::generate();
        assert_ne!(a, b);
    }
}
