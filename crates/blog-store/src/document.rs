//! Storage document shape for blog posts.

use crate::StoreError;
use blog_domain::{Blog, NewBlog};
use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Persisted representation of a blog post.
///
/// `_id` is left out of the serialized document when absent so the server
/// assigns one on insert, and so a replace never rewrites it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogDocument {
    /// Store-native key
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    /// Identifier of the author
    pub author_id: String,

    /// Post title
    pub title: String,

    /// Post body
    pub content: String,
}

impl From<NewBlog> for BlogDocument {
    fn from(blog: NewBlog) -> Self {
        Self {
            id: None,
            author_id: blog.author_id,
            title: blog.title,
            content: blog.content,
        }
    }
}

impl TryFrom<BlogDocument> for Blog {
    type Error = StoreError;

    fn try_from(doc: BlogDocument) -> Result<Self, Self::Error> {
        let id = doc.id.ok_or(StoreError::MissingKey)?;
        Ok(Blog {
            id: id.into(),
            author_id: doc.author_id,
            title: doc.title,
            content: doc.content,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bson::{doc, to_document};

    #[test]
    fn test_new_document_omits_id() {
        let doc = to_document(&BlogDocument::from(NewBlog::new("a", "t", "c"))).unwrap();

        assert!(!doc.contains_key("_id"));
        assert_eq!(doc, doc! { "author_id": "a", "title": "t", "content": "c" });
    }

    #[test]
    fn test_document_to_blog() {
        let oid = ObjectId::new();
        let blog = Blog::try_from(BlogDocument {
            id: Some(oid),
            author_id: "a".to_string(),
            title: "t".to_string(),
            content: "c".to_string(),
        })
        .unwrap();

        assert_eq!(blog.id.object_id(), oid);
        assert_eq!(blog.title, "t");
    }

    #[test]
    fn test_document_without_id_is_rejected() {
        let result = Blog::try_from(BlogDocument::from(NewBlog::default()));
        assert!(matches!(result, Err(StoreError::MissingKey)));
    }

    #[test]
    fn test_decode_stored_document() {
        let oid = ObjectId::new();
        let raw = doc! { "_id": oid, "author_id": "a", "content": "c", "title": "t" };

        let decoded: BlogDocument = bson::from_document(raw).unwrap();
        assert_eq!(decoded.id, Some(oid));
        assert_eq!(decoded.content, "c");
    }
}
