//! In-process implementation of BlogStore.

use crate::StoreError;
use async_trait::async_trait;
use blog_domain::{Blog, BlogId, BlogStore, BlogStream, NewBlog};
use futures::StreamExt;
use tokio::sync::RwLock;

/// Insertion-ordered store kept in memory.
///
/// Useful for development (`MONGODB_URI=memory://`) and tests. Contents are
/// lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    blogs: RwLock<Vec<Blog>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored posts
    pub async fn len(&self) -> usize {
        self.blogs.read().await.len()
    }

    /// Whether the store holds no posts
    pub async fn is_empty(&self) -> bool {
        self.blogs.read().await.is_empty()
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    type Error = StoreError;

    async fn insert_blog(&self, blog: NewBlog) -> Result<BlogId, Self::Error> {
        let id = BlogId::generate();
        self.blogs.write().await.push(blog.with_id(id));
        Ok(id)
    }

    async fn find_blog(&self, id: BlogId) -> Result<Option<Blog>, Self::Error> {
        let blogs = self.blogs.read().await;
        Ok(blogs.iter().find(|b| b.id == id).cloned())
    }

    async fn replace_blog(&self, blog: Blog) -> Result<bool, Self::Error> {
        let mut blogs = self.blogs.write().await;
        match blogs.iter_mut().find(|b| b.id == blog.id) {
            Some(existing) => {
                *existing = blog;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_blog(&self, id: BlogId) -> Result<bool, Self::Error> {
        let mut blogs = self.blogs.write().await;
        let before = blogs.len();
        blogs.retain(|b| b.id != id);
        Ok(blogs.len() < before)
    }

    async fn list_blogs(&self) -> Result<BlogStream<Self::Error>, Self::Error> {
        // Snapshot so the stream does not hold the lock while the caller sends
        let snapshot = self.blogs.read().await.clone();
        Ok(futures::stream::iter(snapshot.into_iter().map(Ok)).boxed())
    }
}
