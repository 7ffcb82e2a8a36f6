//! MongoDB-backed implementation of BlogStore.

use crate::{BlogDocument, StoreError};
use async_trait::async_trait;
use blog_domain::{Blog, BlogId, BlogStore, BlogStream, NewBlog};
use bson::{doc, Document};
use futures::{StreamExt, TryStreamExt};
use mongodb::{Client, Collection};

/// MongoDB implementation of BlogStore
///
/// Holds a driver `Client`, which pools connections internally and is safe to
/// share between concurrent requests, so no extra locking is needed.
#[derive(Clone)]
pub struct MongoStore {
    client: Client,
    collection: Collection<BlogDocument>,
}

impl MongoStore {
    /// Connect to `uri` and verify the server answers a ping
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        client.database(database).run_command(doc! { "ping": 1 }).await?;
        tracing::info!(database, collection, "connected to MongoDB");
        Ok(Self::from_client(client, database, collection))
    }

    /// Wrap an existing driver client
    pub fn from_client(client: Client, database: &str, collection: &str) -> Self {
        let collection = client.database(database).collection(collection);
        Self { client, collection }
    }

    /// Close the driver's connection pools
    pub async fn shutdown(self) {
        self.client.shutdown().await;
    }

    fn by_id(id: BlogId) -> Document {
        doc! { "_id": id.object_id() }
    }
}

#[async_trait]
impl BlogStore for MongoStore {
    type Error = StoreError;

    async fn insert_blog(&self, blog: NewBlog) -> Result<BlogId, Self::Error> {
        let result = self.collection.insert_one(BlogDocument::from(blog)).await?;

        result
            .inserted_id
            .as_object_id()
            .map(BlogId::from)
            .ok_or_else(|| StoreError::UnexpectedKey(format!("{:?}", result.inserted_id)))
    }

    async fn find_blog(&self, id: BlogId) -> Result<Option<Blog>, Self::Error> {
        self.collection
            .find_one(Self::by_id(id))
            .await?
            .map(Blog::try_from)
            .transpose()
    }

    async fn replace_blog(&self, blog: Blog) -> Result<bool, Self::Error> {
        let result = self
            .collection
            .replace_one(Self::by_id(blog.id), BlogDocument::from(blog.fields()))
            .await?;

        Ok(result.matched_count > 0)
    }

    async fn delete_blog(&self, id: BlogId) -> Result<bool, Self::Error> {
        let result = self.collection.delete_one(Self::by_id(id)).await?;
        Ok(result.deleted_count > 0)
    }

    async fn list_blogs(&self) -> Result<BlogStream<Self::Error>, Self::Error> {
        let cursor = self.collection.find(doc! {}).await?;

        Ok(cursor
            .map_err(StoreError::from)
            .and_then(|doc| futures::future::ready(Blog::try_from(doc)))
            .boxed())
    }
}
