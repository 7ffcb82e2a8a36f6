//! gRPC service implementation
//!
//! Implements the BlogService trait generated from proto definitions. Each
//! handler validates its input, performs exactly one store call and maps the
//! outcome to a response or a status.

use std::pin::Pin;
use std::sync::Arc;

use blog_domain::BlogStore;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::{wrappers::ReceiverStream, Stream};
use tonic::{Request, Response, Status};
use tracing::Instrument;

use crate::conversions::{
    blog_from_proto, blog_id_from_proto, blog_to_proto, new_blog_from_proto, require,
};
use crate::error::ServiceError;
use crate::proto::blog_service_server::BlogService;
use crate::proto::*;

/// Default capacity of the channel between the store cursor and a list stream
pub const DEFAULT_STREAM_BUFFER_SIZE: usize = 16;

/// Implementation of the BlogService
pub struct BlogServiceImpl<S: BlogStore> {
    store: Arc<S>,
    stream_buffer_size: usize,
}

impl<S: BlogStore> BlogServiceImpl<S> {
    /// Create a new service instance
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            stream_buffer_size: DEFAULT_STREAM_BUFFER_SIZE,
        }
    }

    /// Set how many list messages may be buffered ahead of the client
    pub fn with_stream_buffer_size(mut self, size: usize) -> Self {
        self.stream_buffer_size = size.max(1);
        self
    }
}

#[tonic::async_trait]
impl<S> BlogService for BlogServiceImpl<S>
where
    S: BlogStore + 'static,
{
    type ListBlogStream = Pin<Box<dyn Stream<Item = Result<ListBlogResponse, Status>> + Send>>;

    #[tracing::instrument(skip_all)]
    async fn create_blog(
        &self,
        request: Request<CreateBlogRequest>,
    ) -> Result<Response<CreateBlogResponse>, Status> {
        // An absent message stores an empty post
        let blog = request.into_inner().blog.unwrap_or_default();

        let id = self
            .store
            .insert_blog(new_blog_from_proto(blog))
            .await
            .map_err(|e| ServiceError::store("create", e))?;

        tracing::debug!(%id, "blog created");

        Ok(Response::new(CreateBlogResponse { id: id.to_string() }))
    }

    #[tracing::instrument(skip_all, fields(id = %request.get_ref().id))]
    async fn read_blog(
        &self,
        request: Request<ReadBlogRequest>,
    ) -> Result<Response<ReadBlogResponse>, Status> {
        let id = blog_id_from_proto(&request.get_ref().id).map_err(ServiceError::from)?;

        let blog = self
            .store
            .find_blog(id)
            .await
            .map_err(|e| ServiceError::store("read", e))?
            .ok_or(ServiceError::NotFound)?;

        Ok(Response::new(ReadBlogResponse {
            blog: Some(blog_to_proto(blog)),
        }))
    }

    #[tracing::instrument(skip_all)]
    async fn update_blog(
        &self,
        request: Request<UpdateBlogRequest>,
    ) -> Result<Response<()>, Status> {
        let blog = require(request.into_inner().blog, "blog")
            .and_then(blog_from_proto)
            .map_err(ServiceError::from)?;
        let id = blog.id;

        let matched = self
            .store
            .replace_blog(blog)
            .await
            .map_err(|e| ServiceError::store("update", e))?;

        if !matched {
            return Err(ServiceError::NotFound.into());
        }

        tracing::debug!(%id, "blog replaced");

        Ok(Response::new(()))
    }

    #[tracing::instrument(skip_all, fields(id = %request.get_ref().id))]
    async fn delete_blog(
        &self,
        request: Request<DeleteBlogRequest>,
    ) -> Result<Response<()>, Status> {
        let id = blog_id_from_proto(&request.get_ref().id).map_err(ServiceError::from)?;

        let deleted = self
            .store
            .delete_blog(id)
            .await
            .map_err(|e| ServiceError::store("delete", e))?;

        if !deleted {
            return Err(ServiceError::NotFound.into());
        }

        Ok(Response::new(()))
    }

    #[tracing::instrument(skip_all)]
    async fn list_blog(
        &self,
        _request: Request<()>,
    ) -> Result<Response<Self::ListBlogStream>, Status> {
        let mut blogs = self
            .store
            .list_blogs()
            .await
            .map_err(|e| ServiceError::store("list", e))?;

        let (tx, rx) = mpsc::channel::<Result<ListBlogResponse, Status>>(self.stream_buffer_size);

        let pump = async move {
            let mut sent = 0usize;
            while let Some(item) = blogs.next().await {
                let (message, fatal) = match item {
                    Ok(blog) => (
                        Ok(ListBlogResponse {
                            blog: Some(blog_to_proto(blog)),
                        }),
                        false,
                    ),
                    Err(e) => (Err(Status::from(ServiceError::store("list", e))), true),
                };

                // A closed receiver means the client went away
                if tx.send(message).await.is_err() {
                    tracing::warn!(sent, "client disconnected before list completed");
                    return;
                }
                if fatal {
                    return;
                }
                sent += 1;
            }
            tracing::debug!(sent, "list stream completed");
        };

        tokio::spawn(pump.instrument(tracing::info_span!("list_stream")));

        Ok(Response::new(Box::pin(ReceiverStream::new(rx))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::Blog as WireBlog;
    use async_trait::async_trait;
    use blog_domain::{Blog, BlogId, BlogStream, NewBlog};
    use blog_store::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tonic::Code;

    /// Store that counts calls and fails every one of them
    #[derive(Default)]
    struct FailingStore {
        calls: AtomicUsize,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("disk on fire at /var/lib/mongo")]
    struct Boom;

    impl FailingStore {
        fn hit(&self) -> Result<(), Boom> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(Boom)
        }
    }

    #[async_trait]
    impl BlogStore for FailingStore {
        type Error = Boom;

        async fn insert_blog(&self, _blog: NewBlog) -> Result<BlogId, Boom> {
            self.hit().map(|_| BlogId::generate())
        }

        async fn find_blog(&self, _id: BlogId) -> Result<Option<Blog>, Boom> {
            self.hit().map(|_| None)
        }

        async fn replace_blog(&self, _blog: Blog) -> Result<bool, Boom> {
            self.hit().map(|_| false)
        }

        async fn delete_blog(&self, _id: BlogId) -> Result<bool, Boom> {
            self.hit().map(|_| false)
        }

        async fn list_blogs(&self) -> Result<BlogStream<Boom>, Boom> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            // Enumeration starts fine, then breaks after one document
            let first = NewBlog::new("a", "t", "c").with_id(BlogId::generate());
            Ok(futures::stream::iter(vec![Ok(first), Err(Boom)]).boxed())
        }
    }

    fn wire(id: &str, title: &str) -> WireBlog {
        WireBlog {
            id: id.to_string(),
            author_id: "author".to_string(),
            title: title.to_string(),
            content: "content".to_string(),
        }
    }

    fn memory_service() -> BlogServiceImpl<MemoryStore> {
        BlogServiceImpl::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_create_then_read() {
        let service = memory_service();

        let created = service
            .create_blog(Request::new(CreateBlogRequest {
                blog: Some(wire("", "hello")),
            }))
            .await
            .unwrap()
            .into_inner();
        assert!(!created.id.is_empty());

        let read = service
            .read_blog(Request::new(ReadBlogRequest { id: created.id.clone() }))
            .await
            .unwrap()
            .into_inner()
            .blog
            .unwrap();
        assert_eq!(read, wire(&created.id, "hello"));
    }

    #[tokio::test]
    async fn test_create_without_blog_stores_empty_post() {
        let service = memory_service();
        let created = service
            .create_blog(Request::new(CreateBlogRequest { blog: None }))
            .await
            .unwrap()
            .into_inner();

        let read = service
            .read_blog(Request::new(ReadBlogRequest { id: created.id.clone() }))
            .await
            .unwrap()
            .into_inner()
            .blog
            .unwrap();
        assert_eq!(
            read,
            WireBlog {
                id: created.id,
                ..Default::default()
            }
        );
    }

    #[tokio::test]
    async fn test_update_requires_blog() {
        let service = memory_service();
        let status = service
            .update_blog(Request::new(UpdateBlogRequest { blog: None }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_malformed_id_never_reaches_store() {
        let store = Arc::new(FailingStore::default());
        let service = BlogServiceImpl::new(Arc::clone(&store));

        let read = service
            .read_blog(Request::new(ReadBlogRequest { id: "bad".into() }))
            .await
            .unwrap_err();
        let update = service
            .update_blog(Request::new(UpdateBlogRequest {
                blog: Some(wire("bad", "x")),
            }))
            .await
            .unwrap_err();
        let delete = service
            .delete_blog(Request::new(DeleteBlogRequest { id: "bad".into() }))
            .await
            .unwrap_err();

        for status in [read, update, delete] {
            assert_eq!(status.code(), Code::InvalidArgument);
        }
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_absent_id_is_not_found() {
        let service = memory_service();
        let missing = BlogId::generate().to_string();

        let read = service
            .read_blog(Request::new(ReadBlogRequest { id: missing.clone() }))
            .await
            .unwrap_err();
        let update = service
            .update_blog(Request::new(UpdateBlogRequest {
                blog: Some(wire(&missing, "x")),
            }))
            .await
            .unwrap_err();
        let delete = service
            .delete_blog(Request::new(DeleteBlogRequest { id: missing }))
            .await
            .unwrap_err();

        for status in [read, update, delete] {
            assert_eq!(status.code(), Code::NotFound);
        }
    }

    #[tokio::test]
    async fn test_store_failures_are_internal_and_generic() {
        let service = BlogServiceImpl::new(Arc::new(FailingStore::default()));

        let create = service
            .create_blog(Request::new(CreateBlogRequest {
                blog: Some(wire("", "x")),
            }))
            .await
            .unwrap_err();
        let read = service
            .read_blog(Request::new(ReadBlogRequest {
                id: BlogId::generate().to_string(),
            }))
            .await
            .unwrap_err();

        for status in [create, read] {
            assert_eq!(status.code(), Code::Internal);
            assert!(!status.message().contains("disk on fire"));
        }
    }

    #[tokio::test]
    async fn test_list_stops_after_enumeration_error() {
        let service = BlogServiceImpl::new(Arc::new(FailingStore::default()));

        let items: Vec<_> = service
            .list_blog(Request::new(()))
            .await
            .unwrap()
            .into_inner()
            .collect()
            .await;

        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert_eq!(items[1].as_ref().unwrap_err().code(), Code::Internal);
    }

    #[tokio::test]
    async fn test_list_streams_every_blog() {
        let store = Arc::new(MemoryStore::new());
        for i in 0..3 {
            store
                .insert_blog(NewBlog::new("a", format!("post {i}"), "c"))
                .await
                .unwrap();
        }
        let service = BlogServiceImpl::new(store).with_stream_buffer_size(1);

        let titles: Vec<String> = service
            .list_blog(Request::new(()))
            .await
            .unwrap()
            .into_inner()
            .map(|r| r.unwrap().blog.unwrap().title)
            .collect()
            .await;

        assert_eq!(titles, vec!["post 0", "post 1", "post 2"]);
    }
}
