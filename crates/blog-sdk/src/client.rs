//! Blog client implementation.

use std::future::Future;
use std::time::Duration;

use blog_domain::{Blog, BlogId, NewBlog};
use blog_grpc::conversions::{blog_from_proto, blog_to_proto, new_blog_to_proto, require};
use blog_grpc::proto::{
    blog_service_client::BlogServiceClient, CreateBlogRequest, DeleteBlogRequest,
    ListBlogResponse, ReadBlogRequest, UpdateBlogRequest,
};
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use tonic::transport::{Certificate, Channel, ClientTlsConfig, Endpoint};
use tonic::{Request, Response, Status};

use crate::config::ClientConfig;
use crate::error::SdkError;

/// Blog SDK client
///
/// Cheap to clone; clones share one HTTP/2 connection.
#[derive(Debug, Clone)]
pub struct BlogClient {
    inner: BlogServiceClient<Channel>,
    timeout: Duration,
}

impl BlogClient {
    /// Open a connection described by `config`
    ///
    /// TLS is used when a CA certificate is configured.
    pub async fn connect(config: &ClientConfig) -> Result<Self, SdkError> {
        let mut endpoint = Endpoint::from_shared(config.endpoint.clone())
            .map_err(|e| SdkError::InvalidEndpoint {
                endpoint: config.endpoint.clone(),
                reason: e.to_string(),
            })?
            .connect_timeout(config.timeout);

        if let Some(path) = &config.ca_cert_path {
            let pem = tokio::fs::read(path)
                .await
                .map_err(|source| SdkError::CaCertificate {
                    path: path.clone(),
                    source,
                })?;
            let tls = ClientTlsConfig::new()
                .ca_certificate(Certificate::from_pem(pem))
                .domain_name(config.tls_domain.clone());
            endpoint = endpoint.tls_config(tls)?;
        }

        let channel = endpoint.connect().await?;
        tracing::debug!(endpoint = %config.endpoint, "connected to blog service");

        Ok(Self::from_channel(channel, config.timeout))
    }

    /// Wrap an existing channel
    pub fn from_channel(channel: Channel, timeout: Duration) -> Self {
        Self {
            inner: BlogServiceClient::new(channel),
            timeout,
        }
    }

    /// Store a new post and return it with its assigned identifier
    pub async fn create_blog(&self, blog: NewBlog) -> Result<Blog, SdkError> {
        let mut client = self.inner.clone();
        let request = self.request(CreateBlogRequest {
            blog: Some(new_blog_to_proto(blog.clone())),
        });

        let response = self.deadline(client.create_blog(request)).await?;
        let id = BlogId::parse(&response.id)
            .map_err(|e| SdkError::InvalidResponse(e.to_string()))?;

        Ok(blog.with_id(id))
    }

    /// Fetch one post
    pub async fn read_blog(&self, id: &BlogId) -> Result<Blog, SdkError> {
        let mut client = self.inner.clone();
        let request = self.request(ReadBlogRequest { id: id.to_string() });

        let response = self.deadline(client.read_blog(request)).await?;
        decode(response.blog)
    }

    /// Replace every field of an existing post
    pub async fn update_blog(&self, blog: &Blog) -> Result<(), SdkError> {
        let mut client = self.inner.clone();
        let request = self.request(UpdateBlogRequest {
            blog: Some(blog_to_proto(blog.clone())),
        });

        self.deadline(client.update_blog(request)).await
    }

    /// Remove a post
    pub async fn delete_blog(&self, id: &BlogId) -> Result<(), SdkError> {
        let mut client = self.inner.clone();
        let request = self.request(DeleteBlogRequest { id: id.to_string() });

        self.deadline(client.delete_blog(request)).await
    }

    /// Open the list stream
    ///
    /// Only opening the stream is bounded by the timeout; items arrive as the
    /// server produces them.
    pub async fn stream_blogs(
        &self,
    ) -> Result<BoxStream<'static, Result<Blog, SdkError>>, SdkError> {
        let mut client = self.inner.clone();
        let request = self.request(());

        let stream = self.deadline(client.list_blog(request)).await?;

        Ok(stream
            .map(|item| item.map_err(SdkError::from).and_then(decode_list_item))
            .boxed())
    }

    /// Collect every post, in store order
    ///
    /// The whole stream must finish within the timeout.
    pub async fn list_blogs(&self) -> Result<Vec<Blog>, SdkError> {
        tokio::time::timeout(self.timeout, self.collect_blogs())
            .await
            .map_err(|_| SdkError::Timeout)?
    }

    async fn collect_blogs(&self) -> Result<Vec<Blog>, SdkError> {
        self.stream_blogs().await?.try_collect().await
    }

    fn request<T>(&self, message: T) -> Request<T> {
        let mut request = Request::new(message);
        request.set_timeout(self.timeout);
        request
    }

    async fn deadline<T, F>(&self, call: F) -> Result<T, SdkError>
    where
        F: Future<Output = Result<Response<T>, Status>>,
    {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => Ok(result?.into_inner()),
            Err(_) => Err(SdkError::Timeout),
        }
    }
}

fn decode(blog: Option<blog_grpc::proto::Blog>) -> Result<Blog, SdkError> {
    require(blog, "blog")
        .and_then(blog_from_proto)
        .map_err(|e| SdkError::InvalidResponse(e.to_string()))
}

fn decode_list_item(item: ListBlogResponse) -> Result<Blog, SdkError> {
    decode(item.blog)
}
