//! Integration tests for the blog gRPC server
//!
//! Each test binds a plaintext server on an ephemeral port, backed by the
//! in-memory store, and talks to it over a real HTTP/2 channel.

use std::net::SocketAddr;
use std::sync::Arc;

use blog_grpc::proto::blog_service_client::BlogServiceClient;
use blog_grpc::proto::{Blog, CreateBlogRequest, ReadBlogRequest};
use blog_grpc::{serve_with_listener, ServerConfig};
use blog_store::MemoryStore;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tonic::transport::Channel;
use tonic_health::pb::health_check_response::ServingStatus;
use tonic_health::pb::health_client::HealthClient;
use tonic_health::pb::HealthCheckRequest;
use tonic_reflection::pb::v1::server_reflection_client::ServerReflectionClient;
use tonic_reflection::pb::v1::server_reflection_request::MessageRequest;
use tonic_reflection::pb::v1::server_reflection_response::MessageResponse;
use tonic_reflection::pb::v1::{ServerReflectionRequest, ServerReflectionResponse};

struct TestServer {
    addr: SocketAddr,
    stop: oneshot::Sender<()>,
    handle: JoinHandle<Result<(), blog_grpc::ServerError>>,
}

async fn spawn_server(config: ServerConfig) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (stop, stopped) = oneshot::channel::<()>();

    let handle = tokio::spawn(serve_with_listener(
        config,
        Arc::new(MemoryStore::new()),
        listener,
        async {
            let _ = stopped.await;
        },
    ));

    TestServer { addr, stop, handle }
}

async fn channel(addr: SocketAddr) -> Channel {
    Channel::from_shared(format!("http://{addr}"))
        .unwrap()
        .connect()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_health_reports_blog_service_serving() {
    let server = spawn_server(ServerConfig::new("127.0.0.1", 0)).await;
    let mut health = HealthClient::new(channel(server.addr).await);

    let response = health
        .check(HealthCheckRequest {
            service: "blog.v1.BlogService".to_string(),
        })
        .await
        .unwrap()
        .into_inner();

    assert_eq!(response.status, ServingStatus::Serving as i32);

    server.stop.send(()).unwrap();
    server.handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_create_and_read_over_transport() {
    let server = spawn_server(ServerConfig::new("127.0.0.1", 0)).await;
    let mut client = BlogServiceClient::new(channel(server.addr).await);

    let blog = Blog {
        id: String::new(),
        author_id: "author".to_string(),
        title: "title".to_string(),
        content: "content".to_string(),
    };

    let id = client
        .create_blog(CreateBlogRequest {
            blog: Some(blog.clone()),
        })
        .await
        .unwrap()
        .into_inner()
        .id;

    let read = client
        .read_blog(ReadBlogRequest { id: id.clone() })
        .await
        .unwrap()
        .into_inner()
        .blog
        .unwrap();

    assert_eq!(read, Blog { id, ..blog });

    server.stop.send(()).unwrap();
    server.handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_shutdown_stops_server() {
    let server = spawn_server(ServerConfig::new("127.0.0.1", 0)).await;

    server.stop.send(()).unwrap();
    let result = server.handle.await.unwrap();

    assert!(result.is_ok());
}

async fn list_services(addr: SocketAddr) -> Result<ServerReflectionResponse, tonic::Status> {
    let mut client = ServerReflectionClient::new(channel(addr).await);
    let request = ServerReflectionRequest {
        host: String::new(),
        message_request: Some(MessageRequest::ListServices(String::new())),
    };

    let mut responses = client
        .server_reflection_info(tokio_stream::iter(vec![request]))
        .await?
        .into_inner();

    match responses.message().await? {
        Some(response) => Ok(response),
        None => Err(tonic::Status::internal("reflection stream closed early")),
    }
}

#[tokio::test]
async fn test_reflection_lists_blog_service_when_enabled() {
    let server = spawn_server(ServerConfig::new("127.0.0.1", 0).with_reflection(true)).await;

    let response = list_services(server.addr).await.unwrap();
    let services = match response.message_response {
        Some(MessageResponse::ListServicesResponse(list)) => list.service,
        other => panic!("expected a service list, got {other:?}"),
    };
    let names: Vec<_> = services.into_iter().map(|s| s.name).collect();
    assert!(names.iter().any(|n| n == "blog.v1.BlogService"), "got {names:?}");

    server.stop.send(()).unwrap();
    server.handle.await.unwrap().unwrap();
}

#[tokio::test]
async fn test_reflection_unimplemented_when_disabled() {
    let server = spawn_server(ServerConfig::new("127.0.0.1", 0)).await;

    let status = list_services(server.addr).await.unwrap_err();
    assert_eq!(status.code(), tonic::Code::Unimplemented);

    server.stop.send(()).unwrap();
    server.handle.await.unwrap().unwrap();
}
