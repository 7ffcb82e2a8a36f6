#![warn(missing_docs)]

//! Blog gRPC Service Layer
//!
//! Exposes blog CRUD over gRPC.
//! Implements:
//! - CreateBlog / ReadBlog / UpdateBlog / DeleteBlog as unary calls
//! - ListBlog as a server-streamed enumeration of every stored post
//! - Server bootstrap with TLS, health reporting, optional reflection and
//!   graceful shutdown

// Include generated protobuf code
pub mod proto {
    //! Generated protobuf types and service definitions
    #![allow(missing_docs)]

    tonic::include_proto!("blog.v1");

    /// Encoded descriptor set for the reflection service
    pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("blog_descriptor");
}

pub mod conversions;
pub mod error;
pub mod server;
pub mod service;

pub use error::{ServerError, ServiceError};
pub use server::{serve_with_listener, start_server, ServerConfig};
pub use service::BlogServiceImpl;
