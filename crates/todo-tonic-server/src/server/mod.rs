//! Server internals.
//!
//! - [`config`] - CLI/env configuration.
//! - [`service`] - gRPC handler and shutdown lifecycle.
//! - [`store`] - The in-memory todo list.
//! - [`streaming`] - Feeding `readTodosStream` responses.
//! - [`telemetry`] - Logging, tracing and metrics.

pub mod config;
pub mod service;
pub mod store;
pub mod streaming;
pub mod telemetry;

use service::handler::TodoService;
use todo_tonic_core::proto::todo_server::TodoServer;
use tonic::codec::CompressionEncoding;

/// Wraps `service` in the generated tonic server, accepting and sending every
/// compression encoding the server supports.
pub fn todo_server(service: TodoService) -> TodoServer<TodoService> {
    TodoServer::new(service)
        .send_compressed(CompressionEncoding::Zstd)
        .send_compressed(CompressionEncoding::Gzip)
        .send_compressed(CompressionEncoding::Deflate)
        .accept_compressed(CompressionEncoding::Zstd)
        .accept_compressed(CompressionEncoding::Gzip)
        .accept_compressed(CompressionEncoding::Deflate)
}
