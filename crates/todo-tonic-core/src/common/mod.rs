pub mod client;
pub mod error;
pub mod types;

pub use error::{Error, Result};

/// gRPC service and message definitions generated from `proto/todo.proto`.
///
/// ## Service
///
/// - `Todo.createTodo` - Stores a todo and returns it with its assigned id.
/// - `Todo.readTodos` - Returns all todos in one [`TodoItems`] envelope.
/// - `Todo.readTodosStream` - Streams all todos one [`TodoItem`] at a time.
///
/// [`TodoItem`]: crate::proto::TodoItem
/// [`TodoItems`]: crate::proto::TodoItems
pub mod proto {
    tonic::include_proto!("todo_package");

    /// Encoded file descriptor set used to serve gRPC reflection.
    pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("todo_descriptor");
}
