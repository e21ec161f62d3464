//! Server-streaming plumbing for `readTodosStream`.
//!
//! - [`coordinator`] - Feeds a todo snapshot into the gRPC response channel.

pub mod coordinator;
