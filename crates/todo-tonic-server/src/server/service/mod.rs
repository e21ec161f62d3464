//! gRPC service implementation and request lifecycle.
//!
//! ## Structure
//!
//! - [`handler`] - gRPC service entry point (`TodoService`).
//! - [`lifecycle`] - Admission control and graceful shutdown.

pub mod handler;
pub mod lifecycle;
