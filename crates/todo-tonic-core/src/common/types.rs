//! # Shared Todo Types and Constants
//!
//! Types and constants shared by the client and the server so both sides agree
//! on how identifiers are assigned and where the service lives by default.
//!
//! ## Identifiers
//!
//! A todo's identifier is its position in the server's list at creation time:
//! the first todo gets `0`, the next `1`, and so on. The wire type is a
//! protobuf `int32`, so [`next_todo_id`] refuses to hand out an id once the
//! list length no longer fits.

use crate::{Error, Result};

/// The integer type backing a todo identifier on the wire.
pub type TodoId = i32;

/// Identifier a client sends on create before the server has assigned one.
pub const UNASSIGNED_TODO_ID: TodoId = -1;

/// Listen address used by the server by default.
pub const DEFAULT_SERVER_ADDR: &str = "0.0.0.0:3000";

/// Endpoint the client dials by default.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000";

/// Returns the identifier for a todo appended to a list of `len` items.
///
/// # Errors
///
/// Returns [`Error::IdSpaceExhausted`] when `len` does not fit in a
/// [`TodoId`].
pub fn next_todo_id(len: usize) -> Result<TodoId> {
    TodoId::try_from(len).map_err(|_| Error::IdSpaceExhausted { len })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_follow_list_length() {
        assert_eq!(next_todo_id(0), Ok(0));
        assert_eq!(next_todo_id(1), Ok(1));
        assert_eq!(next_todo_id(TodoId::MAX as usize), Ok(TodoId::MAX));
    }

    #[test]
    fn refuses_ids_past_the_wire_type() {
        let len = TodoId::MAX as usize + 1;
        assert_eq!(next_todo_id(len), Err(Error::IdSpaceExhausted { len }));
    }

    #[test]
    fn default_endpoint_dials_the_default_listen_port() {
        let listen: std::net::SocketAddr = DEFAULT_SERVER_ADDR.parse().unwrap();
        let (_, port) = DEFAULT_ENDPOINT.rsplit_once(':').unwrap();
        assert_eq!(port.parse::<u16>().unwrap(), listen.port());
    }
}
