//! Connection helper shared by the client binary, tests and benchmarks.

use crate::{Error, Result, proto::todo_client::TodoClient};
use tonic::transport::{Channel, Endpoint};

/// Connects to a todo server at `endpoint` (e.g. `http://127.0.0.1:3000`).
///
/// # Errors
///
/// - [`Error::InvalidEndpoint`] if `endpoint` is not a valid URI.
/// - [`Error::Connect`] if the connection cannot be established.
pub async fn connect(endpoint: &str) -> Result<TodoClient<Channel>> {
    let target = Endpoint::from_shared(endpoint.to_string()).map_err(|e| {
        Error::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        }
    })?;

    let channel = target.connect().await.map_err(|e| Error::Connect {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })?;

    Ok(TodoClient::new(channel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_malformed_endpoints() {
        let err = connect("not a uri").await.unwrap_err();
        assert!(matches!(err, Error::InvalidEndpoint { .. }));
    }

    #[tokio::test]
    async fn reports_unreachable_servers() {
        // Port 1 is reserved (tcpmux) and never served in test environments.
        let err = connect("http://127.0.0.1:1").await.unwrap_err();
        assert!(matches!(err, Error::Connect { .. }));
    }
}
