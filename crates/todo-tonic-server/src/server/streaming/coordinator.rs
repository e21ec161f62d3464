use todo_tonic_core::{Error, proto::TodoItem};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tonic::Status;

/// Sends each todo of `items` to the response stream, in order.
///
/// Completion is signalled by dropping `resp_tx` when this returns, which ends
/// the gRPC stream with an `OK` status.
///
/// # Behavior
///
/// - Waits for buffer space when the client reads slower than we send.
/// - Stops with [`Error::RequestCancelled`] if the client goes away.
/// - Stops with [`Error::ServiceShutdown`] once `shutdown` is cancelled, making
///   a best effort to tell the client (the buffer may already be full).
///
/// Returns the number of todos handed to the response stream.
pub async fn feed_todos(
    items: Vec<TodoItem>,
    resp_tx: mpsc::Sender<Result<TodoItem, Status>>,
    shutdown: CancellationToken,
) -> todo_tonic_core::Result<usize> {
    let mut sent = 0;

    for item in items {
        tokio::select! {
            biased;
            () = shutdown.cancelled() => {
                if let Err(e) = resp_tx.try_send(Err(Error::ServiceShutdown.into())) {
                    tracing::debug!("Failed to forward shutdown to client: {e}");
                }
                return Err(Error::ServiceShutdown);
            }
            res = resp_tx.send(Ok(item)) => {
                if res.is_err() {
                    return Err(Error::RequestCancelled);
                }
                sent += 1;
            }
        }
    }

    Ok(sent)
}
