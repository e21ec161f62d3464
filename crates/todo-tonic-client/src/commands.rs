//! One function per remote operation.

use todo_tonic_core::{
    proto::{TodoItem, VoidNoParam, todo_client::TodoClient},
    types::UNASSIGNED_TODO_ID,
};
use tonic::transport::Channel;

/// Unary `createTodo`. The server assigns the identifier.
#[tracing::instrument(skip(client))]
pub async fn create(client: &mut TodoClient<Channel>, text: String) -> anyhow::Result<TodoItem> {
    let item = client
        .create_todo(TodoItem {
            id: UNASSIGNED_TODO_ID,
            text,
        })
        .await?
        .into_inner();
    tracing::debug!(id = item.id, "Created todo");
    Ok(item)
}

/// `readTodos`: the whole list in a single response.
pub async fn list(client: &mut TodoClient<Channel>) -> anyhow::Result<Vec<TodoItem>> {
    let items = client.read_todos(VoidNoParam {}).await?.into_inner().items;
    tracing::debug!(count = items.len(), "Listed todos");
    Ok(items)
}

/// Server-streaming `readTodosStream`. Calls `on_item` for each todo as it
/// arrives and returns how many were received once the server completes.
pub async fn stream<F>(client: &mut TodoClient<Channel>, mut on_item: F) -> anyhow::Result<usize>
where
    F: FnMut(TodoItem) -> anyhow::Result<()>,
{
    let mut stream = client.read_todos_stream(VoidNoParam {}).await?.into_inner();
    let mut received = 0;
    while let Some(item) = stream.message().await? {
        on_item(item)?;
        received += 1;
    }
    tracing::debug!(received, "Server finished streaming");
    Ok(received)
}
