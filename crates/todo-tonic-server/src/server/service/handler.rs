//! gRPC service implementation for the todo list.
//!
//! This module defines [`TodoService`], the concrete implementation of the
//! [`Todo`] gRPC service defined in `todo.proto`.
//!
//! ## Responsibilities
//!
//! - Append todos with server-assigned identifiers (`createTodo`).
//! - Return the whole list in one envelope (`readTodos`).
//! - Stream the list one item at a time via [`feed_todos`]
//!   (`readTodosStream`).
//! - Refuse work and cancel streams during graceful shutdown.

use crate::server::{
    config::ServerConfig,
    service::lifecycle::Lifecycle,
    store::TodoStore,
    streaming::coordinator::feed_todos,
    telemetry::{
        increment_requests, increment_stream_errors, increment_todos_created,
        increment_todos_streamed, record_stream_duration,
    },
};
use core::pin::Pin;
use futures::TryStreamExt;
use std::sync::Arc;
use todo_tonic_core::proto::{TodoItem, TodoItems, VoidNoParam, todo_server::Todo};
use tokio::sync::mpsc;
use tokio_stream::{Stream, wrappers::ReceiverStream};
use tonic::{Request, Response, Status};
use tracing::Instrument;

/// gRPC service backed by a process-lifetime, in-memory todo list.
///
/// Cloning is cheap; clones share the same list and lifecycle.
#[derive(Clone)]
pub struct TodoService {
    config: ServerConfig,
    store: Arc<TodoStore>,
    lifecycle: Arc<Lifecycle>,
}

impl TodoService {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            store: Arc::new(TodoStore::new()),
            lifecycle: Arc::new(Lifecycle::new()),
        }
    }

    /// Initiates a graceful shutdown.
    ///
    /// New requests are refused immediately; in-flight streams get the
    /// configured shutdown timeout to finish before they are cancelled.
    pub async fn shutdown(&self) {
        self.lifecycle.shutdown(self.config.shutdown_timeout).await;
    }

    /// Number of todos currently stored.
    pub fn todo_count(&self) -> usize {
        self.store.len()
    }
}

#[tonic::async_trait]
impl Todo for TodoService {
    type readTodosStreamStream = Pin<Box<dyn Stream<Item = Result<TodoItem, Status>> + Send>>;

    /// Stores a todo. The request's `id` is ignored: the identifier is the
    /// list length at the time of the call.
    #[tracing::instrument(skip_all, fields(text_len = req.get_ref().text.len()))]
    async fn create_todo(&self, req: Request<TodoItem>) -> Result<Response<TodoItem>, Status> {
        self.lifecycle.ensure_accepting()?;
        increment_requests("createTodo");

        let TodoItem { text, .. } = req.into_inner();
        let item = self.store.create(text)?;
        increment_todos_created();

        tracing::debug!(id = item.id, total = self.store.len(), "Created todo");
        Ok(Response::new(item))
    }

    #[tracing::instrument(skip_all)]
    async fn read_todos(
        &self,
        _req: Request<VoidNoParam>,
    ) -> Result<Response<TodoItems>, Status> {
        self.lifecycle.ensure_accepting()?;
        increment_requests("readTodos");

        let items = self.store.list();
        tracing::debug!(count = items.len(), "Listing todos");
        Ok(Response::new(TodoItems { items }))
    }

    /// Streams a snapshot of the list taken when the call arrives, one todo
    /// per message, then completes.
    #[tracing::instrument(skip_all)]
    async fn read_todos_stream(
        &self,
        _req: Request<VoidNoParam>,
    ) -> Result<Response<Self::readTodosStreamStream>, Status> {
        let start = std::time::Instant::now();
        let guard = self.lifecycle.begin_stream()?;
        increment_requests("readTodosStream");

        let snapshot = self.store.list();
        if snapshot.is_empty() {
            tracing::debug!("Streaming an empty list");
        }

        let (resp_tx, resp_rx) =
            mpsc::channel::<Result<TodoItem, Status>>(self.config.stream_buffer_size);
        let shutdown = self.lifecycle.shutdown_token();

        let fut = async move {
            // Keeps the stream counted as in flight until the feeder is done.
            let _guard = guard;
            match feed_todos(snapshot, resp_tx, shutdown).await {
                Ok(count) => {
                    record_stream_duration(start.elapsed().as_secs_f64() * 1000.0);
                    tracing::debug!(count, "Stream complete");
                }
                Err(e) => {
                    increment_stream_errors();
                    tracing::warn!("Stream ended early: {e}");
                }
            }
        };
        tokio::spawn(fut.instrument(tracing::info_span!("streaming")));

        // Failed streams are counted by the feeder.
        let stream = ReceiverStream::new(resp_rx).inspect_ok(|_| increment_todos_streamed(1));

        Ok(Response::new(Box::pin(stream)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::todo_server;
    use core::time::Duration;
    use todo_tonic_core::{client::connect, proto::todo_client::TodoClient, types::UNASSIGNED_TODO_ID};
    use tokio::net::TcpListener;
    use tokio_stream::{StreamExt, wrappers::TcpListenerStream};
    use tonic::{Code, transport::{Channel, Server}};

    /// Serves `service` on an ephemeral loopback port and returns a connected
    /// client.
    async fn serve(service: TodoService) -> TodoClient<Channel> {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let incoming = TcpListenerStream::new(listener);

        tokio::spawn(async move {
            Server::builder()
                .add_service(todo_server(service))
                .serve_with_incoming(incoming)
                .await
                .unwrap();
        });

        connect(&format!("http://{addr}")).await.unwrap()
    }

    fn new_todo(text: &str) -> TodoItem {
        TodoItem {
            id: UNASSIGNED_TODO_ID,
            text: text.to_string(),
        }
    }

    async fn create_all(client: &mut TodoClient<Channel>, texts: &[&str]) -> Vec<TodoItem> {
        let mut created = Vec::with_capacity(texts.len());
        for text in texts {
            created.push(client.create_todo(new_todo(text)).await.unwrap().into_inner());
        }
        created
    }

    async fn collect_stream(client: &mut TodoClient<Channel>) -> Vec<TodoItem> {
        let mut stream = client
            .read_todos_stream(VoidNoParam {})
            .await
            .unwrap()
            .into_inner();
        let mut items = Vec::new();
        while let Some(item) = stream.message().await.unwrap() {
            items.push(item);
        }
        items
    }

    #[tokio::test]
    async fn empty_server_returns_empty_list_and_stream() {
        let mut client = serve(TodoService::new(ServerConfig::for_tests())).await;

        let list = client.read_todos(VoidNoParam {}).await.unwrap().into_inner();
        assert!(list.items.is_empty());
        assert!(collect_stream(&mut client).await.is_empty());
    }

    #[tokio::test]
    async fn list_returns_items_in_creation_order() {
        let mut client = serve(TodoService::new(ServerConfig::for_tests())).await;
        let texts = ["buy milk", "walk dog", "write report"];
        let created = create_all(&mut client, &texts).await;

        let items = client.read_todos(VoidNoParam {}).await.unwrap().into_inner().items;

        assert_eq!(items, created);
        for (expected_id, (item, text)) in items.iter().zip(texts).enumerate() {
            assert_eq!(item.id as usize, expected_id);
            assert_eq!(item.text, text);
        }
    }

    #[tokio::test]
    async fn stream_emits_the_same_items_then_completes() {
        // More items than the stream buffer, so the feeder has to wait on the
        // client at least once.
        let mut client = serve(TodoService::new(ServerConfig::for_tests())).await;
        let texts: Vec<String> = (0..10).map(|i| format!("todo {i}")).collect();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        create_all(&mut client, &refs).await;

        let listed = client.read_todos(VoidNoParam {}).await.unwrap().into_inner().items;
        let streamed = collect_stream(&mut client).await;

        assert_eq!(streamed.len(), 10);
        assert_eq!(streamed, listed);
    }

    #[tokio::test]
    async fn create_ignores_client_supplied_ids() {
        let mut client = serve(TodoService::new(ServerConfig::for_tests())).await;

        let first = client
            .create_todo(TodoItem {
                id: 99,
                text: "first".to_string(),
            })
            .await
            .unwrap()
            .into_inner();
        let second = client.create_todo(new_todo("second")).await.unwrap().into_inner();

        assert_eq!(first.id, 0);
        assert_eq!(second.id, 1);
        assert_eq!(second.text, "second");
    }

    #[tokio::test]
    async fn concurrent_creates_get_distinct_ids() {
        let service = TodoService::new(ServerConfig::for_tests());
        let client = serve(service.clone()).await;

        let tasks: Vec<_> = (0..32)
            .map(|i| {
                let mut client = client.clone();
                tokio::spawn(async move {
                    client
                        .create_todo(new_todo(&format!("task {i}")))
                        .await
                        .unwrap()
                        .into_inner()
                        .id
                })
            })
            .collect();

        let mut ids = Vec::new();
        for task in tasks {
            ids.push(task.await.unwrap());
        }
        ids.sort_unstable();

        assert_eq!(ids, (0..32).collect::<Vec<_>>());
        assert_eq!(service.todo_count(), 32);
    }

    #[tokio::test]
    async fn requests_after_shutdown_are_unavailable() {
        let service = TodoService::new(ServerConfig::for_tests());
        let mut client = serve(service.clone()).await;
        service.shutdown().await;

        let create = client.create_todo(new_todo("late")).await.unwrap_err();
        let list = client.read_todos(VoidNoParam {}).await.unwrap_err();
        let stream = client.read_todos_stream(VoidNoParam {}).await.unwrap_err();

        assert_eq!(create.code(), Code::Unavailable);
        assert_eq!(list.code(), Code::Unavailable);
        assert_eq!(stream.code(), Code::Unavailable);
        assert_eq!(service.todo_count(), 0);
    }

    #[tokio::test]
    async fn shutdown_cancels_a_stalled_stream() {
        let mut config = ServerConfig::for_tests();
        config.stream_buffer_size = 1;
        config.shutdown_timeout = Duration::from_millis(50);
        let service = TodoService::new(config);
        for i in 0..5 {
            service
                .create_todo(Request::new(new_todo(&format!("todo {i}"))))
                .await
                .unwrap();
        }

        // Nobody polls the stream, so the feeder blocks on the full buffer.
        let mut stream = service
            .read_todos_stream(Request::new(VoidNoParam {}))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(service.lifecycle.streams_inflight(), 1);

        service.shutdown().await;

        let mut received = 0;
        let mut errors = Vec::new();
        while let Some(msg) = stream.next().await {
            match msg {
                Ok(_) => received += 1,
                Err(status) => errors.push(status.code()),
            }
        }
        assert!(received < 5);
        // At most the one shutdown notice the feeder forwards.
        assert!(errors.len() <= 1);
        assert!(errors.iter().all(|code| *code == Code::Unavailable));

        // The feeder task releases its guard just after closing the stream.
        tokio::time::timeout(Duration::from_secs(1), async {
            while service.lifecycle.streams_inflight() > 0 {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
    }
}
