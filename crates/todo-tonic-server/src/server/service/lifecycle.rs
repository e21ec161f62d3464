//! Admission control and graceful shutdown for the todo service.
//!
//! Shutdown runs in phases:
//!
//! 1. Stop admitting new requests (they fail with `UNAVAILABLE`).
//! 2. Give in-flight streams up to the configured timeout to drain.
//! 3. Cancel whatever is still streaming through the shared
//!    [`CancellationToken`].

use crate::server::telemetry::{decrement_streams_inflight, increment_streams_inflight};
use core::time::Duration;
use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};
use todo_tonic_core::{Error, Result};
use tokio::time::{sleep, timeout};
use tokio_util::sync::CancellationToken;

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(20);

#[derive(Debug, Default)]
pub struct Lifecycle {
    draining: AtomicBool,
    streams_inflight: AtomicUsize,
    shutdown_token: CancellationToken,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails with [`Error::ServiceShutdown`] once shutdown has begun.
    pub fn ensure_accepting(&self) -> Result<()> {
        if self.draining.load(Ordering::Acquire) {
            return Err(Error::ServiceShutdown);
        }
        Ok(())
    }

    /// Registers a new in-flight stream. The returned guard deregisters it
    /// when dropped.
    pub fn begin_stream(self: &Arc<Self>) -> Result<StreamGuard> {
        self.ensure_accepting()?;
        self.streams_inflight.fetch_add(1, Ordering::AcqRel);
        increment_streams_inflight();
        Ok(StreamGuard {
            lifecycle: Arc::clone(self),
        })
    }

    pub fn streams_inflight(&self) -> usize {
        self.streams_inflight.load(Ordering::Acquire)
    }

    /// Token cancelled in the final shutdown phase.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown_token.clone()
    }

    /// Refuses new work, waits up to `drain_timeout` for in-flight streams,
    /// then cancels the rest.
    pub async fn shutdown(&self, drain_timeout: Duration) {
        tracing::info!("Refusing new requests");
        self.draining.store(true, Ordering::Release);

        tracing::info!(
            "Draining in-flight streams ({} active)",
            self.streams_inflight()
        );
        let drained = timeout(drain_timeout, async {
            while self.streams_inflight() > 0 {
                sleep(DRAIN_POLL_INTERVAL).await;
            }
        })
        .await;

        match drained {
            Ok(()) => tracing::debug!("All in-flight streams drained"),
            Err(_) => tracing::warn!(
                "Graceful drain timed out ({} streams still active)",
                self.streams_inflight()
            ),
        }

        tracing::debug!("Cancelling remaining streams");
        self.shutdown_token.cancel();
    }
}

/// Keeps a stream counted as in flight until dropped.
#[derive(Debug)]
pub struct StreamGuard {
    lifecycle: Arc<Lifecycle>,
}

impl Drop for StreamGuard {
    fn drop(&mut self) {
        self.lifecycle
            .streams_inflight
            .fetch_sub(1, Ordering::AcqRel);
        decrement_streams_inflight();
    }
}
