//! # Stream Session
//!
//! [`StreamSession`] owns the single active log subscription and the copy task
//! that pipes it into a [`Sink`].
//!
//! ## Generations
//!
//! Every [`StreamSession::switch`] bumps a generation counter shared with the
//! copy tasks. A copy task only writes while its own generation is current,
//! and it checks that while holding the sink lock. `switch` clears the sink
//! under the same lock after bumping the counter, so a superseded task can at
//! worst land bytes that the clear then wipes. Nothing it produces survives
//! into the new generation's output.
//!
//! ## Teardown
//!
//! Cancelling a subscription only fires its [`CancellationToken`]. The task
//! handle is kept in a retired list and awaited by
//! [`StreamSession::shutdown`], so `switch` never blocks on the old stream.

use super::sink::{SharedSink, Sink};
use crate::error::ViewerError;
use crate::runtime::{LogSource, LogStream};
use futures::StreamExt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No successful switch yet.
    Idle,
    /// At least one switch succeeded; a copy task may be running.
    Streaming,
    /// Terminal.
    Stopped,
}

struct Subscription {
    container_id: String,
    generation: u64,
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

pub struct StreamSession<L: LogSource, S: Sink> {
    source: Arc<L>,
    sink: SharedSink<S>,
    generation: Arc<AtomicU64>,
    active: Option<Subscription>,
    retired: Vec<JoinHandle<()>>,
    state: SessionState,
}

impl<L: LogSource, S: Sink> StreamSession<L, S> {
    pub fn new(source: Arc<L>, sink: SharedSink<S>) -> Self {
        Self {
            source,
            sink,
            generation: Arc::new(AtomicU64::new(0)),
            active: None,
            retired: Vec::new(),
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Container id of the live subscription, if any.
    pub fn active_container(&self) -> Option<&str> {
        self.active.as_ref().map(|sub| sub.container_id.as_str())
    }

    pub fn sink(&self) -> &SharedSink<S> {
        &self.sink
    }

    /// Replace the active subscription with one for `container_id`.
    ///
    /// On failure the previous subscription is still gone and the generation
    /// has still advanced; the sink is left empty.
    pub async fn switch(&mut self, container_id: &str) -> Result<(), ViewerError> {
        if self.state == SessionState::Stopped {
            return Err(ViewerError::SessionStopped);
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.retire_active();
        self.clear_sink();

        let stream = self.source.open(container_id).await.map_err(|source| {
            warn!(container_id, generation, error = %source, "failed to open log stream");
            ViewerError::StreamUnavailable {
                container_id: container_id.to_string(),
                source,
            }
        })?;

        let cancel = CancellationToken::new();
        let task = tokio::spawn(copy_stream(
            stream,
            CopyTarget {
                container_id: container_id.to_string(),
                generation,
                current: Arc::clone(&self.generation),
                sink: Arc::clone(&self.sink),
            },
            cancel.clone(),
        ));

        debug!(container_id, generation, "log stream started");
        self.active = Some(Subscription {
            container_id: container_id.to_string(),
            generation,
            cancel,
            task,
        });
        self.state = SessionState::Streaming;
        Ok(())
    }

    /// Cancel the active subscription and make the session terminal.
    pub fn stop(&mut self) {
        if self.state == SessionState::Stopped {
            return;
        }
        self.retire_active();
        self.state = SessionState::Stopped;
        debug!("stream session stopped");
    }

    /// Stop the session and wait for every copy task to release its stream.
    pub async fn shutdown(&mut self) {
        self.stop();
        for task in self.retired.drain(..) {
            if let Err(e) = task.await {
                if e.is_panic() {
                    warn!(error = %e, "log copy task panicked");
                }
            }
        }
    }

    fn retire_active(&mut self) {
        self.retired.retain(|task| !task.is_finished());
        if let Some(sub) = self.active.take() {
            debug!(
                container_id = %sub.container_id,
                generation = sub.generation,
                "cancelling log stream"
            );
            sub.cancel.cancel();
            self.retired.push(sub.task);
        }
    }

    fn clear_sink(&self) {
        match self.sink.lock() {
            Ok(mut sink) => sink.clear(),
            Err(_) => warn!("sink lock poisoned, cannot clear"),
        }
    }
}

impl<L: LogSource, S: Sink> Drop for StreamSession<L, S> {
    fn drop(&mut self) {
        if let Some(sub) = self.active.take() {
            sub.cancel.cancel();
        }
    }
}

struct CopyTarget<S: Sink> {
    container_id: String,
    generation: u64,
    current: Arc<AtomicU64>,
    sink: SharedSink<S>,
}

impl<S: Sink> CopyTarget<S> {
    fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }
}

/// Pump one subscription into the sink until it ends, errors, is cancelled,
/// or is superseded.
async fn copy_stream<S: Sink>(
    mut stream: LogStream,
    target: CopyTarget<S>,
    cancel: CancellationToken,
) {
    loop {
        let next = tokio::select! {
            biased;
            () = cancel.cancelled() => break,
            next = stream.next() => next,
        };

        let chunk = match next {
            Some(Ok(chunk)) => chunk,
            Some(Err(e)) => {
                warn!(container_id = %target.container_id, error = %e, "log stream broke");
                break;
            }
            None => {
                debug!(container_id = %target.container_id, "log stream ended");
                break;
            }
        };

        let Ok(mut sink) = target.sink.lock() else {
            warn!("sink lock poisoned, dropping log stream");
            break;
        };
        if !target.is_current() {
            break;
        }
        if let Err(e) = sink.write(&chunk) {
            let err = ViewerError::from(e);
            warn!(container_id = %target.container_id, error = %err, "discarding log chunk");
        }
    }
    // `stream` drops here, closing the subscription.
}
