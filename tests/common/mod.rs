//! Fake container runtime shared by the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use dlogview::runtime::{Container, LogSource, LogStream, RuntimeError};
use futures::StreamExt;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What a fake container emits when its log stream is opened.
#[derive(Clone)]
pub enum Script {
    /// Emit these chunks with `delay` between them, then stay open.
    Chunks { chunks: Vec<&'static str>, delay: Duration },
    /// Emit the container id followed by `;` forever.
    Tagged,
    /// Opening fails.
    Missing,
}

#[derive(Default)]
pub struct FakeRuntime {
    scripts: Mutex<HashMap<String, Script>>,
    pub opens: Mutex<Vec<String>>,
    pub closed: Arc<AtomicUsize>,
}

impl FakeRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, container_id: &str, script: Script) -> Self {
        if let Ok(mut scripts) = self.scripts.lock() {
            scripts.insert(container_id.to_string(), script);
        }
        self
    }

    pub fn open_count(&self) -> usize {
        self.opens.lock().map(|o| o.len()).unwrap_or(0)
    }

    pub fn closed_count(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

struct CloseGuard(Arc<AtomicUsize>);

impl Drop for CloseGuard {
    fn drop(&mut self) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl LogSource for FakeRuntime {
    async fn open(&self, container_id: &str) -> Result<LogStream, RuntimeError> {
        let script = self
            .scripts
            .lock()
            .ok()
            .and_then(|s| s.get(container_id).cloned())
            .unwrap_or(Script::Tagged);

        if matches!(script, Script::Missing) {
            return Err(RuntimeError::NotFound(container_id.to_string()));
        }
        if let Ok(mut opens) = self.opens.lock() {
            opens.push(container_id.to_string());
        }

        let guard = CloseGuard(Arc::clone(&self.closed));
        let stream = match script {
            Script::Chunks { chunks, delay } => {
                let chunks = futures::stream::iter(chunks).then(move |chunk| async move {
                    tokio::time::sleep(delay).await;
                    Ok::<_, RuntimeError>(Bytes::from_static(chunk.as_bytes()))
                });
                chunks
                    .chain(futures::stream::pending())
                    .map(move |item| {
                        let _keep = &guard;
                        item
                    })
                    .boxed()
            }
            Script::Tagged | Script::Missing => {
                let tag = Bytes::from(format!("{container_id};"));
                futures::stream::unfold((guard, tag), |state| async move {
                    tokio::task::yield_now().await;
                    let chunk = state.1.clone();
                    Some((Ok::<_, RuntimeError>(chunk), state))
                })
                .boxed()
            }
        };
        Ok(stream)
    }
}

pub fn containers() -> Vec<Container> {
    vec![
        Container::new("web", "web", "nginx"),
        Container::new("db", "db", "postgres"),
        Container::new("cache", "cache", "redis"),
    ]
}

/// Poll `check` until it holds or five seconds pass.
pub async fn eventually(mut check: impl FnMut() -> bool) -> bool {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !check() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .is_ok()
}
