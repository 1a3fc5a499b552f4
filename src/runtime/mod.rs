//! # Container Runtime
//!
//! The boundary between the viewer and the container runtime.
//!
//! - [`ContainerLister`] enumerates containers once at startup.
//! - [`LogSource`] opens a following byte stream of a container's combined
//!   stdout/stderr.
//!
//! [`DockerRuntime`] implements both on top of `bollard`. Tests substitute
//! in-memory implementations.

pub mod docker;

pub use docker::{DockerRuntime, LogOptions};

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

/// Length of the abbreviated container id shown when a container has no name.
pub const SHORT_ID_LEN: usize = 12;

/// Immutable snapshot of a container taken at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub id: String,
    pub display_name: String,
    pub image: String,
    /// Runtime state as reported at enumeration time (`running`, `exited`, ...).
    pub state: String,
}

impl Container {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            image: image.into(),
            state: String::new(),
        }
    }

    pub fn short_id(&self) -> &str {
        self.id.get(..SHORT_ID_LEN).unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum RuntimeError {
    #[error("container not found: {0}")]
    NotFound(String),
    #[error("container runtime unreachable: {0}")]
    Unreachable(String),
}

/// A following stream of raw log bytes. Dropping it closes the subscription.
pub type LogStream = BoxStream<'static, Result<Bytes, RuntimeError>>;

#[async_trait]
pub trait LogSource: Send + Sync + 'static {
    /// Open a subscription to `container_id`'s log output.
    async fn open(&self, container_id: &str) -> Result<LogStream, RuntimeError>;
}

#[async_trait]
pub trait ContainerLister: Send + Sync {
    /// Enumerate containers. An empty result is valid.
    async fn list(&self) -> Result<Vec<Container>, RuntimeError>;
}
