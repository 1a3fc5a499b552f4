//! # Docker Runtime
//!
//! [`DockerRuntime`] talks to the local Docker daemon through `bollard`.
//! Connection settings come from the environment (`DOCKER_HOST` or the
//! default socket), matching the behaviour of the `docker` CLI.

use super::{Container, ContainerLister, LogSource, LogStream, RuntimeError};
use async_trait::async_trait;
use bollard::container::{InspectContainerOptions, ListContainersOptions, LogOutput, LogsOptions};
use bollard::models::ContainerSummary;
use bollard::Docker;
use futures::StreamExt;
use tracing::debug;

/// Options forwarded to every log subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogOptions {
    /// Number of trailing lines to replay (`"all"` or a count).
    pub tail: String,
    /// Prefix each line with the daemon's RFC 3339 timestamp.
    pub timestamps: bool,
}

impl Default for LogOptions {
    fn default() -> Self {
        Self {
            tail: "all".to_string(),
            timestamps: false,
        }
    }
}

#[derive(Clone)]
pub struct DockerRuntime {
    docker: Docker,
    /// Include stopped containers when listing.
    all: bool,
    log_options: LogOptions,
}

impl DockerRuntime {
    /// Connect using local defaults and verify the daemon answers.
    pub async fn connect(all: bool, log_options: LogOptions) -> Result<Self, RuntimeError> {
        let docker = Docker::connect_with_local_defaults().map_err(map_error)?;
        docker.ping().await.map_err(map_error)?;
        debug!(all, tail = %log_options.tail, "connected to docker daemon");
        Ok(Self {
            docker,
            all,
            log_options,
        })
    }
}

#[async_trait]
impl ContainerLister for DockerRuntime {
    async fn list(&self) -> Result<Vec<Container>, RuntimeError> {
        let options = ListContainersOptions::<String> {
            all: self.all,
            ..Default::default()
        };
        let summaries = self
            .docker
            .list_containers(Some(options))
            .await
            .map_err(map_error)?;
        Ok(summaries.into_iter().filter_map(container_from_summary).collect())
    }
}

#[async_trait]
impl LogSource for DockerRuntime {
    async fn open(&self, container_id: &str) -> Result<LogStream, RuntimeError> {
        // The logs endpoint only reports a missing container on first poll,
        // so check existence up front.
        self.docker
            .inspect_container(container_id, None::<InspectContainerOptions>)
            .await
            .map_err(map_error)?;

        let options = LogsOptions::<String> {
            follow: true,
            stdout: true,
            stderr: true,
            tail: self.log_options.tail.clone(),
            timestamps: self.log_options.timestamps,
            ..Default::default()
        };

        let stream = self
            .docker
            .logs(container_id, Some(options))
            .map(|chunk| chunk.map(log_output_bytes).map_err(map_error));
        Ok(stream.boxed())
    }
}

fn log_output_bytes(output: LogOutput) -> bytes::Bytes {
    match output {
        LogOutput::StdOut { message }
        | LogOutput::StdErr { message }
        | LogOutput::Console { message }
        | LogOutput::StdIn { message } => message,
    }
}

fn map_error(err: bollard::errors::Error) -> RuntimeError {
    match err {
        bollard::errors::Error::DockerResponseServerError {
            status_code: 404,
            message,
        } => RuntimeError::NotFound(message),
        other => RuntimeError::Unreachable(other.to_string()),
    }
}

/// Convert a daemon summary into a [`Container`]. Entries without an id are
/// skipped.
pub(crate) fn container_from_summary(summary: ContainerSummary) -> Option<Container> {
    let id = summary.id?;
    let display_name = summary
        .names
        .as_ref()
        .and_then(|names| names.first())
        .map(|name| name.trim_start_matches('/').to_string())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| id.chars().take(super::SHORT_ID_LEN).collect());

    Some(Container {
        display_name,
        image: summary.image.unwrap_or_default(),
        state: summary.state.unwrap_or_default(),
        id,
    })
}
