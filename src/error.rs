//! # Error Types
//!
//! Errors surfaced by the viewer core. The binary wraps these in
//! `anyhow::Error` with context; library code returns them directly so
//! callers can match on the kind.

use crate::runtime::RuntimeError;
use crate::stream::SinkError;

#[derive(Debug, thiserror::Error)]
pub enum ViewerError {
    /// There is nothing to select.
    #[error("no containers to select")]
    EmptyCollection,

    /// Opening the log subscription for a container failed.
    #[error("log stream unavailable for {container_id}: {source}")]
    StreamUnavailable {
        container_id: String,
        #[source]
        source: RuntimeError,
    },

    /// Writing decoded bytes to the display failed. Non-fatal.
    #[error(transparent)]
    SinkWriteFailure(#[from] SinkError),

    #[error("stream session has been stopped")]
    SessionStopped,
}
