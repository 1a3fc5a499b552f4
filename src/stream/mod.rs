//! # Log Streaming
//!
//! - [`StreamSession`] - selection-driven lifecycle of the single active log
//!   subscription
//! - [`Sink`] / [`TerminalSink`] - where streamed bytes end up

pub mod session;
pub mod sink;

pub use session::{SessionState, StreamSession};
pub use sink::{SharedSink, Sink, SinkError, TerminalSink};
