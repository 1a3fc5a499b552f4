//! dlogview - follow the logs of the selected Docker container
//!
//! This library provides the container runtime boundary, the selection-driven
//! log stream session, and the terminal UI built on top of them.

pub mod error;
pub mod logging;
pub mod runtime;
pub mod stream;
pub mod ui;

pub use error::ViewerError;
