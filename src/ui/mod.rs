//! # UI Module
//!
//! Terminal user interface for dlogview.
//!
//! ## Components
//!
//! - [`App`] - owns the selection, focus ring and stream session
//! - [`SelectionModel`] - ring-list navigation over containers
//! - [`FocusController`] - Tab cycling between panes
//! - [`mod@render`] - drawing functions
//! - [`log_view::LogView`] - widget rendering the streamed log screen
//!
//! ## Layout
//!
//! ```text
//! ┌──────────┬──────────────────────────────────────┐
//! │Container │ Log View - web                       │
//! │List      │                                      │
//! │ web      │ 2024-05-01 12:00:01 GET / 200        │
//! │ db       │ 2024-05-01 12:00:02 GET /health 200  │
//! │ cache    │                                      │
//! └──────────┴──────────────────────────────────────┘
//!  [↑↓/jk] Select  [Tab] Focus logs  [q/Ctrl+Q] Quit
//! ```

pub mod app;
pub mod config;
pub mod focus;
pub mod log_view;
pub mod render;
pub mod selection;
pub mod theme;

pub use app::{App, Command};
pub use focus::{FocusController, FocusPane};
pub use render::render;
pub use selection::SelectionModel;
