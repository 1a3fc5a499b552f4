use crate::error::ViewerError;
use crate::runtime::{Container, LogSource};
use crate::stream::{SessionState, SharedSink, StreamSession, TerminalSink};
use crate::ui::focus::{FocusController, FocusPane};
use crate::ui::selection::SelectionModel;
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tracing::{debug, warn};

/// Initial virtual screen size, replaced on the first resize.
const DEFAULT_LOG_ROWS: u16 = 24;
const DEFAULT_LOG_COLS: u16 = 80;

/// Everything the input loop can ask the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SelectNext,
    SelectPrevious,
    CycleFocus,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollTop,
    ScrollBottom,
    Quit,
}

/// Translate a key press into a command for the pane that has focus.
pub fn command_for_key(key: KeyEvent, focus: FocusPane) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('q') | KeyCode::Char('c') => Some(Command::Quit),
            KeyCode::Char('d') if focus == FocusPane::LogView => Some(Command::PageDown),
            KeyCode::Char('u') if focus == FocusPane::LogView => Some(Command::PageUp),
            _ => None,
        };
    }

    if key.code == KeyCode::Tab {
        return Some(Command::CycleFocus);
    }

    match focus {
        FocusPane::ContainerList => match key.code {
            KeyCode::Down | KeyCode::Char('j') => Some(Command::SelectNext),
            KeyCode::Up | KeyCode::Char('k') => Some(Command::SelectPrevious),
            KeyCode::Char('q') | KeyCode::Char('Q') => Some(Command::Quit),
            _ => None,
        },
        FocusPane::LogView => match key.code {
            KeyCode::Down | KeyCode::Char('j') => Some(Command::ScrollDown),
            KeyCode::Up | KeyCode::Char('k') => Some(Command::ScrollUp),
            KeyCode::PageDown => Some(Command::PageDown),
            KeyCode::PageUp => Some(Command::PageUp),
            KeyCode::Char('g') | KeyCode::Home => Some(Command::ScrollTop),
            KeyCode::Char('G') | KeyCode::End => Some(Command::ScrollBottom),
            _ => None,
        },
    }
}

/// Application state: the selection, the focus ring and the stream session
/// side by side. Navigation feeds the session; focus never touches it.
pub struct App<L: LogSource> {
    pub selection: SelectionModel,
    pub focus: FocusController<FocusPane>,
    pub session: StreamSession<L, TerminalSink>,
    pub theme: &'static Theme,
    /// Rows scrolled back from the tail of the log view (0 = following).
    pub log_scroll: usize,
    /// Last stream failure, shown in the footer until the next switch.
    pub status: Option<String>,
    pub should_quit: bool,
    log_rows: u16,
}

impl<L: LogSource> App<L> {
    /// Fails with `EmptyCollection` when there is nothing to show.
    pub fn new(
        containers: Vec<Container>,
        source: Arc<L>,
        theme: &'static Theme,
    ) -> Result<Self, ViewerError> {
        if containers.is_empty() {
            return Err(ViewerError::EmptyCollection);
        }
        let sink = TerminalSink::shared(DEFAULT_LOG_ROWS, DEFAULT_LOG_COLS);
        Ok(Self {
            selection: SelectionModel::new(containers),
            focus: FocusController::default(),
            session: StreamSession::new(source, sink),
            theme,
            log_scroll: 0,
            status: None,
            should_quit: false,
            log_rows: DEFAULT_LOG_ROWS,
        })
    }

    pub fn log_sink(&self) -> &SharedSink<TerminalSink> {
        self.session.sink()
    }

    /// Start streaming the initially selected container.
    pub async fn start(&mut self) {
        if let Some(id) = self.selection.current().map(|c| c.id.clone()) {
            self.follow(&id).await;
        }
    }

    pub async fn dispatch(&mut self, command: Command) {
        debug!(?command, "dispatch");
        match command {
            Command::SelectNext => {
                let next = self.selection.next().map(|c| c.id.clone());
                if let Ok(id) = next {
                    self.follow(&id).await;
                }
            }
            Command::SelectPrevious => {
                let previous = self.selection.previous().map(|c| c.id.clone());
                if let Ok(id) = previous {
                    self.follow(&id).await;
                }
            }
            Command::CycleFocus => {
                self.focus.cycle_forward();
            }
            Command::ScrollUp => self.scroll_up(1),
            Command::ScrollDown => self.scroll_down(1),
            Command::PageUp => self.scroll_up(self.page_size()),
            Command::PageDown => self.scroll_down(self.page_size()),
            Command::ScrollTop => self.log_scroll = self.max_scroll(),
            Command::ScrollBottom => self.log_scroll = 0,
            Command::Quit => self.should_quit = true,
        }
    }

    /// Handle a key press; returns whether it mapped to a command.
    pub async fn handle_key(&mut self, key: KeyEvent) -> bool {
        match command_for_key(key, self.focus.current()) {
            Some(command) => {
                self.dispatch(command).await;
                true
            }
            None => false,
        }
    }

    /// Match the virtual screen to the log panel's inner area.
    pub fn resize_log_view(&mut self, rows: u16, cols: u16) {
        let rows = rows.max(1);
        let cols = cols.max(1);
        self.log_rows = rows;
        if let Ok(mut sink) = self.log_sink().lock() {
            sink.resize(rows, cols);
        }
    }

    pub fn is_streaming(&self) -> bool {
        self.session.state() == SessionState::Streaming && self.session.active_container().is_some()
    }

    pub async fn shutdown(&mut self) {
        self.session.shutdown().await;
    }

    async fn follow(&mut self, container_id: &str) {
        self.log_scroll = 0;
        match self.session.switch(container_id).await {
            Ok(()) => self.status = None,
            Err(e) => {
                warn!(error = %e, "switch failed");
                self.status = Some(e.to_string());
            }
        }
    }

    fn page_size(&self) -> usize {
        usize::from(self.log_rows.saturating_sub(1).max(1))
    }

    fn max_scroll(&self) -> usize {
        self.log_sink()
            .lock()
            .map(|mut sink| sink.max_scrollback())
            .unwrap_or(0)
    }

    fn scroll_up(&mut self, lines: usize) {
        self.log_scroll = (self.log_scroll + lines).min(self.max_scroll());
    }

    fn scroll_down(&mut self, lines: usize) {
        self.log_scroll = self.log_scroll.saturating_sub(lines);
    }
}
