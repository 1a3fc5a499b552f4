//! # Display Sinks
//!
//! A [`Sink`] is the append-only surface a [`StreamSession`] copies log bytes
//! into. The session clears it whenever a new generation starts so output
//! from two containers is never mixed on screen.
//!
//! [`TerminalSink`] decodes ANSI escape sequences into a `vt100` virtual
//! screen that [`crate::ui::log_view::LogView`] renders.
//!
//! [`StreamSession`]: super::StreamSession

use std::sync::{Arc, Mutex};

/// Number of lines kept above the visible screen.
pub const SCROLLBACK_LINES: usize = 10_000;

#[derive(Debug, Clone, thiserror::Error)]
#[error("sink write failed: {0}")]
pub struct SinkError(pub String);

pub trait Sink: Send + 'static {
    /// Append raw bytes.
    fn write(&mut self, bytes: &[u8]) -> Result<(), SinkError>;

    /// Reset to empty.
    fn clear(&mut self);
}

/// A sink shared between the session's copy task and the renderer.
pub type SharedSink<S> = Arc<Mutex<S>>;

/// Sink backed by a `vt100` parser with scrollback.
pub struct TerminalSink {
    parser: vt100::Parser,
    /// Whether the previous chunk ended in a carriage return.
    pending_cr: bool,
}

impl TerminalSink {
    pub fn new(rows: u16, cols: u16) -> Self {
        Self {
            parser: vt100::Parser::new(rows, cols, SCROLLBACK_LINES),
            pending_cr: false,
        }
    }

    pub fn shared(rows: u16, cols: u16) -> SharedSink<Self> {
        Arc::new(Mutex::new(Self::new(rows, cols)))
    }

    pub fn parser(&self) -> &vt100::Parser {
        &self.parser
    }

    pub fn parser_mut(&mut self) -> &mut vt100::Parser {
        &mut self.parser
    }

    /// Resize the virtual screen to match the log panel.
    pub fn resize(&mut self, rows: u16, cols: u16) {
        if self.parser.screen().size() != (rows, cols) {
            self.parser.screen_mut().set_size(rows, cols);
        }
    }

    /// Visible screen text, mostly useful for tests and debugging.
    pub fn contents(&self) -> String {
        self.parser.screen().contents()
    }

    /// Number of scrollback rows that currently exist above the screen.
    pub fn max_scrollback(&mut self) -> usize {
        let screen = self.parser.screen_mut();
        let original = screen.scrollback();
        screen.set_scrollback(usize::MAX);
        let max = screen.scrollback();
        screen.set_scrollback(original);
        max
    }

    /// Container logs without a TTY carry bare line feeds, which a terminal
    /// would render as a staircase. Expand them to CRLF.
    fn translate_newlines(&mut self, bytes: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(bytes.len() + bytes.len() / 16);
        for &byte in bytes {
            if byte == b'\n' && !self.pending_cr {
                out.push(b'\r');
            }
            out.push(byte);
            self.pending_cr = byte == b'\r';
        }
        out
    }
}

impl Sink for TerminalSink {
    fn write(&mut self, bytes: &[u8]) -> Result<(), SinkError> {
        let translated = self.translate_newlines(bytes);
        self.parser.process(&translated);
        Ok(())
    }

    fn clear(&mut self) {
        let (rows, cols) = self.parser.screen().size();
        self.parser = vt100::Parser::new(rows, cols, SCROLLBACK_LINES);
        self.pending_cr = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_line_feeds_start_new_lines() {
        let mut sink = TerminalSink::new(5, 20);
        sink.write(b"first\nsecond\n").expect("write");

        let contents = sink.contents();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "first");
        assert_eq!(lines[1], "second");
    }

    #[test]
    fn test_crlf_split_across_writes_is_not_doubled() {
        let mut sink = TerminalSink::new(5, 20);
        sink.write(b"one\r").expect("write");
        sink.write(b"\ntwo").expect("write");

        let contents = sink.contents();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "one");
        assert_eq!(lines[1], "two");
    }

    #[test]
    fn test_clear_resets_screen_and_keeps_size() {
        let mut sink = TerminalSink::new(4, 30);
        sink.write(b"stale output\n").expect("write");
        sink.clear();

        assert!(sink.contents().trim().is_empty());
        assert_eq!(sink.parser().screen().size(), (4, 30));
    }

    #[test]
    fn test_ansi_colors_are_decoded_not_printed() {
        let mut sink = TerminalSink::new(3, 20);
        sink.write(b"\x1b[31mred\x1b[0m\n").expect("write");

        assert!(sink.contents().starts_with("red"));
        let cell = sink.parser().screen().cell(0, 0).expect("cell");
        assert_eq!(cell.fgcolor(), vt100::Color::Idx(1));
    }

    #[test]
    fn test_resize_changes_screen_size() {
        let mut sink = TerminalSink::new(3, 20);
        sink.resize(10, 40);
        assert_eq!(sink.parser().screen().size(), (10, 40));
    }

    #[test]
    fn test_scrollback_grows_past_screen_height() {
        let mut sink = TerminalSink::new(2, 10);
        for i in 0..6 {
            sink.write(format!("line {i}\n").as_bytes()).expect("write");
        }
        assert!(sink.max_scrollback() >= 4);
    }
}
