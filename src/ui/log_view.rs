//! # Log View Widget
//!
//! Renders the `vt100` screen held by a [`TerminalSink`] into a ratatui
//! buffer, keeping the colors and attributes the container wrote.
//!
//! ## Scrollback
//!
//! `vt100` exposes history through `set_scrollback(n)`: with a scrollback of
//! N, `cell(row, col)` returns rows shifted N lines into history. The widget
//! sets the requested offset for the duration of a render and restores it
//! afterwards, so `scroll_offset == 0` always means "follow the tail".

use crate::stream::{SharedSink, TerminalSink};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

fn vt100_color_to_ratatui(color: vt100::Color) -> Option<Color> {
    match color {
        vt100::Color::Default => None,
        vt100::Color::Idx(idx) => Some(Color::Indexed(idx)),
        vt100::Color::Rgb(r, g, b) => Some(Color::Rgb(r, g, b)),
    }
}

fn cell_style(cell: &vt100::Cell, base: Style) -> Style {
    let mut style = base;
    if let Some(fg) = vt100_color_to_ratatui(cell.fgcolor()) {
        style = style.fg(fg);
    }
    if let Some(bg) = vt100_color_to_ratatui(cell.bgcolor()) {
        style = style.bg(bg);
    }
    if cell.bold() {
        style = style.add_modifier(Modifier::BOLD);
    }
    if cell.italic() {
        style = style.add_modifier(Modifier::ITALIC);
    }
    if cell.underline() {
        style = style.add_modifier(Modifier::UNDERLINED);
    }
    if cell.inverse() {
        style = style.add_modifier(Modifier::REVERSED);
    }
    style
}

pub struct LogView<'a> {
    sink: &'a SharedSink<TerminalSink>,
    scroll_offset: usize,
    base_style: Style,
}

impl<'a> LogView<'a> {
    pub fn new(sink: &'a SharedSink<TerminalSink>) -> Self {
        Self {
            sink,
            scroll_offset: 0,
            base_style: Style::default(),
        }
    }

    /// Rows of history to shift the view by (0 = at bottom).
    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// Style applied to cells that carry no color of their own.
    pub fn style(mut self, style: Style) -> Self {
        self.base_style = style;
        self
    }
}

impl Widget for LogView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Ok(mut sink) = self.sink.lock() else {
            return;
        };
        let parser = sink.parser_mut();

        let original_scrollback = parser.screen().scrollback();
        parser.screen_mut().set_scrollback(self.scroll_offset);

        {
            let screen = parser.screen();
            let (screen_rows, screen_cols) = screen.size();
            let rows = area.height.min(screen_rows);
            let cols = area.width.min(screen_cols);

            for row in 0..rows {
                for col in 0..cols {
                    let Some(cell) = screen.cell(row, col) else {
                        continue;
                    };
                    if cell.is_wide_continuation() {
                        continue;
                    }
                    let contents = cell.contents();
                    let symbol = if contents.is_empty() { " " } else { contents };
                    buf.set_string(
                        area.x + col,
                        area.y + row,
                        symbol,
                        cell_style(cell, self.base_style),
                    );
                }
            }
        }

        parser.screen_mut().set_scrollback(original_scrollback);
    }
}
