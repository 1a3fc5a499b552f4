use crate::runtime::LogSource;
use crate::ui::app::App;
use crate::ui::focus::FocusPane;
use crate::ui::log_view::LogView;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

struct Areas {
    list: Rect,
    logs: Rect,
    footer: Rect,
}

fn split(area: Rect) -> Areas {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    // Container list : log view = 2 : 10
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 12), Constraint::Ratio(10, 12)])
        .split(rows[0]);

    Areas {
        list: columns[0],
        logs: columns[1],
        footer: rows[1],
    }
}

/// Inner area of the log panel for a frame of the given size, used to size
/// the virtual terminal.
pub fn log_inner_area(area: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(split(area).logs)
}

pub fn render<L: LogSource>(frame: &mut Frame, app: &App<L>) {
    let areas = split(frame.area());

    render_container_list(frame, app, areas.list);
    render_log_view(frame, app, areas.logs);
    render_footer(frame, app, areas.footer);
}

fn border_style<L: LogSource>(app: &App<L>, pane: FocusPane) -> Style {
    if app.focus.current() == pane {
        Style::default().fg(app.theme.accent)
    } else {
        Style::default().fg(app.theme.fg_dim)
    }
}

fn render_container_list<L: LogSource>(frame: &mut Frame, app: &App<L>, area: Rect) {
    let theme = app.theme;
    let items: Vec<ListItem> = app
        .selection
        .containers()
        .iter()
        .map(|container| {
            let state_color = if container.state == "running" {
                theme.running
            } else {
                theme.fg_dim
            };
            ListItem::new(vec![
                Line::from(Span::styled(
                    container.display_name.clone(),
                    Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![
                    Span::styled(container.image.clone(), Style::default().fg(theme.fg_dim)),
                    Span::raw(" "),
                    Span::styled(container.state.clone(), Style::default().fg(state_color)),
                ]),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    "Container List",
                    Style::default().fg(theme.secondary),
                ))
                .border_style(border_style(app, FocusPane::ContainerList)),
        )
        .style(Style::default().bg(theme.bg))
        .highlight_style(
            Style::default()
                .fg(theme.bg)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    state.select(Some(app.selection.index()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_log_view<L: LogSource>(frame: &mut Frame, app: &App<L>, area: Rect) {
    let theme = app.theme;
    let mut title = match app.selection.current() {
        Some(container) => format!("Log View - {}", container.display_name),
        None => "Log View".to_string(),
    };
    if app.log_scroll > 0 {
        title.push_str(&format!(" [-{}]", app.log_scroll));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(title, Style::default().fg(theme.secondary)))
        .border_style(border_style(app, FocusPane::LogView))
        .style(Style::default().bg(theme.bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let view = LogView::new(app.log_sink())
        .scroll_offset(app.log_scroll)
        .style(Style::default().fg(theme.fg).bg(theme.bg));
    frame.render_widget(view, inner);
}

fn render_footer<L: LogSource>(frame: &mut Frame, app: &App<L>, area: Rect) {
    let theme = app.theme;

    let line = match &app.status {
        Some(message) => Line::from(Span::styled(
            message.clone(),
            Style::default().fg(theme.error),
        )),
        None => {
            let help = match app.focus.current() {
                FocusPane::ContainerList => "[↑↓/jk] Select  [Tab] Focus logs  [q/Ctrl+Q] Quit",
                FocusPane::LogView => {
                    "[↑↓/jk] Scroll  [PgUp/PgDn] Page  [g/G] Top/Bottom  [Tab] Focus list  [Ctrl+Q] Quit"
                }
            };
            let mut spans = vec![Span::styled(help, Style::default().fg(theme.fg_dim))];
            if !app.is_streaming() {
                spans.push(Span::styled(
                    "  (not streaming)",
                    Style::default().fg(theme.fg_dim),
                ));
            }
            Line::from(spans)
        }
    };

    frame.render_widget(Paragraph::new(line), area);
}
