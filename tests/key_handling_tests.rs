//! Key handling tests
//!
//! Drive [`App::handle_key`] the way the event loop does.

mod common;

use common::{containers, FakeRuntime};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dlogview::ui::theme::Theme;
use dlogview::ui::{App, FocusPane};
use std::sync::Arc;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::empty())
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

async fn started_app() -> App<FakeRuntime> {
    let mut app = App::new(containers(), Arc::new(FakeRuntime::new()), Theme::default_theme())
        .expect("app");
    app.start().await;
    app
}

#[tokio::test]
async fn test_vim_keys_navigate_container_list() {
    let mut app = started_app().await;

    assert!(app.handle_key(key(KeyCode::Char('j'))).await);
    assert_eq!(app.selection.current().map(|c| c.id.as_str()), Some("db"));
    assert!(app.handle_key(key(KeyCode::Char('k'))).await);
    assert!(app.handle_key(key(KeyCode::Char('k'))).await);
    assert_eq!(app.selection.current().map(|c| c.id.as_str()), Some("cache"));
    assert_eq!(app.session.active_container(), Some("cache"));
    app.shutdown().await;
}

#[tokio::test]
async fn test_tab_toggles_focus() {
    let mut app = started_app().await;

    assert!(app.handle_key(key(KeyCode::Tab)).await);
    assert_eq!(app.focus.current(), FocusPane::LogView);
    assert!(app.handle_key(key(KeyCode::Tab)).await);
    assert_eq!(app.focus.current(), FocusPane::ContainerList);
    app.shutdown().await;
}

#[tokio::test]
async fn test_q_quits_only_from_container_list() {
    let mut app = started_app().await;

    app.handle_key(key(KeyCode::Tab)).await;
    app.handle_key(key(KeyCode::Char('q'))).await;
    assert!(!app.should_quit);

    app.handle_key(key(KeyCode::Tab)).await;
    assert!(app.handle_key(key(KeyCode::Char('q'))).await);
    assert!(app.should_quit);
    app.shutdown().await;
}

#[tokio::test]
async fn test_ctrl_c_quits_from_any_pane() {
    let mut app = started_app().await;
    app.handle_key(key(KeyCode::Tab)).await;

    assert!(app.handle_key(ctrl('c')).await);
    assert!(app.should_quit);
    app.shutdown().await;
}

#[tokio::test]
async fn test_unmapped_key_is_ignored() {
    let mut app = started_app().await;

    assert!(!app.handle_key(key(KeyCode::Char('x'))).await);
    assert_eq!(app.session.generation(), 1);
    assert!(!app.should_quit);
    app.shutdown().await;
}
