//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! Each iteration draws (when something changed), polls terminal events,
//! drains actions sent back by fetch tasks, and performs the `Effect`
//! each `update()` returns. A `Fetch` effect spawns one tokio task per
//! page; its result comes back over an mpsc channel as `PageLoaded` or
//! `PageFailed`.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the loading row appears promptly.
//! - **Idle**: sleeps up to 500ms and only redraws on events, resizes or
//!   arriving pages.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::{MESSAGE_MAX_LENGTH, ResolvedConfig};
use crate::core::pager::{FetchDirection, PageTicket};
use crate::core::state::App;
use crate::remote::{ChatSource, HttpChatSource};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState, is_retry_key};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(MESSAGE_MAX_LENGTH),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste, Hide);
    }
}

/// What the event loop does after an `Effect`.
enum Flow {
    Continue,
    Quit,
}

fn perform(effect: Effect, app: &App, tui: &mut TuiState, tx: &mpsc::Sender<Action>) -> Flow {
    match effect {
        Effect::None => {}
        Effect::Fetch(ticket) => spawn_fetch(app.source.clone(), ticket, tx.clone()),
        Effect::ScrollToNewest => tui.message_list.scroll_to_newest(),
        Effect::Quit => return Flow::Quit,
    }
    Flow::Continue
}

/// Requests the next older page once the list has scrolled near its top.
/// Paused while the alert is open or after the last page.
fn maybe_backfill(app: &mut App, tui: &TuiState) -> Effect {
    if tui.message_list.end_reached && app.alert.is_none() && app.pager.has_more() {
        update(app, Action::RequestPage(FetchDirection::Backfill))
    } else {
        Effect::None
    }
}

/// Routes one terminal event. Returns the action it produced, if any.
fn route_event(event: &TuiEvent, app: &App, tui: &mut TuiState) -> Option<Action> {
    // Ctrl+C always quits, even with the alert open
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }

    // The alert is modal and only offers Retry
    if app.alert.is_some() {
        return is_retry_key(event).then_some(Action::RetryFetch);
    }

    match event {
        TuiEvent::Escape => Some(Action::Quit),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToNewest => {
            tui.message_list.handle_event(event);
            None
        }
        _ => match tui.input_box.handle_event(event)? {
            InputEvent::Submit(text) => Some(Action::Send(text)),
            InputEvent::ContentChanged => None,
        },
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let source = Arc::new(HttpChatSource::new(&config.base_url, &config.chat_path));
    info!("Chat source: {}", source.describe());
    let mut app = App::new(source);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from fetch tasks
    let (tx, rx) = mpsc::channel();

    // Initial load
    let effect = update(&mut app, Action::RequestPage(FetchDirection::Forward));
    perform(effect, &app, &mut tui, &tx);

    let mut needs_redraw = true; // Force first frame

    'main: loop {
        let loading = app.pager.is_busy();
        if loading {
            needs_redraw = true;
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;

            let effect = maybe_backfill(&mut app, &tui);
            perform(effect, &app, &mut tui, &tx);
        }

        let timeout = if loading {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain all pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            if let Some(action) = route_event(&event, &app, &mut tui) {
                let effect = update(&mut app, action);
                if let Flow::Quit = perform(effect, &app, &mut tui, &tx) {
                    break 'main;
                }
            }
        }

        // Results from fetch tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut app, action);
            if let Flow::Quit = perform(effect, &app, &mut tui, &tx) {
                break 'main;
            }
        }
    }

    info!("Shutting down ({} messages in feed)", app.feed.len());
    ratatui::restore();
    Ok(())
}

/// Fetches the ticket's page on a tokio task and reports back over `tx`.
fn spawn_fetch(source: Arc<dyn ChatSource>, ticket: PageTicket, tx: mpsc::Sender<Action>) {
    info!(
        "Spawning fetch: page {} ({})",
        ticket.page(),
        ticket.direction().label()
    );
    tokio::spawn(async move {
        let action = match source.fetch_page(ticket.page()).await {
            Ok(page) => Action::PageLoaded { ticket, page },
            Err(error) => Action::PageFailed { ticket, error },
        };
        if tx.send(action).is_err() {
            warn!("Failed to send fetch result: receiver dropped");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::{FETCH_FAILED_MESSAGE, FetchAlert};
    use crate::remote::FetchError;
    use crate::test_support::{ScriptedSource, chat, page_of};

    fn app_with(source: Arc<ScriptedSource>) -> App {
        App::new(source)
    }

    async fn recv(rx: &mpsc::Receiver<Action>) -> Action {
        for _ in 0..200 {
            if let Ok(action) = rx.try_recv() {
                return action;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("no action received");
    }

    #[tokio::test]
    async fn test_spawn_fetch_sends_page_loaded() {
        let source = Arc::new(ScriptedSource::default());
        source.push(Ok(page_of(vec![chat("a")])));
        let mut app = app_with(source.clone());
        let Effect::Fetch(ticket) = update(&mut app, Action::RequestPage(FetchDirection::Forward))
        else {
            panic!("expected Fetch");
        };

        let (tx, rx) = mpsc::channel();
        spawn_fetch(app.source.clone(), ticket, tx);

        let action = recv(&rx).await;
        assert!(matches!(action, Action::PageLoaded { .. }));
        update(&mut app, action);
        assert_eq!(app.feed.len(), 1);
        assert_eq!(*source.requested.lock().unwrap(), vec![0]);
        assert!(!app.pager.is_busy());
    }

    #[tokio::test]
    async fn test_spawn_fetch_sends_page_failed() {
        let source = Arc::new(ScriptedSource::default());
        source.push(Err(FetchError::Network("connection refused".to_string())));
        let mut app = app_with(source);
        let Effect::Fetch(ticket) = update(&mut app, Action::RequestPage(FetchDirection::Forward))
        else {
            panic!("expected Fetch");
        };

        let (tx, rx) = mpsc::channel();
        spawn_fetch(app.source.clone(), ticket, tx);

        let action = recv(&rx).await;
        update(&mut app, action);
        assert!(app.alert.is_some());
        assert_eq!(app.pager.page(), 0);
        assert!(!app.pager.is_busy());
    }

    #[tokio::test]
    async fn test_failed_initial_load_can_always_be_retried() {
        let source = Arc::new(ScriptedSource::default());
        source.push(Err(FetchError::Network("connection refused".to_string())));
        source.push(Ok(page_of(vec![chat("a")])));
        let mut app = app_with(source.clone());
        let mut tui = TuiState::new();
        let (tx, rx) = mpsc::channel();

        let effect = update(&mut app, Action::RequestPage(FetchDirection::Forward));
        perform(effect, &app, &mut tui, &tx);
        let action = recv(&rx).await;
        update(&mut app, action);
        assert!(app.alert.is_some());
        assert!(app.feed.is_empty());

        // Esc cannot close the alert and leave an empty feed behind
        assert!(route_event(&TuiEvent::Escape, &app, &mut tui).is_none());
        assert!(app.alert.is_some());

        let retry = route_event(&TuiEvent::Submit, &app, &mut tui).unwrap();
        let effect = update(&mut app, retry);
        perform(effect, &app, &mut tui, &tx);
        let action = recv(&rx).await;
        update(&mut app, action);

        assert_eq!(*source.requested.lock().unwrap(), vec![0, 0]);
        assert_eq!(app.feed.len(), 1);
        assert!(app.alert.is_none());
    }

    #[test]
    fn test_backfill_waits_for_end_reached() {
        let mut app = crate::test_support::test_app();
        let tui = TuiState::new();
        assert!(matches!(maybe_backfill(&mut app, &tui), Effect::None));
        assert!(!app.pager.is_busy());
    }

    #[test]
    fn test_backfill_requested_at_end_reached() {
        let mut app = crate::test_support::test_app();
        let mut tui = TuiState::new();
        tui.message_list.end_reached = true;
        match maybe_backfill(&mut app, &tui) {
            Effect::Fetch(ticket) => assert_eq!(ticket.direction(), FetchDirection::Backfill),
            other => panic!("expected Fetch, got {other:?}"),
        }
    }

    #[test]
    fn test_backfill_paused_while_alert_open() {
        let mut app = crate::test_support::test_app();
        app.alert = Some(FetchAlert {
            direction: FetchDirection::Backfill,
            message: FETCH_FAILED_MESSAGE.to_string(),
            detail: String::new(),
        });
        let mut tui = TuiState::new();
        tui.message_list.end_reached = true;
        assert!(matches!(maybe_backfill(&mut app, &tui), Effect::None));
        assert!(!app.pager.is_busy());
    }

    #[test]
    fn test_backfill_stops_after_last_page() {
        let mut app = crate::test_support::test_app();
        let Effect::Fetch(ticket) = update(&mut app, Action::RequestPage(FetchDirection::Forward))
        else {
            panic!("expected Fetch");
        };
        update(
            &mut app,
            Action::PageLoaded {
                ticket,
                page: page_of(vec![chat("a")]),
            },
        );
        assert!(!app.pager.has_more());

        let mut tui = TuiState::new();
        tui.message_list.end_reached = true;
        assert!(matches!(maybe_backfill(&mut app, &tui), Effect::None));
    }

    #[test]
    fn test_route_escape_quits_without_alert() {
        let app = crate::test_support::test_app();
        let mut tui = TuiState::new();
        assert!(matches!(
            route_event(&TuiEvent::Escape, &app, &mut tui),
            Some(Action::Quit)
        ));
    }

    #[test]
    fn test_route_alert_is_modal() {
        let mut app = crate::test_support::test_app();
        app.alert = Some(FetchAlert {
            direction: FetchDirection::Backfill,
            message: FETCH_FAILED_MESSAGE.to_string(),
            detail: String::new(),
        });
        let mut tui = TuiState::new();

        assert!(route_event(&TuiEvent::Escape, &app, &mut tui).is_none());
        assert!(matches!(
            route_event(&TuiEvent::Submit, &app, &mut tui),
            Some(Action::RetryFetch)
        ));
        // Typing does not reach the input box
        assert!(route_event(&TuiEvent::InputChar('x'), &app, &mut tui).is_none());
        assert!(tui.input_box.buffer.is_empty());
        assert!(matches!(
            route_event(&TuiEvent::ForceQuit, &app, &mut tui),
            Some(Action::Quit)
        ));
    }

    #[test]
    fn test_route_submit_sends_text() {
        let app = crate::test_support::test_app();
        let mut tui = TuiState::new();
        for c in "hi".chars() {
            assert!(route_event(&TuiEvent::InputChar(c), &app, &mut tui).is_none());
        }
        match route_event(&TuiEvent::Submit, &app, &mut tui) {
            Some(Action::Send(text)) => assert_eq!(text, "hi"),
            other => panic!("expected Send, got {other:?}"),
        }
    }

    #[test]
    fn test_perform_scroll_to_newest_repins() {
        let app = crate::test_support::test_app();
        let mut tui = TuiState::new();
        tui.message_list.stick_to_bottom = false;
        let (tx, _rx) = mpsc::channel();
        assert!(matches!(
            perform(Effect::ScrollToNewest, &app, &mut tui, &tx),
            Flow::Continue
        ));
        assert!(tui.message_list.stick_to_bottom);
    }
}
