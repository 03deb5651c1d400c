// TUI module - Terminal User Interface
//
// This module manages the kiosk UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - Event loop (keyboard and mouse input, animation ticks, app events)
// - Rendering the UI
//
// Every input is first reported to the screensaver. Input that wakes the
// kiosk is consumed there and never reaches the screen underneath.

pub mod app;
pub mod components;
pub mod hit;
pub mod layout;
pub mod modal;
pub mod theme;
pub mod views;

use crate::config::Config;
use crate::events::{AppEvent, InputSignal};
use crate::kiosk::TrayBrowser;
use crate::logging::LogBuffer;
use anyhow::{Context, Result};
use app::{App, Screen};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use hit::HitTarget;
use modal::ModalAction;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Rows scrolled per wheel notch
const WHEEL_STEP: isize = 3;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop and restores the terminal
/// when done, whether or not the loop failed.
pub async fn run_tui(
    tx: mpsc::UnboundedSender<AppEvent>,
    mut event_rx: mpsc::UnboundedReceiver<AppEvent>,
    log_buffer: LogBuffer,
    config: Config,
) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(&config, log_buffer, tx);
    tracing::info!(
        "Kiosk started (theme: {}, idle after {:?})",
        app.theme.name,
        app.screensaver.threshold()
    );

    let result = run_event_loop(&mut terminal, &mut app, &mut event_rx).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources with tokio::select!:
/// 1. Terminal input (keyboard and mouse)
/// 2. Animation ticks (spinners, smooth scrolling, toast expiry)
/// 3. App events (catalog fetch, checkout delays, idle timer)
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::UnboundedReceiver<AppEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| views::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key_event)) => handle_key_event(app, key_event),
                        Ok(Event::Mouse(mouse_event)) => handle_mouse_event(app, mouse_event),
                        _ => {}
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick();
            }

            Some(app_event) = event_rx.recv() => {
                app.handle_event(app_event);
            }
        }

        if app.should_quit {
            tracing::info!("Kiosk shutting down");
            break;
        }
    }

    Ok(())
}

/// Activity class of a mouse event, if it counts as activity
fn mouse_signal(kind: MouseEventKind) -> Option<InputSignal> {
    match kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(InputSignal::PointerMove),
        MouseEventKind::Down(_) | MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
            Some(InputSignal::PointerPress)
        }
        _ => None,
    }
}

/// Handle keyboard input
/// Layered dispatch: Screensaver → Modal → Global → Screen
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    // Ctrl+C always quits, even from the screensaver
    if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL)
    {
        app.should_quit = true;
        return;
    }

    // Layer 0: the screensaver swallows the waking key
    if !app.activity(InputSignal::KeyPress) {
        return;
    }

    // Layer 1: Modal captures all input when active
    if let Some(modal) = app.modal {
        if modal.handle_input(key_event.code) == ModalAction::Close {
            app.modal = None;
        }
        return;
    }

    // Layer 2: Global keys
    if handle_global_keys(app, key_event.code) {
        return;
    }

    // Layer 3: Screen keys
    if matches!(app.screen, Screen::Browser(_)) {
        handle_browser_keys(app, key_event.code);
    } else {
        handle_checkout_keys(app, key_event.code);
    }
}

/// Keys that work the same on every screen
fn handle_global_keys(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::F(12) => app.toggle_logs(),
        KeyCode::Char('?') => app.toggle_help(),
        _ => return false,
    }
    true
}

fn handle_browser_keys(app: &mut App, key: KeyCode) {
    if key == KeyCode::Char('p') {
        app.proceed();
        return;
    }
    if key == KeyCode::Char('i') {
        if let Some(index) = app.browser().and_then(|b| b.focus()) {
            app.open_product_info(index);
        }
        return;
    }

    let Some(browser) = app.browser_mut() else {
        return;
    };
    match key {
        KeyCode::Right | KeyCode::Tab => browser.focus_next(),
        KeyCode::Left | KeyCode::BackTab => browser.focus_prev(),
        KeyCode::Down => browser.focus_down(),
        KeyCode::Up => browser.focus_up(),
        KeyCode::Enter | KeyCode::Char('b') | KeyCode::Char('+') => {
            browser.add_focused();
        }
        KeyCode::Char('-') | KeyCode::Backspace => {
            browser.remove_focused();
        }
        KeyCode::Char(c @ '1'..='7') => {
            if let Some(number) = c.to_digit(10) {
                browser.click_tray(number as usize);
            }
        }
        KeyCode::PageDown => {
            let step = page_step(browser);
            browser.scroll_by(step);
        }
        KeyCode::PageUp => {
            let step = page_step(browser);
            browser.scroll_by(-step);
        }
        _ => {}
    }
}

/// Most of a viewport, keeping one row of context
fn page_step(browser: &TrayBrowser) -> isize {
    browser.viewport_height().saturating_sub(1).max(1) as isize
}

fn handle_checkout_keys(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Char('v') | KeyCode::Enter => app.vend(),
        KeyCode::Esc => app.back(),
        _ => {}
    }
}

/// Handle mouse input
fn handle_mouse_event(app: &mut App, mouse_event: MouseEvent) {
    let Some(signal) = mouse_signal(mouse_event.kind) else {
        return;
    };
    if !app.activity(signal) {
        return;
    }

    let target = app.hits.target_at(mouse_event.column, mouse_event.row);
    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(target) = target {
                app.click(target);
            }
        }
        MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
            if app.modal.is_some() {
                return;
            }
            let delta = if mouse_event.kind == MouseEventKind::ScrollUp {
                -WHEEL_STEP
            } else {
                WHEEL_STEP
            };
            // Anywhere over the trays, cards included
            let over_trays = matches!(
                target,
                Some(
                    HitTarget::TrayArea
                        | HitTarget::Card(_)
                        | HitTarget::Buy(_)
                        | HitTarget::Increment(_)
                        | HitTarget::Decrement(_)
                        | HitTarget::Info(_)
                )
            );
            if over_trays {
                if let Some(browser) = app.browser_mut() {
                    browser.scroll_by(delta);
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kiosk::test_support::products;
    use crate::kiosk::CheckoutPhase;
    use crate::tui::modal::Modal;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn test_app() -> (App, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut app = App::new(&Config::default(), LogBuffer::new(), tx);
        app.handle_event(AppEvent::CatalogLoaded(products(10)));
        (app, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn enter_buys_then_adds_to_focused_product() {
        let (mut app, _rx) = test_app();
        handle_key_event(&mut app, press(KeyCode::Right));
        handle_key_event(&mut app, press(KeyCode::Enter));
        handle_key_event(&mut app, press(KeyCode::Char('+')));

        let browser = app.browser().unwrap();
        assert_eq!(browser.focus(), Some(1));
        assert_eq!(browser.cart().quantity("p2"), 2);

        handle_key_event(&mut app, press(KeyCode::Backspace));
        assert_eq!(app.browser().unwrap().cart().quantity("p2"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn modal_absorbs_keys_until_closed() {
        let (mut app, _rx) = test_app();
        handle_key_event(&mut app, press(KeyCode::Char('i')));
        assert_eq!(app.modal, Some(Modal::ProductInfo(0)));

        handle_key_event(&mut app, press(KeyCode::Enter));
        assert_eq!(app.modal, None);
        assert_eq!(app.browser().unwrap().aggregate(), 0);

        handle_key_event(&mut app, press(KeyCode::Char('?')));
        handle_key_event(&mut app, press(KeyCode::Char('b')));
        assert_eq!(app.modal, Some(Modal::Help));
        assert_eq!(app.browser().unwrap().aggregate(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn proceed_key_opens_checkout_only_with_items() {
        let (mut app, _rx) = test_app();
        handle_key_event(&mut app, press(KeyCode::Char('p')));
        assert!(app.browser().is_some());

        handle_key_event(&mut app, press(KeyCode::Char('b')));
        handle_key_event(&mut app, press(KeyCode::Char('p')));
        assert_eq!(app.checkout().unwrap().phase(), CheckoutPhase::Loading);

        // Not yet vend-ready: both keys are ignored
        handle_key_event(&mut app, press(KeyCode::Char('v')));
        handle_key_event(&mut app, press(KeyCode::Esc));
        assert_eq!(app.checkout().unwrap().phase(), CheckoutPhase::Loading);
    }

    #[tokio::test(start_paused = true)]
    async fn ctrl_c_quits() {
        let (mut app, _rx) = test_app();
        let mut key = press(KeyCode::Char('c'));
        key.modifiers = KeyModifiers::CONTROL;
        handle_key_event(&mut app, key);
        assert!(app.should_quit);
    }

    #[tokio::test(start_paused = true)]
    async fn click_resolves_through_hit_map() {
        let (mut app, _rx) = test_app();
        app.hits
            .register(ratatui::layout::Rect::new(0, 0, 5, 1), HitTarget::Buy(2));
        handle_mouse_event(
            &mut app,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column: 2,
                row: 0,
                modifiers: KeyModifiers::NONE,
            },
        );
        assert_eq!(app.browser().unwrap().cart().quantity("p3"), 1);
    }

    #[test]
    fn release_and_scroll_classify_as_activity_or_not() {
        assert_eq!(
            mouse_signal(MouseEventKind::Moved),
            Some(InputSignal::PointerMove)
        );
        assert_eq!(
            mouse_signal(MouseEventKind::Down(MouseButton::Left)),
            Some(InputSignal::PointerPress)
        );
        assert_eq!(mouse_signal(MouseEventKind::Up(MouseButton::Left)), None);
    }
}
