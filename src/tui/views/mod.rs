// Views module - screen-level rendering logic
//
// Each view fills the body between the title bar and the footer:
// - Browser: tray sidebar and the scrollable tray section
// - Checkout: payment spinner, receipt, vend and back buttons
//
// Overlays are drawn after the view in this order: modal, toast,
// screensaver. The hit map is rebuilt on every frame in the same order, so
// whatever is drawn on top also receives the click.

mod browser;
mod checkout;
mod modal;

use super::app::{App, Screen};
use crate::tui::components::{logs_panel, screensaver, status_bar, title_bar};
use ratatui::layout::{Constraint, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

/// Height of the service log panel when shown
const LOGS_HEIGHT: u16 = 12;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    app.hits.clear();

    let bg_block = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg_block, f.area());

    let (main, logs) = if app.show_logs {
        let [main, logs] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(LOGS_HEIGHT)]).areas(f.area());
        (main, Some(logs))
    } else {
        (f.area(), None)
    };

    let [title, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(2),
    ])
    .areas(main);

    title_bar::render(f, title, app);
    if matches!(app.screen, Screen::Browser(_)) {
        browser::render(f, body, app);
    } else {
        checkout::render(f, body, app);
    }
    status_bar::render(f, footer, app);
    if let Some(area) = logs {
        logs_panel::render(f, area, app);
    }

    if let Some(modal) = app.modal {
        modal::render(f, modal, app);
    }

    if let Some(toast) = &app.toast {
        toast.render(f, main, &app.theme);
    }

    if app.screensaver.is_idle() {
        // Nothing under the overlay is clickable
        app.hits.clear();
        screensaver::render(f, f.area(), &app.theme, app.frame());
    }
}
