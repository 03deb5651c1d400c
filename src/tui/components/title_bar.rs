// Title bar component
//
// Renders the brand, the current screen and a loading indicator while the
// catalog fetch is still running.

use crate::tui::app::{App, Screen};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let screen = match &app.screen {
        Screen::Browser(_) => "Choose up to 3 items",
        Screen::Checkout(_) => "Checkout",
    };

    let loading = if app.catalog_loaded {
        String::new()
    } else {
        format!("  {} loading products", app.spinner_char())
    };

    let title = Paragraph::new(format!(" 🍽️  Wendor+ ──── {}{}", screen, loading))
        .style(
            Style::default()
                .fg(app.theme.title)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(app.theme.title))
                .title_top(Line::from(" ? help ").right_aligned()),
        );

    f.render_widget(title, area);
}
