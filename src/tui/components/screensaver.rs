// Screensaver overlay
//
// Covers the whole screen while the kiosk is idle. Any input dismisses it;
// that is handled before dispatch, so nothing here registers click areas.

use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Clear, Paragraph},
    Frame,
};

/// Logo asset shown on the screensaver
pub const LOGO_ASSET: &str = "/logo.png";

pub fn render(f: &mut Frame, area: Rect, theme: &Theme, frame: usize) {
    f.render_widget(Clear, area);
    f.render_widget(
        Block::default().style(Style::default().bg(theme.background)),
        area,
    );

    let [_, content, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Fill(1),
    ])
    .areas(area);

    // Slow pulse on the call to action
    let prompt_style = if (frame / 4) % 2 == 0 {
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.title)
    };

    let lines = vec![
        Line::styled(format!("[ {} ]", LOGO_ASSET), Style::default().fg(theme.muted)),
        Line::styled(
            "🍽️  Wendor+",
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
        Line::styled("Touch to Start", prompt_style),
    ];

    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        content,
    );
}
