// Sidebar component
//
// One entry per tray. The current tray (clicked, or topmost on screen) is
// highlighted; clicking an entry jumps to that tray.

use crate::kiosk::trays::TRAY_COUNT;
use crate::tui::hit::{HitMap, HitTarget};
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, current_tray: usize, theme: &Theme, hits: &mut HitMap) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Spread entries out when there is room, for bigger touch targets
    let pitch = if inner.height as usize >= TRAY_COUNT * 2 { 2 } else { 1 };

    for number in 1..=TRAY_COUNT {
        let y = inner.y + ((number - 1) * pitch) as u16;
        if y >= inner.bottom() {
            break;
        }
        let entry = Rect::new(inner.x, y, inner.width, 1);
        let style = if number == current_tray {
            Style::default()
                .fg(theme.button_fg)
                .bg(theme.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.foreground)
        };
        f.render_widget(
            Paragraph::new(format!("Tray {}", number))
                .alignment(Alignment::Center)
                .style(style),
            entry,
        );
        hits.register(entry, HitTarget::Tray(number));
    }
}
