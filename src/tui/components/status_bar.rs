// Status bar component
//
// Footer of the tray screen: how much of the cart limit is used and the
// Proceed button. On checkout it only shows which keys do what.

use crate::kiosk::{CheckoutPhase, MAX_CART_ITEMS};
use crate::tui::app::{App, Screen};
use crate::tui::hit::{HitMap, HitTarget};
use crate::tui::layout::Breakpoint;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const PROCEED_LABEL: &str = " Proceed ▶ ";

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let App {
        screen,
        theme,
        hits,
        ..
    } = app;

    match screen {
        Screen::Browser(browser) => {
            render_cart_summary(f, area, browser.aggregate(), theme, hits);
        }
        Screen::Checkout(sim) => {
            let hint = match sim.phase() {
                CheckoutPhase::VendReady => " v/Enter vend │ Esc back",
                CheckoutPhase::Loading => " Please wait while we confirm your payment",
                _ => " Please wait",
            };
            let status = Paragraph::new(hint)
                .style(Style::default().fg(theme.status_bar))
                .block(Block::default().borders(Borders::TOP));
            f.render_widget(status, area);
        }
    }
}

fn render_cart_summary(f: &mut Frame, area: Rect, selected: u32, theme: &Theme, hits: &mut HitMap) {
    let enabled = selected > 0;
    let summary = format!(" {}/{} item(s) selected", selected, MAX_CART_ITEMS);

    let hint = if Breakpoint::from_width(area.width).at_least(Breakpoint::Wide) {
        "   ←↑↓→ move │ Enter buy │ - remove │ 1-7 tray │ i info"
    } else {
        ""
    };

    let left = Paragraph::new(Line::from(vec![
        Span::styled(summary, Style::default().fg(theme.foreground)),
        Span::styled(hint, Style::default().fg(theme.muted)),
    ]))
    .block(Block::default().borders(Borders::TOP));
    f.render_widget(left, area);

    // Proceed button, right-aligned on the text row
    let width = PROCEED_LABEL.chars().count() as u16;
    if area.height < 2 || area.width < width + 2 {
        return;
    }
    let button = Rect::new(area.right() - width - 1, area.y + 1, width, 1);
    let style = if enabled {
        Style::default()
            .fg(theme.button_fg)
            .bg(theme.button)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.background).bg(theme.disabled)
    };
    f.render_widget(Paragraph::new(PROCEED_LABEL).style(style), button);
    if enabled {
        hits.register(button, HitTarget::Proceed);
    }
}
