// Product card component
//
// A bordered card: slot badge and info marker on the top border, then the
// product name, the brand, and either a Buy button or a quantity stepper.
//
// Cards are drawn into the off-screen tray canvas, so this renders into a
// plain Buffer and hands back its clickable areas in canvas coordinates.

use super::formatters::truncate;
use crate::catalog::{format_price, Product};
use crate::kiosk::selector::Affordance;
use crate::tui::hit::HitTarget;
use crate::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

const INFO_MARKER: &str = " ⓘ ";

pub struct CardView<'a> {
    /// Catalog index
    pub index: usize,
    /// 1-based slot within the tray
    pub slot: usize,
    pub product: &'a Product,
    pub affordance: Affordance,
    pub focused: bool,
    pub currency: &'a str,
}

/// Draw the card and return its clickable areas, topmost last
pub fn render(card: &CardView<'_>, area: Rect, buf: &mut Buffer, theme: &Theme) -> Vec<(Rect, HitTarget)> {
    let mut hits = vec![(area, HitTarget::Card(card.index))];

    let border_style = if card.focused {
        Style::default()
            .fg(theme.highlight)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.border)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(border_style)
        .title(format!(" {} ", card.slot))
        .title_top(Line::from(INFO_MARKER).right_aligned());
    let inner = block.inner(area);
    block.render(area, buf);

    let info_width = INFO_MARKER.width() as u16;
    if area.width > info_width + 2 {
        hits.push((
            Rect::new(area.right() - info_width - 1, area.y, info_width, 1),
            HitTarget::Info(card.index),
        ));
    }

    if inner.height == 0 || inner.width == 0 {
        return hits;
    }
    let width = inner.width as usize;

    let mut lines = vec![
        Line::styled(
            truncate(&card.product.product_name, width),
            Style::default()
                .fg(theme.foreground)
                .add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            truncate(card.product.brand_label(), width),
            Style::default().fg(theme.muted),
        ),
    ];

    let button_row = inner.y + lines.len() as u16;
    let (controls, control_hits) = controls(card, inner.x, button_row, theme);
    lines.push(controls);
    if button_row < inner.bottom() {
        hits.extend(control_hits);
    }

    let body = Paragraph::new(lines).style(if card.focused {
        Style::default().bg(theme.selection)
    } else {
        Style::default()
    });
    body.render(inner, buf);
    hits
}

/// Buy button or stepper for the card's current affordance
fn controls(card: &CardView<'_>, x: u16, y: u16, theme: &Theme) -> (Line<'static>, Vec<(Rect, HitTarget)>) {
    let active = Style::default()
        .fg(theme.button_fg)
        .bg(theme.button)
        .add_modifier(Modifier::BOLD);
    let inactive = Style::default().fg(theme.background).bg(theme.disabled);

    match card.affordance {
        Affordance::Buy { enabled } => {
            let label = format!(
                " Buy {} ",
                format_price(card.currency, card.product.product_price)
            );
            let hit = Rect::new(x, y, label.width() as u16, 1);
            let style = if enabled { active } else { inactive };
            let hits = if enabled {
                vec![(hit, HitTarget::Buy(card.index))]
            } else {
                Vec::new()
            };
            (Line::from(Span::styled(label, style)), hits)
        }
        Affordance::Stepper {
            quantity,
            can_increment,
        } => {
            let minus = " − ";
            let count = format!(" {} ", quantity);
            let plus = " + ";

            let minus_rect = Rect::new(x, y, minus.width() as u16, 1);
            let plus_x = x + (minus.width() + count.width()) as u16;
            let plus_rect = Rect::new(plus_x, y, plus.width() as u16, 1);

            let mut hits = vec![(minus_rect, HitTarget::Decrement(card.index))];
            if can_increment {
                hits.push((plus_rect, HitTarget::Increment(card.index)));
            }

            let line = Line::from(vec![
                Span::styled(minus, active),
                Span::styled(
                    count,
                    Style::default()
                        .fg(theme.foreground)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(plus, if can_increment { active } else { inactive }),
            ]);
            (line, hits)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kiosk::test_support::product;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (buf.area.x..buf.area.right())
            .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
            .collect()
    }

    #[test]
    fn buy_card_renders_price_and_button_hit() {
        let p = product("p1", 20.0);
        let card = CardView {
            index: 4,
            slot: 5,
            product: &p,
            affordance: Affordance::Buy { enabled: true },
            focused: false,
            currency: "₹",
        };
        let area = Rect::new(0, 0, 24, 5);
        let mut buf = Buffer::empty(area);
        let hits = render(&card, area, &mut buf, &Theme::light());

        assert!(row_text(&buf, 0).contains(" 5 "));
        assert!(row_text(&buf, 1).contains("p1 item"));
        assert!(row_text(&buf, 2).contains("N/A"));
        assert!(row_text(&buf, 3).contains("Buy ₹20"));
        assert!(hits.contains(&(Rect::new(1, 3, 9, 1), HitTarget::Buy(4))));
        assert!(hits.iter().any(|(_, t)| *t == HitTarget::Info(4)));
    }

    #[test]
    fn full_cart_disables_buy_and_increment() {
        let p = product("p1", 20.0);
        let mut card = CardView {
            index: 0,
            slot: 1,
            product: &p,
            affordance: Affordance::Buy { enabled: false },
            focused: true,
            currency: "₹",
        };
        let area = Rect::new(0, 0, 24, 5);
        let mut buf = Buffer::empty(area);
        let hits = render(&card, area, &mut buf, &Theme::light());
        assert!(!hits.iter().any(|(_, t)| matches!(t, HitTarget::Buy(_))));

        card.affordance = Affordance::Stepper {
            quantity: 3,
            can_increment: false,
        };
        let hits = render(&card, area, &mut buf, &Theme::light());
        assert!(row_text(&buf, 3).contains(" 3 "));
        assert!(hits.iter().any(|(_, t)| *t == HitTarget::Decrement(0)));
        assert!(!hits.iter().any(|(_, t)| *t == HitTarget::Increment(0)));
    }
}
