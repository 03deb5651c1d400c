// Modal overlay rendering
//
// Modals are rendered on top of the current screen:
// - Help modal: keys and mouse actions
// - Product info modal: description, brand, calories of one product
//
// The whole frame under a modal is a backdrop; clicking it closes the modal.

use crate::catalog::{format_price, Product};
use crate::tui::app::App;
use crate::tui::hit::{HitMap, HitTarget};
use crate::tui::modal::Modal;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const CLOSE_LABEL: &str = " ✕ ";

/// Render a modal dialog as a centered overlay
pub fn render(f: &mut Frame, modal: Modal, app: &mut App) {
    app.hits.register(f.area(), HitTarget::ModalBackdrop);
    match modal {
        Modal::Help => render_help(f, app),
        Modal::ProductInfo(index) => match app.product(index).cloned() {
            Some(product) => {
                render_product_info(f, &product, &app.theme, &app.currency, &mut app.hits)
            }
            // Catalog changed under the modal
            None => app.modal = None,
        },
    }
}

/// Calculate centered rect for modal dialog
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

/// Bordered dialog with a close button in the top-right corner
fn frame_dialog<'a>(
    f: &mut Frame,
    area: Rect,
    title: &'a str,
    theme: &Theme,
    hits: &mut HitMap,
) -> Block<'a> {
    f.render_widget(Clear, area);
    hits.register(area, HitTarget::ModalBody);

    let close_width = CLOSE_LABEL.width() as u16;
    if area.width > close_width + 2 {
        let close = Rect::new(area.right() - close_width - 1, area.y, close_width, 1);
        hits.register(close, HitTarget::ModalClose);
    }

    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.highlight))
        .border_type(theme.border_type)
        .title(format!(" {} ", title))
        .title(Line::from(CLOSE_LABEL).right_aligned())
}

/// Render the help modal overlay
fn render_help(f: &mut Frame, app: &mut App) {
    let theme = &app.theme;
    let key_style = Style::default().fg(theme.highlight);
    let desc_style = Style::default().fg(theme.foreground);
    let header_style = Style::default()
        .fg(theme.title)
        .add_modifier(Modifier::BOLD);

    // "    key         description"
    let kb = |key: &str, desc: &str| -> Line {
        Line::from(vec![
            Span::raw("    "),
            Span::styled(format!("{:<12}", key), key_style),
            Span::styled(desc.to_string(), desc_style),
        ])
    };

    let content = Text::from(vec![
        Line::raw(""),
        Line::from(Span::styled("  Trays", header_style)),
        kb("←/→/↑/↓", "Move between products"),
        kb("Enter, b, +", "Buy / add one more"),
        kb("-, Bksp", "Remove one"),
        kb("1-7", "Jump to tray"),
        kb("PgUp/PgDn", "Scroll trays"),
        kb("i", "Product info"),
        kb("p", "Proceed to checkout"),
        Line::raw(""),
        Line::from(Span::styled("  Checkout", header_style)),
        kb("v, Enter", "Vend now"),
        kb("Esc", "Back to home"),
        Line::raw(""),
        Line::from(Span::styled("  General", header_style)),
        kb("?", "Toggle this help"),
        kb("F12", "Service logs"),
        kb("Ctrl+C", "Quit"),
        Line::raw(""),
        Line::from(Span::styled("  Mouse", header_style)),
        kb("Click", "Buttons, cards, trays"),
        kb("Scroll", "Scroll trays"),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Theme: ", desc_style),
            Span::styled(theme.name.clone(), key_style),
        ]),
    ]);

    let area = centered_rect(44, content.lines.len() as u16 + 2, f.area());
    let block = frame_dialog(f, area, "Help", theme, &mut app.hits)
        .title_bottom(Line::from(" Press ? or Esc to close ").centered());

    let paragraph = Paragraph::new(content)
        .style(Style::default().bg(theme.background))
        .block(block);
    f.render_widget(paragraph, area);
}

fn render_product_info(
    f: &mut Frame,
    product: &Product,
    theme: &Theme,
    currency: &str,
    hits: &mut HitMap,
) {
    let label_style = Style::default().fg(theme.muted);
    let value_style = Style::default().fg(theme.foreground);
    let field = |label: &str, value: String| -> Line {
        Line::from(vec![
            Span::styled(format!("  {:<10}", label), label_style),
            Span::styled(value, value_style),
        ])
    };

    let mut lines = vec![
        Line::raw(""),
        Line::from(Span::styled(
            format!("  {}", product.product_name),
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        field("Brand", product.brand_label().to_string()),
        field("Price", format_price(currency, product.product_price)),
    ];
    if let Some(calories) = &product.calories {
        lines.push(field("Calories", calories.clone()));
    }
    lines.push(field("Image", product.image_uri().to_string()));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        format!("  {}", product.description_label()),
        value_style,
    )));

    let area = centered_rect(52, lines.len() as u16 + 6, f.area());
    let block = frame_dialog(f, area, "Product Info", theme, hits)
        .title_bottom(Line::from(" Esc to close ").centered());

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(theme.background))
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_stays_inside_small_areas() {
        let area = Rect::new(0, 0, 30, 10);
        let rect = centered_rect(44, 20, area);
        assert_eq!(rect, Rect::new(0, 0, 30, 10));

        let rect = centered_rect(10, 4, Rect::new(0, 0, 30, 10));
        assert_eq!(rect, Rect::new(10, 3, 10, 4));
    }
}
