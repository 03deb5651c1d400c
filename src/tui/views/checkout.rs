// Checkout screen
//
// Spinner while the payment settles, then the receipt with the vend and back
// buttons. The buttons only appear once the vend unlock has elapsed.

use crate::catalog::format_price;
use crate::kiosk::{CheckoutPhase, CheckoutSimulator};
use crate::tui::app::{App, Screen};
use crate::tui::components::formatters::{pluralize_items, truncate};
use crate::tui::hit::{HitMap, HitTarget};
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const VEND_LABEL: &str = " 🚀 Vend Now ";
const BACK_LABEL: &str = " ← Back to Home ";
const PANEL_WIDTH: u16 = 48;

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let spinner = app.spinner_char();
    let App {
        screen,
        theme,
        hits,
        currency,
        ..
    } = app;
    let Screen::Checkout(sim) = screen else {
        return;
    };

    if sim.phase() == CheckoutPhase::Loading {
        let lines = vec![
            Line::from(Span::styled(
                spinner.to_string(),
                Style::default().fg(theme.highlight),
            )),
            Line::raw(""),
            Line::from(Span::styled(
                "Processing Payment...",
                Style::default()
                    .fg(theme.foreground)
                    .add_modifier(Modifier::BOLD),
            )),
        ];
        let block_area = centered(area, PANEL_WIDTH, lines.len() as u16);
        f.render_widget(
            Paragraph::new(lines).alignment(Alignment::Center),
            block_area,
        );
        return;
    }

    render_receipt(f, area, sim, theme, currency, spinner, hits);
}

fn render_receipt(
    f: &mut Frame,
    area: Rect,
    sim: &CheckoutSimulator,
    theme: &Theme,
    currency: &str,
    spinner: char,
    hits: &mut HitMap,
) {
    let phase = sim.phase();
    let receipt = sim.receipt().cloned().unwrap_or_default();
    let inner_width = PANEL_WIDTH.saturating_sub(4) as usize;

    let mut lines = vec![
        Line::from(Span::styled(
            "✅ Payment Successful",
            Style::default()
                .fg(theme.success)
                .add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::from(Span::styled(
            "Your order is being prepared for vending.",
            Style::default().fg(theme.muted),
        ))
        .centered(),
        Line::raw(""),
    ];

    for item in &receipt.lines {
        let label = format!("{} × {}", item.product_name, item.quantity);
        let price = format_price(currency, item.line_total);
        lines.push(spread(&label, &price, inner_width, theme));
    }

    lines.push(Line::from(Span::styled(
        "─".repeat(inner_width),
        Style::default().fg(theme.border),
    )));
    let total = format!("Total: {}", format_price(currency, receipt.total));
    let count = pluralize_items(receipt.item_count());
    lines.push(Line::from(vec![
        Span::styled(count.clone(), Style::default().fg(theme.muted)),
        Span::raw(" ".repeat(inner_width.saturating_sub(count.width() + total.width()))),
        Span::styled(
            total,
            Style::default()
                .fg(theme.price)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::raw(""));

    match phase {
        CheckoutPhase::Paid => lines.push(
            Line::from(Span::styled(
                format!("{} Unlocking vend...", spinner),
                Style::default().fg(theme.muted),
            ))
            .centered(),
        ),
        CheckoutPhase::Vending => lines.push(
            Line::from(Span::styled(
                format!("{} Vending your items...", spinner),
                Style::default()
                    .fg(theme.highlight)
                    .add_modifier(Modifier::BOLD),
            ))
            .centered(),
        ),
        _ => lines.push(Line::raw("")),
    }

    // Receipt, blank line, button row, plus the border
    let height = lines.len() as u16 + 4;
    let panel = centered(area, PANEL_WIDTH, height);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.border))
        .title(" Checkout ");
    let inner = block.inner(panel);
    f.render_widget(block, panel);

    let [receipt_area, _, button_row] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);
    f.render_widget(Paragraph::new(lines), receipt_area);

    // Vend and back only exist once the vend unlock has elapsed
    if phase != CheckoutPhase::VendReady {
        return;
    }

    let vend_width = VEND_LABEL.width() as u16;
    let back_width = BACK_LABEL.width() as u16;
    let gap = 2;
    let total = vend_width + gap + back_width;
    let start = button_row.x + button_row.width.saturating_sub(total) / 2;
    let vend_rect = Rect::new(start, button_row.y, vend_width, 1).intersection(button_row);
    let back_rect =
        Rect::new(start + vend_width + gap, button_row.y, back_width, 1).intersection(button_row);

    f.render_widget(
        Paragraph::new(VEND_LABEL).style(
            Style::default()
                .fg(theme.button_fg)
                .bg(theme.button)
                .add_modifier(Modifier::BOLD),
        ),
        vend_rect,
    );
    f.render_widget(
        Paragraph::new(BACK_LABEL).style(Style::default().fg(theme.foreground)),
        back_rect,
    );

    hits.register(vend_rect, HitTarget::Vend);
    hits.register(back_rect, HitTarget::Back);
}

/// Label on the left, value on the right
fn spread<'a>(label: &str, value: &str, width: usize, theme: &Theme) -> Line<'a> {
    let value_width = value.width();
    let label = truncate(label, width.saturating_sub(value_width + 1));
    let pad = width.saturating_sub(label.width() + value_width);
    Line::from(vec![
        Span::styled(label, Style::default().fg(theme.foreground)),
        Span::raw(" ".repeat(pad)),
        Span::styled(value.to_string(), Style::default().fg(theme.price)),
    ])
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
