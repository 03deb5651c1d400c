// Tray screen
//
// Sidebar of tray numbers on the left, the scrollable tray section on the
// right. The whole tray section is drawn into an off-screen buffer as tall
// as its content, and the rows under the scroll offset are copied into the
// frame. Click areas are translated the same way and clipped to the view.

use crate::kiosk::browser::CARD_ROWS;
use crate::kiosk::selector::Affordance;
use crate::kiosk::{trays, TrayBrowser};
use crate::tui::app::{App, Screen};
use crate::tui::components::product_card::{self, CardView};
use crate::tui::components::sidebar;
use crate::tui::hit::{HitMap, HitTarget};
use crate::tui::layout::Breakpoint;
use crate::tui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &mut App) {
    let bp = Breakpoint::from_width(area.width);
    let [sidebar_area, tray_area] = Layout::horizontal([
        Constraint::Length(bp.sidebar_width()),
        Constraint::Min(0),
    ])
    .areas(area);

    let spinner = app.spinner_char();
    let App {
        screen,
        theme,
        hits,
        currency,
        catalog_loaded,
        ..
    } = app;
    let Screen::Browser(browser) = screen else {
        return;
    };

    if sidebar_area.width > 0 {
        sidebar::render(f, sidebar_area, browser.current_tray(), theme, hits);
    }

    if !*catalog_loaded {
        let message = Paragraph::new(format!("{} Loading products...", spinner))
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.muted));
        f.render_widget(message, centered_line(tray_area));
        return;
    }

    // One column of breathing room on each side
    let inner = Rect {
        x: tray_area.x + 1,
        width: tray_area.width.saturating_sub(2),
        ..tray_area
    };
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    browser.layout(bp.cards_per_row(), inner.height as usize);
    hits.register(inner, HitTarget::TrayArea);
    draw_trays(f, inner, browser, theme, currency, hits);
}

fn draw_trays(
    f: &mut Frame,
    area: Rect,
    browser: &TrayBrowser,
    theme: &Theme,
    currency: &str,
    hits: &mut HitMap,
) {
    let geometry = browser.geometry();
    let height = geometry.content_height().min(u16::MAX as usize) as u16;
    let canvas_area = Rect::new(0, 0, area.width, height);
    let mut canvas = Buffer::empty(canvas_area);
    canvas.set_style(canvas_area, Style::default().bg(theme.background));

    let card_width = area.width / geometry.cards_per_row as u16;
    let mut canvas_hits = Vec::new();

    for (tray, region) in browser.trays().iter().zip(&geometry.regions) {
        let top = region.top as u16;

        let count = if tray.is_empty() {
            String::new()
        } else {
            format!("  · {} products", tray.products.len())
        };
        Paragraph::new(Line::from(vec![
            Span::styled(
                format!("Tray {}", tray.number),
                Style::default()
                    .fg(theme.title)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(count, Style::default().fg(theme.muted)),
        ]))
        .render(Rect::new(0, top, area.width, 1), &mut canvas);

        if tray.is_empty() {
            Paragraph::new("No products in this tray")
                .style(Style::default().fg(theme.muted))
                .render(Rect::new(0, top + 1, area.width, 1), &mut canvas);
        }

        for (i, product) in tray.products.iter().enumerate() {
            let index = tray.offset + i;
            let Some((row, col)) = geometry.card_origin(index) else {
                continue;
            };
            let rect = Rect::new(
                col as u16 * card_width,
                row as u16,
                card_width,
                CARD_ROWS as u16,
            );
            let card = CardView {
                index,
                slot: trays::slot_of(index),
                product,
                affordance: browser.affordance(index).unwrap_or(Affordance::Buy { enabled: false }),
                focused: browser.focus() == Some(index),
                currency,
            };
            canvas_hits.extend(product_card::render(&card, rect, &mut canvas, theme));
        }

        let divider_row = region.bottom().saturating_sub(1) as u16;
        Paragraph::new("─".repeat(area.width as usize))
            .style(Style::default().fg(theme.border))
            .render(Rect::new(0, divider_row, area.width, 1), &mut canvas);
    }

    // Copy the visible window of the canvas into the frame
    let offset = browser.scroll_offset() as u16;
    let frame_buf = f.buffer_mut();
    for y in 0..area.height {
        let Some(source_row) = offset.checked_add(y).filter(|row| *row < height) else {
            break;
        };
        for x in 0..area.width {
            if let (Some(source), Some(target)) = (
                canvas.cell((x, source_row)),
                frame_buf.cell_mut((area.x + x, area.y + y)),
            ) {
                *target = source.clone();
            }
        }
    }

    for (rect, target) in canvas_hits {
        if let Some(visible) = visible_rect(rect, offset, area) {
            hits.register(visible, target);
        }
    }
}

/// Screen rect of a canvas rect under the scroll offset, clipped to the view
fn visible_rect(rect: Rect, offset: u16, area: Rect) -> Option<Rect> {
    let top = rect.y.max(offset);
    let bottom = rect.bottom().min(offset.saturating_add(area.height));
    if top >= bottom {
        return None;
    }
    Some(Rect::new(
        area.x + rect.x,
        area.y + (top - offset),
        rect.width,
        bottom - top,
    ))
}

fn centered_line(area: Rect) -> Rect {
    Rect::new(area.x, area.y + area.height / 2, area.width, 1.min(area.height))
}
