//! Tray browser - the home screen of the kiosk
//!
//! Owns everything for one shopping session:
//! - the cart (the only writer) and one [`ItemSelector`] per presented product
//! - the tray geometry of the scrollable tray section
//! - the visibility observer that decides which tray the sidebar highlights
//! - a focused-card cursor for keyboard operation
//!
//! The browser is deliberately unaware of the terminal. The UI tells it how
//! many cards fit in a row and how tall the viewport is; it answers with row
//! positions and reacts to scrolling.

use super::cart::{Cart, QuantityChange};
use super::handoff::CheckoutHandoff;
use super::selector::{Affordance, ItemSelector};
use super::trays::{self, Tray, TRAY_CAPACITY, TRAY_COUNT, TRAY_SIZE};
use super::visibility::{Region, Viewport, VisibilityObserver, VISIBILITY_THRESHOLD};
use crate::catalog::{Product, SharedCatalog};
use std::sync::Arc;

/// Rows taken by a tray's "Tray N" heading
pub const TRAY_HEADER_ROWS: usize = 1;
/// Rows taken by one product card
pub const CARD_ROWS: usize = 5;
/// Rows taken by the divider under each tray
pub const TRAY_DIVIDER_ROWS: usize = 1;
/// Body rows of a tray with no products
pub const EMPTY_TRAY_ROWS: usize = 1;

/// Row layout of the tray section for a given card width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrayGeometry {
    pub cards_per_row: usize,
    /// One region per tray, in tray order
    pub regions: Vec<Region>,
}

impl TrayGeometry {
    pub fn compute(trays: &[Tray<'_>], cards_per_row: usize) -> Self {
        let cards_per_row = cards_per_row.max(1);
        let mut top = 0;
        let regions = trays
            .iter()
            .map(|tray| {
                let body = if tray.is_empty() {
                    EMPTY_TRAY_ROWS
                } else {
                    tray.products.len().div_ceil(cards_per_row) * CARD_ROWS
                };
                let region = Region::new(top, TRAY_HEADER_ROWS + body + TRAY_DIVIDER_ROWS);
                top = region.bottom();
                region
            })
            .collect();
        Self {
            cards_per_row,
            regions,
        }
    }

    pub fn content_height(&self) -> usize {
        self.regions.last().map(Region::bottom).unwrap_or(0)
    }

    /// Top row and column of the card for the product at `index`
    pub fn card_origin(&self, index: usize) -> Option<(usize, usize)> {
        let tray = trays::tray_of(index)?;
        let region = self.regions.get(tray - 1)?;
        let local = index % TRAY_SIZE;
        let row = local / self.cards_per_row;
        let col = local % self.cards_per_row;
        Some((region.top + TRAY_HEADER_ROWS + row * CARD_ROWS, col))
    }
}

/// Scroll position of the tray section, with an optional smooth-scroll goal
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ScrollState {
    offset: usize,
    target: Option<usize>,
    /// Set while scrolling to a clicked tray; the highlight stays on that tray
    pinned: bool,
}

pub struct TrayBrowser {
    products: SharedCatalog,
    cart: Cart,
    selectors: Vec<ItemSelector>,
    current_tray: usize,
    focus: usize,
    scroll: ScrollState,
    viewport_height: usize,
    geometry: TrayGeometry,
    observer: VisibilityObserver,
}

impl TrayBrowser {
    /// Start a fresh session over `products` with an empty cart
    pub fn new(products: SharedCatalog) -> Self {
        let mut browser = Self {
            products: Arc::new(Vec::new()),
            cart: Cart::new(),
            selectors: Vec::new(),
            current_tray: 1,
            focus: 0,
            scroll: ScrollState::default(),
            viewport_height: 0,
            geometry: TrayGeometry {
                cards_per_row: 1,
                regions: Vec::new(),
            },
            observer: VisibilityObserver::new(VISIBILITY_THRESHOLD, Vec::new()),
        };
        browser.set_products(products);
        browser
    }

    /// Replace the catalog; selectors, geometry and the observer are rebuilt
    pub fn set_products(&mut self, products: SharedCatalog) {
        if products.len() > TRAY_CAPACITY {
            tracing::warn!(
                "Catalog has {} products; only the first {} fit in the trays",
                products.len(),
                TRAY_CAPACITY
            );
        }
        self.selectors = products
            .iter()
            .take(TRAY_CAPACITY)
            .map(|p| ItemSelector::new(p.product_id.clone()))
            .collect();
        self.products = products;
        self.cart = Cart::new();
        self.focus = 0;
        self.scroll = ScrollState::default();
        self.current_tray = 1;
        self.rebuild_geometry(self.geometry.cards_per_row);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Catalog and cart
    // ─────────────────────────────────────────────────────────────────────

    /// Products that have a tray slot
    pub fn presented(&self) -> &[Product] {
        &self.products[..self.selectors.len()]
    }

    pub fn trays(&self) -> Vec<Tray<'_>> {
        trays::partition(self.presented())
    }

    #[cfg(test)]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Sum of all cart quantities
    pub fn aggregate(&self) -> u32 {
        self.cart.total_items()
    }

    /// Apply a quantity change reported by a selector
    pub fn apply(&mut self, change: QuantityChange) -> bool {
        let applied = self.cart.apply(&change);
        if !applied {
            tracing::warn!(
                "Rejected quantity {} for {}: cart limit reached",
                change.quantity,
                change.product_id
            );
        }
        applied
    }

    #[cfg(test)]
    pub fn selector(&self, index: usize) -> Option<&ItemSelector> {
        self.selectors.get(index)
    }

    pub fn affordance(&self, index: usize) -> Option<Affordance> {
        let aggregate = self.aggregate();
        self.selectors.get(index).map(|s| s.affordance(aggregate))
    }

    pub fn buy(&mut self, index: usize) -> bool {
        let aggregate = self.aggregate();
        let change = self.selectors.get_mut(index).and_then(|s| s.buy(aggregate));
        change.is_some_and(|c| self.apply(c))
    }

    pub fn increment(&mut self, index: usize) -> bool {
        let aggregate = self.aggregate();
        let change = self
            .selectors
            .get_mut(index)
            .and_then(|s| s.increment(aggregate));
        change.is_some_and(|c| self.apply(c))
    }

    pub fn decrement(&mut self, index: usize) -> bool {
        let change = self.selectors.get_mut(index).map(|s| s.decrement());
        change.is_some_and(|c| self.apply(c))
    }

    /// Buy if the card shows "Buy", otherwise add one more
    pub fn add_focused(&mut self) -> bool {
        let index = self.focus;
        match self.affordance(index) {
            Some(Affordance::Buy { .. }) => self.buy(index),
            Some(Affordance::Stepper { .. }) => self.increment(index),
            None => false,
        }
    }

    pub fn remove_focused(&mut self) -> bool {
        self.decrement(self.focus)
    }

    pub fn can_proceed(&self) -> bool {
        self.aggregate() > 0
    }

    /// Hand the cart and catalog to checkout; None while the cart is empty
    pub fn proceed(&self) -> Option<CheckoutHandoff> {
        if !self.can_proceed() {
            return None;
        }
        tracing::info!(
            "Proceeding to checkout with {} item(s)",
            self.aggregate()
        );
        Some(CheckoutHandoff::new(
            self.cart.clone(),
            Arc::clone(&self.products),
        ))
    }

    // ─────────────────────────────────────────────────────────────────────
    // Trays, scrolling and visibility
    // ─────────────────────────────────────────────────────────────────────

    /// 1-based tray highlighted in the sidebar
    pub fn current_tray(&self) -> usize {
        self.current_tray
    }

    pub fn geometry(&self) -> &TrayGeometry {
        &self.geometry
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll.offset
    }

    /// Rows of the tray section on screen, as of the last layout
    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// Whether a smooth scroll is still under way
    #[cfg(test)]
    pub fn is_scrolling(&self) -> bool {
        self.scroll.target.is_some()
    }

    fn max_offset(&self) -> usize {
        self.geometry
            .content_height()
            .saturating_sub(self.viewport_height)
    }

    /// Fit the tray section to the render area
    pub fn layout(&mut self, cards_per_row: usize, viewport_height: usize) {
        if cards_per_row.max(1) != self.geometry.cards_per_row {
            self.rebuild_geometry(cards_per_row);
        }
        self.viewport_height = viewport_height;
        self.scroll.offset = self.scroll.offset.min(self.max_offset());
        self.observe();
    }

    /// Select a tray from the sidebar: highlight now, scroll there smoothly
    pub fn click_tray(&mut self, number: usize) {
        if !(1..=TRAY_COUNT).contains(&number) {
            return;
        }
        self.current_tray = number;
        if let Some(region) = self.geometry.regions.get(number - 1) {
            let target = region.top.min(self.max_offset());
            self.scroll.target = (target != self.scroll.offset).then_some(target);
            self.scroll.pinned = self.scroll.target.is_some();
        }
        let first = (number - 1) * TRAY_SIZE;
        if first < self.selectors.len() {
            self.focus = first;
        }
    }

    /// Advance a smooth scroll by one animation step
    pub fn tick(&mut self) {
        let Some(target) = self.scroll.target else {
            return;
        };
        let offset = self.scroll.offset;
        let step = offset.abs_diff(target).div_ceil(2);
        self.scroll.offset = if target > offset {
            offset + step
        } else {
            offset - step
        };
        self.observe();
        if self.scroll.offset == target {
            self.scroll.target = None;
            self.scroll.pinned = false;
        }
    }

    /// Manual scroll (mouse wheel); cancels any smooth scroll
    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll.target = None;
        self.scroll.pinned = false;
        self.scroll.offset = self
            .scroll
            .offset
            .saturating_add_signed(delta)
            .min(self.max_offset());
        self.observe();
    }

    fn rebuild_geometry(&mut self, cards_per_row: usize) {
        self.geometry = TrayGeometry::compute(&self.trays(), cards_per_row);
        // The old observer is dropped here; only one is ever alive
        self.observer =
            VisibilityObserver::new(VISIBILITY_THRESHOLD, self.geometry.regions.clone());
        self.observe();
    }

    fn observe(&mut self) {
        if self.viewport_height == 0 {
            return;
        }
        let changes = self.observer.observe(Viewport {
            offset: self.scroll.offset,
            height: self.viewport_height,
        });
        if changes.is_empty() || self.scroll.pinned {
            return;
        }
        // The first tray in this batch that came into view; a batch with
        // only departures keeps the current tray
        if let Some(change) = changes.iter().find(|c| c.is_visible) {
            self.current_tray = change.index + 1;
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Keyboard focus
    // ─────────────────────────────────────────────────────────────────────

    /// Index of the focused product, if any product is presented
    pub fn focus(&self) -> Option<usize> {
        (self.focus < self.selectors.len()).then_some(self.focus)
    }

    pub fn set_focus(&mut self, index: usize) {
        if index < self.selectors.len() {
            self.focus = index;
            self.ensure_visible(index);
        }
    }

    pub fn focus_next(&mut self) {
        self.set_focus(self.focus + 1);
    }

    pub fn focus_prev(&mut self) {
        if let Some(prev) = self.focus.checked_sub(1) {
            self.set_focus(prev);
        }
    }

    pub fn focus_down(&mut self) {
        let cols = self.geometry.cards_per_row;
        let tray_start = self.focus - self.focus % TRAY_SIZE;
        let tray_len = (self.selectors.len() - tray_start).min(TRAY_SIZE);
        let local = self.focus - tray_start;

        if local + cols < tray_len {
            self.set_focus(self.focus + cols);
            return;
        }
        // First row of the next tray, same column where possible
        let next_start = tray_start + TRAY_SIZE;
        if next_start < self.selectors.len() {
            let next_len = (self.selectors.len() - next_start).min(TRAY_SIZE);
            let col = (local % cols).min(next_len - 1);
            self.set_focus(next_start + col);
        }
    }

    pub fn focus_up(&mut self) {
        let cols = self.geometry.cards_per_row;
        let tray_start = self.focus - self.focus % TRAY_SIZE;
        let local = self.focus - tray_start;

        if local >= cols {
            self.set_focus(self.focus - cols);
            return;
        }
        // Last row of the previous tray, same column where possible
        let Some(prev_start) = tray_start.checked_sub(TRAY_SIZE) else {
            return;
        };
        let last_row_start = (TRAY_SIZE - 1) / cols * cols;
        let target = (prev_start + last_row_start + local).min(prev_start + TRAY_SIZE - 1);
        self.set_focus(target);
    }

    fn ensure_visible(&mut self, index: usize) {
        let Some((top, _)) = self.geometry.card_origin(index) else {
            return;
        };
        let bottom = top + CARD_ROWS;
        let offset = self.scroll.target.unwrap_or(self.scroll.offset);

        let target = if top < offset + TRAY_HEADER_ROWS {
            // Keep the tray heading in view when focusing a first-row card
            top.saturating_sub(TRAY_HEADER_ROWS)
        } else if bottom > offset + self.viewport_height {
            bottom.saturating_sub(self.viewport_height)
        } else {
            return;
        };
        self.scroll.target = Some(target.min(self.max_offset()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kiosk::cart::MAX_CART_ITEMS;
    use crate::kiosk::test_support::{product, products};

    fn browser(n: usize) -> TrayBrowser {
        TrayBrowser::new(Arc::new(products(n)))
    }

    fn settle_scroll(b: &mut TrayBrowser) {
        for _ in 0..64 {
            if !b.is_scrolling() {
                return;
            }
            b.tick();
        }
        panic!("smooth scroll never settled");
    }

    #[test]
    fn quantity_change_upserts_and_removes_zero() {
        let mut b = TrayBrowser::new(Arc::new(vec![product("A", 50.0), product("B", 30.0)]));
        assert!(b.apply(QuantityChange::new("A", 2)));
        assert!(b.apply(QuantityChange::new("B", 1)));
        assert_eq!(b.aggregate(), 3);

        let handoff = b.proceed().unwrap();
        let receipt = crate::kiosk::checkout::Receipt::compute(&handoff);
        assert_eq!(receipt.total, 130.0);

        assert!(b.apply(QuantityChange::new("B", 0)));
        assert_eq!(b.cart().iter().collect::<Vec<_>>(), vec![("A", 2)]);
    }

    #[test]
    fn fourth_item_cannot_be_bought() {
        let mut b = browser(4);
        assert!(b.buy(0));
        assert!(b.increment(0));
        assert!(b.buy(1));
        assert_eq!(b.aggregate(), MAX_CART_ITEMS);

        let before = b.cart().clone();
        assert!(!b.buy(3));
        assert!(!b.increment(1));
        assert_eq!(b.cart(), &before);
        assert_eq!(b.selector(3).unwrap().quantity(), 0);
        assert_eq!(b.affordance(3), Some(Affordance::Buy { enabled: false }));

        // Freeing a slot re-enables buying
        assert!(b.decrement(0));
        assert!(b.buy(3));
        assert_eq!(b.aggregate(), MAX_CART_ITEMS);
    }

    #[test]
    fn aggregate_never_exceeds_max_for_any_sequence() {
        let mut b = browser(5);
        // Deterministic pseudo-random walk over buy/increment/decrement
        let mut seed: u32 = 0x2545_f491;
        for _ in 0..500 {
            seed ^= seed << 13;
            seed ^= seed >> 17;
            seed ^= seed << 5;
            let index = (seed % 5) as usize;
            match (seed >> 8) % 3 {
                0 => b.buy(index),
                1 => b.increment(index),
                _ => b.decrement(index),
            };
            assert!(b.aggregate() <= MAX_CART_ITEMS);
            assert!(b.cart().iter().all(|(_, q)| q > 0));
            for i in 0..5 {
                let sel = b.selector(i).unwrap();
                assert_eq!(sel.quantity(), b.cart().quantity(sel.product_id()));
            }
        }
    }

    #[test]
    fn proceed_requires_items() {
        let mut b = browser(3);
        assert!(!b.can_proceed());
        assert!(b.proceed().is_none());
        b.buy(2);
        let handoff = b.proceed().unwrap();
        assert_eq!(handoff.cart.quantity("p3"), 1);
        assert_eq!(handoff.products.len(), 3);
    }

    #[test]
    fn geometry_stacks_trays() {
        let b = browser(10);
        let geometry = TrayGeometry::compute(&b.trays(), 4);
        // Tray 1: 7 cards in 2 rows, tray 2: 3 cards in 1 row, rest empty
        assert_eq!(geometry.regions[0], Region::new(0, 1 + 2 * CARD_ROWS + 1));
        assert_eq!(geometry.regions[1].height, 1 + CARD_ROWS + 1);
        assert_eq!(geometry.regions[2].height, 1 + EMPTY_TRAY_ROWS + 1);
        assert_eq!(geometry.regions.len(), TRAY_COUNT);
        assert_eq!(geometry.card_origin(5), Some((1 + CARD_ROWS, 1)));
        assert_eq!(geometry.card_origin(7), Some((geometry.regions[1].top + 1, 0)));
    }

    #[test]
    fn scrolling_highlights_tray_coming_into_view() {
        let mut b = browser(30);
        b.layout(7, 10);
        assert_eq!(b.current_tray(), 1);

        // Each populated tray is 1 + 5 + 1 = 7 rows tall. At offset 7 tray 1
        // leaves and tray 3 enters while tray 2 stays on screen.
        b.scroll_by(7);
        assert_eq!(b.current_tray(), 3);
        b.scroll_by(7);
        assert_eq!(b.current_tray(), 4);
        b.scroll_by(-14);
        assert_eq!(b.current_tray(), 1);
    }

    #[test]
    fn tray_leaving_view_keeps_current_tray() {
        let mut b = browser(30);
        b.layout(7, 10);

        // Tray 1 drops to 2 of 7 rows; nothing else crosses the threshold
        b.scroll_by(5);
        assert_eq!(b.current_tray(), 1);
    }

    #[test]
    fn tray_click_highlights_immediately_and_scrolls() {
        let mut b = browser(30);
        b.layout(7, 10);

        b.click_tray(4);
        assert_eq!(b.current_tray(), 4);
        assert!(b.is_scrolling());
        assert_eq!(b.focus(), Some(21));

        settle_scroll(&mut b);
        assert_eq!(b.scroll_offset(), b.geometry().regions[3].top);
        assert_eq!(b.current_tray(), 4);

        // Out-of-range clicks are ignored
        b.click_tray(0);
        b.click_tray(8);
        assert_eq!(b.current_tray(), 4);
    }

    #[test]
    fn new_catalog_rebuilds_session() {
        let mut b = browser(3);
        b.buy(0);
        b.set_products(Arc::new(products(12)));
        assert_eq!(b.aggregate(), 0);
        assert_eq!(b.presented().len(), 12);
        assert_eq!(b.geometry().regions.len(), TRAY_COUNT);
    }

    #[test]
    fn focus_moves_through_grid_and_trays() {
        let mut b = browser(10);
        b.layout(4, 40);
        assert_eq!(b.focus(), Some(0));

        b.focus_down();
        assert_eq!(b.focus(), Some(4));
        b.focus_down();
        // Next tray has 3 cards; column 0 is kept
        assert_eq!(b.focus(), Some(7));
        b.focus_up();
        // Last row of tray 1 holds cards 4..7
        assert_eq!(b.focus(), Some(4));

        b.set_focus(9);
        b.focus_next();
        assert_eq!(b.focus(), Some(9));
        b.focus_prev();
        assert_eq!(b.focus(), Some(8));
    }

    #[test]
    fn focused_add_and_remove() {
        let mut b = browser(2);
        assert!(b.add_focused());
        assert!(b.add_focused());
        assert_eq!(b.cart().quantity("p1"), 2);
        assert!(b.remove_focused());
        assert!(b.remove_focused());
        assert!(b.cart().is_empty());
        assert_eq!(b.affordance(0), Some(Affordance::Buy { enabled: true }));
    }
}
