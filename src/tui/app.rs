// TUI application state
//
// Holds the screen being shown (tray browser or checkout), the screensaver
// that sits over every screen, and the UI chrome around them: modal, toast,
// log panel and the click map of the last frame.
//
// Navigation replaces the screen value. Whatever the old screen owned
// (cart, visibility observer, checkout timers) is dropped with it.

use super::components::Toast;
use super::hit::{HitMap, HitTarget};
use super::modal::Modal;
use super::theme::Theme;
use crate::catalog::{Product, SharedCatalog};
use crate::config::Config;
use crate::events::{AppEvent, InputSignal};
use crate::kiosk::screensaver::InputOutcome;
use crate::kiosk::{
    CheckoutHandoff, CheckoutPhase, CheckoutSimulator, CheckoutTiming, Screensaver, TrayBrowser,
};
use crate::logging::LogBuffer;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Shown when a checkout finishes vending
pub const VEND_SUCCESS_MESSAGE: &str = "Items vended successfully!";

/// Spinner frames for the payment and vending indicators
const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// The screen under the overlays
pub enum Screen {
    Browser(TrayBrowser),
    Checkout(CheckoutSimulator),
}

pub struct App {
    pub screen: Screen,
    pub screensaver: Screensaver,
    products: SharedCatalog,
    /// Whether the catalog fetch has finished (successfully or not)
    pub catalog_loaded: bool,
    pub theme: Theme,
    pub currency: String,
    timing: CheckoutTiming,
    pub modal: Option<Modal>,
    pub toast: Option<Toast>,
    pub log_buffer: LogBuffer,
    /// Service log panel (F12)
    pub show_logs: bool,
    /// Clickable areas of the last rendered frame
    pub hits: HitMap,
    pub should_quit: bool,
    frame: usize,
    next_session: u64,
    tx: mpsc::UnboundedSender<AppEvent>,
}

impl App {
    /// Must be called from within a tokio runtime (mounts the screensaver)
    pub fn new(config: &Config, log_buffer: LogBuffer, tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        let products: SharedCatalog = Arc::new(Vec::new());
        Self {
            screen: Screen::Browser(TrayBrowser::new(Arc::clone(&products))),
            screensaver: Screensaver::mount(config.idle_threshold, tx.clone()),
            products,
            catalog_loaded: false,
            theme: Theme::by_name(&config.theme),
            currency: config.currency.clone(),
            timing: config.checkout,
            modal: None,
            toast: None,
            log_buffer,
            show_logs: false,
            hits: HitMap::default(),
            should_quit: false,
            frame: 0,
            next_session: 1,
            tx,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────

    pub fn browser(&self) -> Option<&TrayBrowser> {
        match &self.screen {
            Screen::Browser(browser) => Some(browser),
            Screen::Checkout(_) => None,
        }
    }

    pub fn browser_mut(&mut self) -> Option<&mut TrayBrowser> {
        match &mut self.screen {
            Screen::Browser(browser) => Some(browser),
            Screen::Checkout(_) => None,
        }
    }

    #[cfg(test)]
    pub fn checkout(&self) -> Option<&CheckoutSimulator> {
        match &self.screen {
            Screen::Checkout(sim) => Some(sim),
            Screen::Browser(_) => None,
        }
    }

    pub fn product(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    /// Animation frame counter, advanced on every tick
    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn spinner_char(&self) -> char {
        SPINNER[self.frame % SPINNER.len()]
    }

    // ─────────────────────────────────────────────────────────────────────
    // Events from background tasks and timers
    // ─────────────────────────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::CatalogLoaded(products) => {
                self.products = Arc::new(products);
                self.catalog_loaded = true;
                let products = Arc::clone(&self.products);
                if let Some(browser) = self.browser_mut() {
                    browser.set_products(products);
                }
            }
            AppEvent::Checkout(tick) => {
                let done = match &mut self.screen {
                    Screen::Checkout(sim) => {
                        sim.on_tick(tick) && sim.phase() == CheckoutPhase::Done
                    }
                    Screen::Browser(_) => false,
                };
                if done {
                    self.toast = Some(Toast::new(VEND_SUCCESS_MESSAGE));
                    self.open_browser();
                }
            }
            AppEvent::Idle(tick) => {
                self.screensaver.on_tick(tick);
            }
        }
    }

    /// Animation tick: spinner frame, smooth scrolling, toast expiry
    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
        if let Some(browser) = self.browser_mut() {
            browser.tick();
        }
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Input
    // ─────────────────────────────────────────────────────────────────────

    /// Report customer activity; false when the screensaver consumed it
    pub fn activity(&mut self, signal: InputSignal) -> bool {
        self.screensaver.on_input(signal) == InputOutcome::PassThrough
    }

    /// Act on a click resolved by the hit map
    pub fn click(&mut self, target: HitTarget) {
        match target {
            HitTarget::ModalBackdrop | HitTarget::ModalClose => self.modal = None,
            HitTarget::Vend => self.vend(),
            HitTarget::Back => self.back(),
            HitTarget::Proceed => self.proceed(),
            HitTarget::Info(index) => self.open_product_info(index),
            HitTarget::TrayArea | HitTarget::ModalBody => {}
            HitTarget::Tray(number) => {
                if let Some(browser) = self.browser_mut() {
                    browser.click_tray(number);
                }
            }
            HitTarget::Card(index) => {
                if let Some(browser) = self.browser_mut() {
                    browser.set_focus(index);
                }
            }
            HitTarget::Buy(index) => {
                if let Some(browser) = self.browser_mut() {
                    browser.set_focus(index);
                    browser.buy(index);
                }
            }
            HitTarget::Increment(index) => {
                if let Some(browser) = self.browser_mut() {
                    browser.set_focus(index);
                    browser.increment(index);
                }
            }
            HitTarget::Decrement(index) => {
                if let Some(browser) = self.browser_mut() {
                    browser.set_focus(index);
                    browser.decrement(index);
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Navigation
    // ─────────────────────────────────────────────────────────────────────

    /// Leave the trays for checkout; ignored while the cart is empty
    pub fn proceed(&mut self) {
        let Some(handoff) = self.browser().and_then(TrayBrowser::proceed) else {
            return;
        };

        // Checkout reads its state from a navigation payload, as it would
        // when opened from a link
        let payload = match serde_json::to_value(&handoff) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!("Could not encode checkout payload: {}", e);
                None
            }
        };
        self.open_checkout(CheckoutHandoff::from_payload(payload));
    }

    pub fn open_checkout(&mut self, handoff: CheckoutHandoff) {
        let session = self.next_session;
        self.next_session += 1;
        self.modal = None;
        self.screen = Screen::Checkout(CheckoutSimulator::start(
            handoff,
            self.timing,
            session,
            self.tx.clone(),
        ));
    }

    pub fn vend(&mut self) {
        if let Screen::Checkout(sim) = &mut self.screen {
            sim.vend();
        }
    }

    /// Back out of checkout without vending
    pub fn back(&mut self) {
        let exited = match &mut self.screen {
            Screen::Checkout(sim) => {
                let exited = sim.back();
                if exited {
                    tracing::debug!(
                        "Leaving checkout {} with {} timer(s) pending",
                        sim.session(),
                        sim.pending_timers()
                    );
                }
                exited
            }
            Screen::Browser(_) => false,
        };
        if exited {
            self.open_browser();
        }
    }

    /// Fresh shopping session over the loaded catalog
    fn open_browser(&mut self) {
        self.modal = None;
        self.screen = Screen::Browser(TrayBrowser::new(Arc::clone(&self.products)));
    }

    // ─────────────────────────────────────────────────────────────────────
    // Overlays
    // ─────────────────────────────────────────────────────────────────────

    pub fn open_product_info(&mut self, index: usize) {
        if self.browser().is_some() && index < self.products.len() {
            self.modal = Some(Modal::ProductInfo(index));
        }
    }

    pub fn toggle_help(&mut self) {
        self.modal = match self.modal {
            Some(Modal::Help) => None,
            _ => Some(Modal::Help),
        };
    }

    pub fn toggle_logs(&mut self) {
        self.show_logs = !self.show_logs;
    }
}
