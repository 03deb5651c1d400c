// Events that flow into the UI loop
//
// Background work (catalog fetch, simulated delays, idle timer) never touches
// UI state directly. It sends an `AppEvent` over the app channel and the UI
// loop applies it, so every state change happens on the one UI task.

use crate::catalog::Product;
use crate::kiosk::checkout::CheckoutTick;
use crate::kiosk::screensaver::IdleTick;

/// Main event type delivered to the UI loop
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// The one-shot catalog fetch finished (empty on failure)
    CatalogLoaded(Vec<Product>),

    /// A checkout phase delay elapsed
    Checkout(CheckoutTick),

    /// The idle timer fired
    Idle(IdleTick),
}

impl From<CheckoutTick> for AppEvent {
    fn from(tick: CheckoutTick) -> Self {
        AppEvent::Checkout(tick)
    }
}

impl From<IdleTick> for AppEvent {
    fn from(tick: IdleTick) -> Self {
        AppEvent::Idle(tick)
    }
}

/// Input signal classes that count as user activity
///
/// Terminal input is mapped onto these before it reaches the screensaver,
/// which keeps idle detection independent of the input backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputSignal {
    PointerMove,
    PointerPress,
    KeyPress,
    /// Touch contact that arrives ahead of the synthesized click
    #[allow(dead_code)] // Reserved for touch panels that report touches separately from clicks
    TouchStart,
}
