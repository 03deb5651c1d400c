//! Checkout simulator
//!
//! Plays the fake payment and vend sequence for one checkout session:
//!
//! ```text
//! Loading ──payment delay──▶ Paid ──unlock delay──▶ VendReady ──vend──▶ Vending
//!                                                       │                   │
//!                                                     back             vend delay
//!                                                       ▼                   ▼
//!                                                    Exited                Done
//! ```
//!
//! Delays are scheduled on a [`TimerSet`] owned by the simulator. Every timer
//! message carries the session id, and a message is only applied when it
//! matches both the session and the phase it was scheduled from. Dropping
//! the simulator cancels whatever is still pending.

use super::handoff::CheckoutHandoff;
use crate::events::AppEvent;
use crate::timer::TimerSet;
use std::time::Duration;
use tokio::sync::mpsc;

/// Delays between checkout phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutTiming {
    /// Loading → Paid
    pub payment: Duration,
    /// Paid → VendReady
    pub vend_unlock: Duration,
    /// Vending → Done
    pub vend: Duration,
}

impl Default for CheckoutTiming {
    fn default() -> Self {
        Self {
            payment: Duration::from_millis(2500),
            vend_unlock: Duration::from_millis(1500),
            vend: Duration::from_millis(2500),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutPhase {
    /// "Processing Payment..."
    Loading,
    /// Payment accepted, receipt shown, vend button still locked
    Paid,
    /// Vend and back are available
    VendReady,
    /// Dispensing
    Vending,
    /// Items vended; the session is over
    Done,
    /// Customer went back without vending
    Exited,
}

/// A scheduled delay elapsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    PaymentSettled,
    VendUnlocked,
    VendFinished,
}

/// Timer message for one checkout session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutTick {
    pub session: u64,
    pub step: CheckoutStep,
}

/// Phase reached when `step` elapses in `phase`, if that step applies there
pub fn advance(phase: CheckoutPhase, step: CheckoutStep) -> Option<CheckoutPhase> {
    match (phase, step) {
        (CheckoutPhase::Loading, CheckoutStep::PaymentSettled) => Some(CheckoutPhase::Paid),
        (CheckoutPhase::Paid, CheckoutStep::VendUnlocked) => Some(CheckoutPhase::VendReady),
        (CheckoutPhase::Vending, CheckoutStep::VendFinished) => Some(CheckoutPhase::Done),
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptLine {
    pub product_id: String,
    pub product_name: String,
    pub quantity: u32,
    pub line_total: f64,
}

/// Itemized summary of a checkout
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Receipt {
    pub lines: Vec<ReceiptLine>,
    pub total: f64,
}

impl Receipt {
    /// Price every cart entry against the product snapshot
    ///
    /// Entries whose product is not in the snapshot are skipped in both the
    /// lines and the total.
    pub fn compute(handoff: &CheckoutHandoff) -> Self {
        let lines: Vec<ReceiptLine> = handoff
            .cart
            .iter()
            .filter_map(|(id, quantity)| {
                let product = handoff.product(id)?;
                Some(ReceiptLine {
                    product_id: id.to_string(),
                    product_name: product.product_name.clone(),
                    quantity,
                    line_total: product.product_price * quantity as f64,
                })
            })
            .collect();
        let total = lines.iter().map(|l| l.line_total).sum();
        Self { lines, total }
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

pub struct CheckoutSimulator {
    session: u64,
    phase: CheckoutPhase,
    handoff: CheckoutHandoff,
    receipt: Option<Receipt>,
    timing: CheckoutTiming,
    timers: TimerSet<AppEvent>,
}

impl CheckoutSimulator {
    /// Enter Loading and schedule the payment delay
    pub fn start(
        handoff: CheckoutHandoff,
        timing: CheckoutTiming,
        session: u64,
        tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let mut sim = Self {
            session,
            phase: CheckoutPhase::Loading,
            handoff,
            receipt: None,
            timing,
            timers: TimerSet::new(tx),
        };
        sim.schedule(timing.payment, CheckoutStep::PaymentSettled);
        tracing::info!(
            "Checkout {} started with {} item(s)",
            session,
            sim.handoff.cart.total_items()
        );
        sim
    }

    pub fn session(&self) -> u64 {
        self.session
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    /// Receipt, available from Paid onwards
    pub fn receipt(&self) -> Option<&Receipt> {
        self.receipt.as_ref()
    }

    #[cfg(test)]
    pub fn handoff(&self) -> &CheckoutHandoff {
        &self.handoff
    }

    /// Apply a timer message; returns false if it was stale or out of order
    pub fn on_tick(&mut self, tick: CheckoutTick) -> bool {
        if tick.session != self.session {
            return false;
        }
        let Some(next) = advance(self.phase, tick.step) else {
            tracing::debug!(
                "Checkout {} ignored {:?} in {:?}",
                self.session,
                tick.step,
                self.phase
            );
            return false;
        };

        self.phase = next;
        match next {
            CheckoutPhase::Paid => {
                let receipt = Receipt::compute(&self.handoff);
                tracing::info!(
                    "Checkout {} paid: {} line(s), total {}",
                    self.session,
                    receipt.lines.len(),
                    receipt.total
                );
                self.receipt = Some(receipt);
                self.schedule(self.timing.vend_unlock, CheckoutStep::VendUnlocked);
            }
            CheckoutPhase::Done => {
                tracing::info!("Checkout {} vended", self.session);
            }
            _ => {}
        }
        true
    }

    /// Start vending; only available in VendReady
    pub fn vend(&mut self) -> bool {
        if self.phase != CheckoutPhase::VendReady {
            return false;
        }
        self.phase = CheckoutPhase::Vending;
        self.schedule(self.timing.vend, CheckoutStep::VendFinished);
        tracing::info!("Checkout {} vending", self.session);
        true
    }

    /// Leave without vending; only available in VendReady
    pub fn back(&mut self) -> bool {
        if self.phase != CheckoutPhase::VendReady {
            return false;
        }
        self.phase = CheckoutPhase::Exited;
        self.timers.cancel_all();
        tracing::info!("Checkout {} abandoned before vending", self.session);
        true
    }

    /// Timer messages still in flight
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    fn schedule(&mut self, delay: Duration, step: CheckoutStep) {
        let tick = CheckoutTick {
            session: self.session,
            step,
        };
        self.timers.schedule(delay, tick);
    }
}
