//! [checkout] section: simulated payment and vend delays

use serde::Deserialize;
use std::time::Duration;

use crate::kiosk::CheckoutTiming;

/// Checkout delays as loaded from config file, in milliseconds
#[derive(Debug, Deserialize, Default)]
pub struct FileCheckout {
    pub payment_delay_ms: Option<u64>,
    pub vend_unlock_delay_ms: Option<u64>,
    pub vend_delay_ms: Option<u64>,
}

/// Create timing from file config with defaults
pub(super) fn timing_from_file(file: Option<FileCheckout>) -> CheckoutTiming {
    let file = file.unwrap_or_default();
    let defaults = CheckoutTiming::default();

    CheckoutTiming {
        payment: file
            .payment_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.payment),
        vend_unlock: file
            .vend_unlock_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.vend_unlock),
        vend: file
            .vend_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.vend),
    }
}
