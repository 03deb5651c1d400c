// Checkout handoff - the snapshot passed from the tray browser to checkout
//
// Built once when the customer proceeds and never mutated afterwards. The
// checkout screen reads it; the browser session that produced it is gone
// by the time checkout runs.

use super::cart::Cart;
use crate::catalog::{Product, SharedCatalog};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckoutHandoff {
    #[serde(default)]
    pub cart: Cart,
    #[serde(default)]
    pub products: SharedCatalog,
}

impl CheckoutHandoff {
    pub fn new(cart: Cart, products: SharedCatalog) -> Self {
        Self { cart, products }
    }

    /// Accept an untyped navigation payload
    ///
    /// An absent or malformed payload yields an empty cart and an empty
    /// product list, so checkout shows zero items instead of failing.
    pub fn from_payload(payload: Option<serde_json::Value>) -> Self {
        let Some(value) = payload else {
            return Self::default();
        };
        match serde_json::from_value(value) {
            Ok(handoff) => handoff,
            Err(e) => {
                tracing::warn!("Ignoring malformed checkout payload: {}", e);
                Self::default()
            }
        }
    }

    pub fn product(&self, product_id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.product_id == product_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_payload_defaults_to_empty() {
        let handoff = CheckoutHandoff::from_payload(None);
        assert!(handoff.cart.is_empty());
        assert!(handoff.products.is_empty());
    }

    #[test]
    fn malformed_payload_defaults_to_empty() {
        let handoff = CheckoutHandoff::from_payload(Some(json!({"cart": "nope"})));
        assert_eq!(handoff, CheckoutHandoff::default());

        let handoff = CheckoutHandoff::from_payload(Some(json!([1, 2, 3])));
        assert_eq!(handoff, CheckoutHandoff::default());
    }

    #[test]
    fn well_formed_payload_is_accepted() {
        let payload = json!({
            "cart": {"A": 2},
            "products": [
                {"product_id": "A", "product_name": "Apple Bowl", "product_price": 50}
            ]
        });
        let handoff = CheckoutHandoff::from_payload(Some(payload));
        assert_eq!(handoff.cart.quantity("A"), 2);
        assert_eq!(
            handoff.product("A").map(|p| p.product_name.as_str()),
            Some("Apple Bowl")
        );
        assert!(handoff.product("B").is_none());
    }
}
