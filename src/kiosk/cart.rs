// Cart - the in-memory selection for one shopping session
//
// Quantities are always positive: setting a product to zero removes it.
// The sum of all quantities never exceeds MAX_CART_ITEMS; the item
// selectors check the ceiling before they report a change, and the cart
// refuses any change that would break it.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Maximum number of items one session may vend
pub const MAX_CART_ITEMS: u32 = 3;

/// A requested quantity for one product, as reported by an item selector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityChange {
    pub product_id: String,
    pub quantity: u32,
}

impl QuantityChange {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: BTreeMap<String, u32>,
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, u32>::deserialize(deserializer)?;
        Ok(raw.into_iter().collect())
    }
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert a quantity; zero removes the entry
    ///
    /// Returns false (and leaves the cart untouched) if the change would push
    /// the total over `MAX_CART_ITEMS`.
    pub fn set_quantity(&mut self, product_id: &str, quantity: u32) -> bool {
        if quantity == 0 {
            self.items.remove(product_id);
            return true;
        }

        let others = self.total_items() - self.quantity(product_id);
        if others.saturating_add(quantity) > MAX_CART_ITEMS {
            return false;
        }

        self.items.insert(product_id.to_string(), quantity);
        true
    }

    /// Apply a change reported by an item selector
    pub fn apply(&mut self, change: &QuantityChange) -> bool {
        self.set_quantity(&change.product_id, change.quantity)
    }

    pub fn quantity(&self, product_id: &str) -> u32 {
        self.items.get(product_id).copied().unwrap_or(0)
    }

    /// Sum of all quantities
    pub fn total_items(&self) -> u32 {
        self.items.values().sum()
    }

    #[cfg(test)]
    pub fn is_full(&self) -> bool {
        self.total_items() >= MAX_CART_ITEMS
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Entries in product id order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.items.iter().map(|(id, qty)| (id.as_str(), *qty))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl FromIterator<(String, u32)> for Cart {
    /// Build a cart from raw entries, keeping the zero-free invariant
    ///
    /// Used for checkout payloads; entries past the ceiling are dropped.
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        let mut cart = Cart::new();
        for (id, qty) in iter {
            cart.set_quantity(&id, qty);
        }
        cart
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_removes_entry() {
        let mut cart = Cart::new();
        assert!(cart.set_quantity("A", 2));
        assert!(cart.set_quantity("B", 1));
        assert!(cart.set_quantity("B", 0));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity("B"), 0);
        assert!(cart.iter().all(|(_, qty)| qty > 0));
    }

    #[test]
    fn refuses_changes_past_the_ceiling() {
        let mut cart = Cart::new();
        assert!(cart.set_quantity("A", 2));
        assert!(cart.set_quantity("B", 1));
        assert!(cart.is_full());

        let before = cart.clone();
        assert!(!cart.set_quantity("C", 1));
        assert!(!cart.set_quantity("A", 3));
        assert_eq!(cart, before);

        // Lowering is always allowed
        assert!(cart.set_quantity("A", 1));
        assert_eq!(cart.total_items(), 2);
    }

    #[test]
    fn serializes_as_plain_mapping() {
        let mut cart = Cart::new();
        cart.set_quantity("A", 2);
        assert_eq!(serde_json::to_string(&cart).unwrap(), r#"{"A":2}"#);

        let parsed: Cart = serde_json::from_str(r#"{"X":1,"Y":2}"#).unwrap();
        assert_eq!(parsed.total_items(), 3);
    }

    #[test]
    fn from_iter_skips_zero_entries() {
        let cart: Cart = vec![("A".to_string(), 0), ("B".to_string(), 2)]
            .into_iter()
            .collect();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.quantity("B"), 2);
    }
}
