// Item selector - per-product buy button / quantity stepper
//
// Each product card owns one selector. The selector only knows its own
// quantity; the aggregate across all cards belongs to the tray browser and
// is passed in on every action. A mutating action returns the change for
// the browser to apply, or None when the action is a no-op.

use super::cart::{QuantityChange, MAX_CART_ITEMS};

/// What the card should render for this selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Affordance {
    /// "Buy" button; `enabled` is false when the cart is full
    Buy { enabled: bool },
    /// "− n +" stepper; `can_increment` is false when the cart is full
    Stepper { quantity: u32, can_increment: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSelector {
    product_id: String,
    quantity: u32,
}

impl ItemSelector {
    pub fn new(product_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            quantity: 0,
        }
    }

    #[cfg(test)]
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    #[cfg(test)]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Whether one more item fits given the current aggregate
    pub fn can_add(aggregate: u32) -> bool {
        aggregate < MAX_CART_ITEMS
    }

    pub fn affordance(&self, aggregate: u32) -> Affordance {
        if self.quantity == 0 {
            Affordance::Buy {
                enabled: Self::can_add(aggregate),
            }
        } else {
            Affordance::Stepper {
                quantity: self.quantity,
                can_increment: Self::can_add(aggregate),
            }
        }
    }

    /// "Buy": start at quantity 1
    pub fn buy(&mut self, aggregate: u32) -> Option<QuantityChange> {
        if !Self::can_add(aggregate) {
            return None;
        }
        self.quantity = 1;
        Some(self.change())
    }

    pub fn increment(&mut self, aggregate: u32) -> Option<QuantityChange> {
        if !Self::can_add(aggregate) {
            return None;
        }
        self.quantity += 1;
        Some(self.change())
    }

    /// Always reports, even when already at zero
    pub fn decrement(&mut self) -> QuantityChange {
        self.quantity = self.quantity.saturating_sub(1);
        self.change()
    }

    fn change(&self) -> QuantityChange {
        QuantityChange::new(self.product_id.clone(), self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buy_then_step() {
        let mut sel = ItemSelector::new("A");
        assert_eq!(sel.affordance(0), Affordance::Buy { enabled: true });

        assert_eq!(sel.buy(0), Some(QuantityChange::new("A", 1)));
        assert_eq!(sel.increment(1), Some(QuantityChange::new("A", 2)));
        assert_eq!(
            sel.affordance(2),
            Affordance::Stepper {
                quantity: 2,
                can_increment: true
            }
        );
    }

    #[test]
    fn full_cart_blocks_buy_and_increment() {
        let mut sel = ItemSelector::new("D");
        assert_eq!(sel.affordance(3), Affordance::Buy { enabled: false });
        assert_eq!(sel.buy(3), None);
        assert_eq!(sel.quantity(), 0);

        let mut held = ItemSelector::new("A");
        held.buy(0);
        assert_eq!(held.increment(3), None);
        assert_eq!(held.quantity(), 1);
        assert_eq!(
            held.affordance(3),
            Affordance::Stepper {
                quantity: 1,
                can_increment: false
            }
        );
    }

    #[test]
    fn decrement_floors_at_zero() {
        let mut sel = ItemSelector::new("A");
        sel.buy(0);
        assert_eq!(sel.decrement(), QuantityChange::new("A", 0));
        assert_eq!(sel.decrement(), QuantityChange::new("A", 0));
        assert_eq!(sel.affordance(0), Affordance::Buy { enabled: true });
    }

    #[test]
    fn any_step_sequence_stays_in_bounds() {
        // Single selector in isolation: the aggregate is its own quantity
        let mut sel = ItemSelector::new("A");
        let steps = [1, 1, 1, 1, -1, 1, -1, -1, -1, -1, 1, 1, 1, 1, 1];
        for step in steps {
            let aggregate = sel.quantity();
            if step > 0 {
                if sel.quantity() == 0 {
                    sel.buy(aggregate);
                } else {
                    sel.increment(aggregate);
                }
            } else {
                sel.decrement();
            }
            assert!(sel.quantity() <= MAX_CART_ITEMS);
        }
        assert_eq!(sel.quantity(), MAX_CART_ITEMS);
    }
}
