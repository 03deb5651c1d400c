// Kiosk module - shopping session state, independent of the terminal
//
// Everything here is plain state plus the timers it owns:
// - cart / selector: bounded cart and the per-product buy/stepper logic
// - trays / visibility / browser: the tray home screen
// - handoff / checkout: the simulated payment and vend sequence
// - screensaver: the idle overlay
//
// The TUI drives these types and renders them; none of them draw anything.

pub mod browser;
pub mod cart;
pub mod checkout;
pub mod handoff;
pub mod screensaver;
pub mod selector;
pub mod trays;
pub mod visibility;

pub use browser::TrayBrowser;
pub use cart::MAX_CART_ITEMS;
pub use checkout::{CheckoutPhase, CheckoutSimulator, CheckoutTiming};
pub use handoff::CheckoutHandoff;
pub use screensaver::Screensaver;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::catalog::Product;

    pub fn product(id: &str, price: f64) -> Product {
        Product {
            product_id: id.to_string(),
            product_name: format!("{} item", id),
            product_price: price,
            description: None,
            image: None,
            brand_name: None,
            calories: None,
        }
    }

    /// `n` products with ids p1..pn
    pub fn products(n: usize) -> Vec<Product> {
        (1..=n)
            .map(|i| {
                let mut p = product(&format!("p{}", i), 10.0 * i as f64);
                p.product_name = format!("Product {}", i);
                p
            })
            .collect()
    }
}
