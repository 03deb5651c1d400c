// Trays - fixed-size shelves of products
//
// The machine always presents TRAY_COUNT trays of up to TRAY_SIZE products,
// filled in catalog order. Trays past the end of the catalog are empty.

use crate::catalog::Product;

/// Products per tray
pub const TRAY_SIZE: usize = 7;

/// Trays presented by the machine
pub const TRAY_COUNT: usize = 7;

/// Largest catalog the trays can present
pub const TRAY_CAPACITY: usize = TRAY_SIZE * TRAY_COUNT;

/// One tray: a contiguous slice of the catalog
#[derive(Debug, Clone, Copy)]
pub struct Tray<'a> {
    /// 1-based tray number as shown on the machine
    pub number: usize,
    /// Index of the first product in the catalog
    pub offset: usize,
    pub products: &'a [Product],
}

impl<'a> Tray<'a> {
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

/// Split the catalog into exactly TRAY_COUNT trays
pub fn partition(products: &[Product]) -> Vec<Tray<'_>> {
    (0..TRAY_COUNT)
        .map(|i| {
            let start = (i * TRAY_SIZE).min(products.len());
            let end = (start + TRAY_SIZE).min(products.len());
            Tray {
                number: i + 1,
                offset: start,
                products: &products[start..end],
            }
        })
        .collect()
}

/// Tray number (1-based) holding the product at `index`, if it is presented
pub fn tray_of(index: usize) -> Option<usize> {
    (index < TRAY_CAPACITY).then(|| index / TRAY_SIZE + 1)
}

/// Slot number (1-based) of the product at `index` within its tray
pub fn slot_of(index: usize) -> usize {
    index % TRAY_SIZE + 1
}
