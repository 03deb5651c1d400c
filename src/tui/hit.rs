// Mouse hit-testing
//
// Components record the clickable areas they draw during a frame. The next
// mouse press is resolved against the areas of the frame the customer saw.
// Later registrations sit on top of earlier ones.

use ratatui::layout::{Position, Rect};

/// Something a click can land on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// Sidebar entry for a tray (1-based)
    Tray(usize),
    /// Product card body at a catalog index
    Card(usize),
    Buy(usize),
    Increment(usize),
    Decrement(usize),
    Info(usize),
    Proceed,
    Vend,
    Back,
    /// The tray section, for wheel scrolling
    TrayArea,
    /// Backdrop of an open modal
    ModalBackdrop,
    /// Inside an open modal; absorbs the click
    ModalBody,
    ModalClose,
}

#[derive(Debug, Default)]
pub struct HitMap {
    areas: Vec<(Rect, HitTarget)>,
}

impl HitMap {
    /// Forget the previous frame's areas
    pub fn clear(&mut self) {
        self.areas.clear();
    }

    pub fn register(&mut self, area: Rect, target: HitTarget) {
        if area.width > 0 && area.height > 0 {
            self.areas.push((area, target));
        }
    }

    /// Topmost target under a cell
    pub fn target_at(&self, column: u16, row: u16) -> Option<HitTarget> {
        let position = Position::new(column, row);
        self.areas
            .iter()
            .rev()
            .find(|(area, _)| area.contains(position))
            .map(|(_, target)| *target)
    }
}
