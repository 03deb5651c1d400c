// Modal system for TUI overlays
//
// Self-contained modal dialogs that handle their own input and return actions.
// App just holds Option<Modal>, input routing acts on returned ModalAction.

use crossterm::event::KeyCode;

/// Actions returned by modal input handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalAction {
    /// Input consumed, no state change needed
    None,
    Close,
}

/// Available modal types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    /// Keys and mouse actions
    Help,
    /// Description, brand and calories of the product at this catalog index
    ProductInfo(usize),
}

impl Modal {
    /// Handle keyboard input, return action for caller to execute
    pub fn handle_input(&self, key: KeyCode) -> ModalAction {
        match self {
            Modal::Help => match key {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Enter => ModalAction::Close,
                _ => ModalAction::None,
            },
            Modal::ProductInfo(_) => match key {
                KeyCode::Esc | KeyCode::Char('i') | KeyCode::Enter => ModalAction::Close,
                _ => ModalAction::None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modals_swallow_unrelated_keys() {
        let info = Modal::ProductInfo(3);
        assert_eq!(info.handle_input(KeyCode::Char('b')), ModalAction::None);
        assert_eq!(info.handle_input(KeyCode::Esc), ModalAction::Close);
        assert_eq!(Modal::Help.handle_input(KeyCode::Char('?')), ModalAction::Close);
    }
}
