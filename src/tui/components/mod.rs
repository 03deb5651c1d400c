// Components module - reusable UI building blocks
//
// Shell components are rendered on every screen:
// - Title bar: brand, current screen, catalog loading indicator
// - Status bar: cart usage and Proceed button, or checkout hints
// - Logs panel: service log entries (F12)
//
// Screen components:
// - Sidebar: tray selector for the tray screen
// - Product card: one product with its Buy button or stepper
// - Screensaver: idle overlay
// - Toast: transient acknowledgments

pub mod formatters;
pub mod logs_panel;
pub mod product_card;
pub mod screensaver;
pub mod sidebar;
pub mod status_bar;
pub mod title_bar;
pub mod toast;

pub use toast::Toast;
