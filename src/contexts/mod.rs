/// Wiring for the three extension contexts: background service worker,
/// content script and side panel
pub mod background;
pub mod content;
pub mod side_panel;
