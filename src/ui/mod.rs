//! UI rendering modules for the chargen-import shell.
//!
//! All egui-based rendering lives here:
//! - `window_view`: draws the engine's modal window and its controls

mod window_view;

pub use window_view::*;
