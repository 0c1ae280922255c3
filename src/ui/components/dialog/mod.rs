//! Dialog components for TUI

mod base;
mod toast;

pub use base::{render_dialog, DialogConfig, DialogPlacement};
pub use toast::render_toasts;
