//! Reusable UI components

mod banner;
mod button;
mod dialog;

pub use banner::{render_banner, BannerKind, BANNER_HEIGHT};
pub use button::{render_button, render_nav_button, BUTTON_HEIGHT};
pub use dialog::{render_dialog, render_toasts, DialogConfig, DialogPlacement};
