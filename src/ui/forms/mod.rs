//! Form rendering module
//!
//! This module contains UI components for rendering forms:
//! - `field_renderer`: Field rendering utilities
//! - `login_form`: Sign-in form
//! - `transfer_form`: Move-money form

mod field_renderer;
mod login_form;
mod transfer_form;

pub use login_form::draw_login;
pub use transfer_form::draw_move_money;
