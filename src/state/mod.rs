//! Application state module

mod app_state;
mod card_controls;
mod forms;
pub mod notifications;
mod route;

pub use app_state::*;
pub use card_controls::*;
pub use forms::*;
pub use notifications::{Notifications, Severity, Toast};
pub use route::Route;
