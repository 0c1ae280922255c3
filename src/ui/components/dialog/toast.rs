//! Toast stack drawn in the top-right corner

use super::base::{render_dialog, DialogConfig, DialogPlacement};
use crate::state::{Notifications, Severity};
use ratatui::{style::Color, Frame};

const TOAST_WIDTH: u16 = 44;

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Info => Color::Cyan,
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
    }
}

/// Render every visible toast, oldest on top
pub fn render_toasts(frame: &mut Frame, notifications: &Notifications) {
    let mut y = 1;
    for toast in notifications.visible() {
        let color = severity_color(toast.severity);
        let area = render_dialog(
            frame,
            DialogConfig {
                title: &toast.title,
                title_color: color,
                border_color: color,
                message: toast.description.as_deref().unwrap_or_default(),
                hint: None,
                max_width: TOAST_WIDTH,
                placement: DialogPlacement::TopRight { y },
            },
        );
        y = area.bottom();
        if y >= frame.area().height {
            break;
        }
    }
}
