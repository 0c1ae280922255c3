//! Page shown for paths with no matching route

use super::components::{render_dialog, DialogConfig, DialogPlacement};
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
    Frame,
};

/// Draw the 404 dialog for `path`
pub fn draw(frame: &mut Frame, path: &str) {
    let message = format!("Oops! Page not found.\nNo page exists at {path}");
    let hint = vec![
        Span::raw("Press "),
        Span::styled(
            "Enter",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" to return home"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: "404",
            title_color: Color::Yellow,
            border_color: Color::Yellow,
            message: &message,
            hint: Some(hint),
            max_width: 60,
            placement: DialogPlacement::Center,
        },
    );
}
