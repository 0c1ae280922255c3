//! Login form rendering

use super::field_renderer::{draw_field, draw_help_text, FIELD_HEIGHT};
use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{FormState, PASSWORD, USER_ID};
use crate::ui::components::{render_banner, render_button, BannerKind, BANNER_HEIGHT, BUTTON_HEIGHT};
use crate::ui::layout::centered_rect;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const PANEL_WIDTH: u16 = 56;

/// Draw the sign-in page
pub fn draw_login(frame: &mut Frame, area: Rect, app: &App) {
    let FormState::Login(form) = &app.state.form else {
        return;
    };

    let banner_height = if form.form_error.is_some() {
        BANNER_HEIGHT
    } else {
        0
    };
    let panel_height = 2 + 3 + banner_height + FIELD_HEIGHT * 2 + BUTTON_HEIGHT + 1 + 2;
    let panel = centered_rect(PANEL_WIDTH, panel_height, area);

    let block = Block::default()
        .title(" Sign In ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),             // Heading
            Constraint::Length(banner_height), // Form error
            Constraint::Length(FIELD_HEIGHT),  // User ID
            Constraint::Length(FIELD_HEIGHT),  // Password
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Length(1),             // Help
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let heading = Paragraph::new(vec![
        Line::styled(
            "Welcome Back",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::styled(
            "Sign in to access your account.",
            Style::default().fg(Color::DarkGray),
        ),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(heading, chunks[0]);

    if let Some(message) = &form.form_error {
        render_banner(frame, chunks[1], BannerKind::Error, "Login Failed", message);
    }

    draw_field(
        frame,
        chunks[2],
        &form.user_id,
        form.active_field_index == 0,
        form.field_error(USER_ID),
    );
    draw_field(
        frame,
        chunks[3],
        &form.password,
        form.active_field_index == 1,
        form.field_error(PASSWORD),
    );

    render_button(frame, chunks[4], "Login", form.active_field_index == 1, None);

    draw_help_text(
        frame,
        chunks[5],
        &format!("Tab:next  Enter/{SUBMIT_SHORTCUT}:login"),
    );
}
