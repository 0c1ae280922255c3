//! Move-money form rendering

use super::field_renderer::{draw_field, draw_help_text, FIELD_HEIGHT};
use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{FormState, SubmissionOutcome, AMOUNT, FROM_ACCOUNT, REFERENCE, TO_ACCOUNT};
use crate::ui::components::{render_banner, render_button, BannerKind, BANNER_HEIGHT, BUTTON_HEIGHT};
use crate::ui::layout::centered_rect;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const PANEL_WIDTH: u16 = 72;

/// Draw the move-money page
pub fn draw_move_money(frame: &mut Frame, area: Rect, app: &App) {
    let FormState::Transfer(form) = &app.state.form else {
        return;
    };

    let banner_height = if form.outcome.is_idle() {
        0
    } else {
        BANNER_HEIGHT
    };
    let panel_height = 2 + 2 + banner_height + FIELD_HEIGHT * 4 + BUTTON_HEIGHT + 1 + 2;
    let panel = centered_rect(PANEL_WIDTH, panel_height, area);

    let block = Block::default()
        .title(" Move Money ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // Subtitle
            Constraint::Length(banner_height), // Outcome
            Constraint::Length(FIELD_HEIGHT),  // From
            Constraint::Length(FIELD_HEIGHT),  // To
            Constraint::Length(FIELD_HEIGHT),  // Amount
            Constraint::Length(FIELD_HEIGHT),  // Reference
            Constraint::Length(BUTTON_HEIGHT), // Submit
            Constraint::Length(1),             // Help
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let subtitle = Paragraph::new("Transfer funds between your accounts or to others.")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(subtitle, chunks[0]);

    match &form.outcome {
        SubmissionOutcome::Idle => {}
        SubmissionOutcome::Success { message } => render_banner(
            frame,
            chunks[1],
            BannerKind::Success,
            "Transfer Initiated",
            message.as_deref().unwrap_or_default(),
        ),
        SubmissionOutcome::Error { message } => render_banner(
            frame,
            chunks[1],
            BannerKind::Error,
            "Transfer Failed",
            message.as_deref().unwrap_or_default(),
        ),
    }

    let fields = [
        (&form.from_account, FROM_ACCOUNT),
        (&form.to_account, TO_ACCOUNT),
        (&form.amount, AMOUNT),
        (&form.reference, REFERENCE),
    ];
    let last_field = fields.len() - 1;
    for (idx, (field, name)) in fields.into_iter().enumerate() {
        draw_field(
            frame,
            chunks[idx + 2],
            field,
            form.active_field_index == idx,
            form.field_error(name),
        );
    }

    render_button(
        frame,
        chunks[6],
        "Transfer Funds",
        form.active_field_index == last_field,
        Some(Color::Green),
    );

    draw_help_text(
        frame,
        chunks[7],
        &format!("Tab:next  ←/→:choose account  {SUBMIT_SHORTCUT}:transfer  Esc:cancel"),
    );
}
