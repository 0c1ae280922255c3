//! Card controls panel rendering

use super::components::{render_button, BUTTON_HEIGHT};
use super::layout::centered_rect;
use crate::app::App;
use crate::state::{format_balance, CardControls, CardControlsFocus, TransactionType};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const PANEL_WIDTH: u16 = 64;

/// Draw the card controls panel
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let controls = &app.state.card_controls;
    let panel = centered_rect(PANEL_WIDTH, 24, area);

    let title = match controls.account_suffix() {
        Some(suffix) => format!(" Card Controls (…{suffix}) "),
        None => " Card Controls ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),             // Freeze
            Constraint::Length(2),             // Spending limit toggle
            Constraint::Length(2),             // Limit amount
            Constraint::Length(3),             // Transaction types
            Constraint::Length(BUTTON_HEIGHT), // Report lost/stolen
            Constraint::Length(BUTTON_HEIGHT), // Save
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let currency = app.config.currency_symbol();

    draw_row(
        frame,
        chunks[0],
        controls.focus == CardControlsFocus::Freeze,
        "Freeze Card",
        toggle_span(controls.frozen, "Frozen", "Active"),
    );
    draw_row(
        frame,
        chunks[1],
        controls.focus == CardControlsFocus::SpendingLimit,
        "Monthly Spending Limit",
        toggle_span(controls.spending_limit_enabled, "On", "Off"),
    );
    if controls.spending_limit_enabled {
        let amount = format!(
            "{currency}{}",
            format_balance(f64::from(controls.spending_limit))
        );
        let is_active = controls.focus == CardControlsFocus::LimitAmount;
        let cursor = if is_active { "▌" } else { "" };
        draw_row(
            frame,
            chunks[2],
            is_active,
            "  Limit Amount",
            Span::styled(format!("{amount}{cursor}"), Style::default().fg(Color::White)),
        );
    }

    draw_transaction_types(frame, chunks[3], controls);

    render_button(
        frame,
        chunks[4],
        "r  Report Lost / Stolen",
        false,
        Some(Color::Red),
    );
    render_button(frame, chunks[5], "s  Save Settings", false, Some(Color::Green));
}

fn toggle_span(on: bool, on_label: &'static str, off_label: &'static str) -> Span<'static> {
    if on {
        Span::styled(format!("[●] {on_label}"), Style::default().fg(Color::Green))
    } else {
        Span::styled(format!("[ ] {off_label}"), Style::default().fg(Color::DarkGray))
    }
}

fn label_style(is_active: bool) -> Style {
    if is_active {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    }
}

fn draw_row(frame: &mut Frame, area: Rect, is_active: bool, label: &str, value: Span) {
    let marker = if is_active { "▸ " } else { "  " };
    let line = Line::from(vec![
        Span::styled(format!("{marker}{label:<26}"), label_style(is_active)),
        value,
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_transaction_types(frame: &mut Frame, area: Rect, controls: &CardControls) {
    let is_active = controls.focus == CardControlsFocus::TransactionTypes;
    let marker = if is_active { "▸ " } else { "  " };

    let mut choices = Vec::new();
    for (idx, kind) in TransactionType::ALL.iter().enumerate() {
        let allowed = controls.transaction_types.contains(kind);
        let mut style = if allowed {
            Style::default().fg(Color::Green)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        if is_active && idx == controls.selected_type {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let check = if allowed { "✓" } else { "·" };
        choices.push(Span::styled(format!(" {check} {} ", kind.label()), style));
    }

    let content = vec![
        Line::from(Span::styled(
            format!("{marker}Allowed Transaction Types"),
            label_style(is_active),
        )),
        Line::from(choices),
    ];
    frame.render_widget(Paragraph::new(content), area);
}
