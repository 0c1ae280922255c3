//! Field rendering utilities for forms

use crate::state::FormField;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field: the bordered input plus its error line
pub const FIELD_HEIGHT: u16 = 4;

/// Draw a form field using FormField from the domain layer, with the
/// validation message (if any) underneath
pub fn draw_field(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    is_active: bool,
    error: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(1)])
        .split(area);

    let border_style = if error.is_some() {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = field.display_value();
    let cursor = if is_active && !field.is_choice() { "▌" } else { "" };

    let mut spans = Vec::new();
    if field.is_choice() {
        spans.push(Span::styled("◀ ", Style::default().fg(Color::DarkGray)));
    }
    if display_value.is_empty() {
        spans.push(Span::styled(
            field.placeholder,
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        spans.push(Span::styled(display_value, Style::default().fg(Color::White)));
    }
    spans.push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
    if field.is_choice() {
        spans.push(Span::styled(" ▶", Style::default().fg(Color::DarkGray)));
    }

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), chunks[0]);

    if let Some(message) = error {
        let error_line = Paragraph::new(Span::styled(
            format!(" {message}"),
            Style::default().fg(Color::Red),
        ));
        frame.render_widget(error_line, chunks[1]);
    }
}

/// Draw the help text line under a form
pub fn draw_help_text(frame: &mut Frame, area: Rect, text: &str) {
    let help = Paragraph::new(text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
