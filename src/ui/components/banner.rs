//! Inline alert banner shown above form fields

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Banner height in rows (borders + title + message)
pub const BANNER_HEIGHT: u16 = 4;

/// Visual tone of a banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

impl BannerKind {
    fn color(&self) -> Color {
        match self {
            Self::Success => Color::Green,
            Self::Error => Color::Red,
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Error => "!",
        }
    }
}

/// Render a titled banner with a message
pub fn render_banner(frame: &mut Frame, area: Rect, kind: BannerKind, title: &str, message: &str) {
    let color = kind.color();
    let content = vec![
        Line::from(Span::styled(
            format!("{} {title}", kind.icon()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(message.to_string()),
    ];

    let banner = Paragraph::new(content).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    frame.render_widget(banner, area);
}
