//! Accounts dashboard rendering

use super::widgets::render_scrollable_list;
use crate::app::App;
use crate::state::Account;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the account cards
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Your Accounts ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if app.state.accounts.is_empty() {
        let empty = Paragraph::new("No accounts to display.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let currency = app.config.currency_symbol();
    let items: Vec<ListItem> = app
        .state
        .accounts
        .iter()
        .map(|account| {
            let expanded = app.state.dashboard.is_expanded(&account.id);
            ListItem::new(account_lines(account, currency, expanded))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Rgb(30, 40, 60)))
        .highlight_symbol("▸ ");

    render_scrollable_list(frame, area, list, app.state.dashboard.selected_index);
}

fn account_lines<'a>(account: &'a Account, currency: &str, expanded: bool) -> Vec<Line<'a>> {
    let balance_color = if account.balance < 0.0 {
        Color::Red
    } else {
        Color::Green
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                account.name.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", account.masked_number),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(Span::styled(
            account.display_balance(currency),
            Style::default()
                .fg(balance_color)
                .add_modifier(Modifier::BOLD),
        )),
    ];

    if let Some(info) = &account.quick_info {
        let title = info.title.as_deref().unwrap_or("Quick Info");
        if expanded {
            lines.push(Line::from(Span::styled(
                format!("▾ {title}"),
                Style::default().fg(Color::Cyan),
            )));
            for line in &info.lines {
                lines.push(Line::from(format!("    {line}")));
            }
        } else {
            lines.push(Line::from(Span::styled(
                format!("▸ {title} (Space)"),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    lines.push(Line::from(""));
    lines
}
