//! Layout components (header, status bar)

use super::components::{render_nav_button, BUTTON_HEIGHT};
use crate::app::App;
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{CardControlsFocus, Route};
use chrono::{Datelike, Utc};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const BRAND: &str = "Demo Bank";

/// Header navigation items, keyed by their dashboard shortcut
const NAV_ITEMS: &[(&str, &str)] = &[("1", "Accounts"), ("2", "Move Money"), ("3", "Card Controls")];

/// Split the frame into header and main content, reserving the bottom line
/// for the status bar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Header
            Constraint::Min(0),                // Content
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    (chunks[0], chunks[1])
}

/// Centre a box of the given size inside `area`, clamped to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Draw the header: brand on the left, navigation once signed in
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20), // Brand
            Constraint::Length(14), // Accounts
            Constraint::Length(16), // Move Money
            Constraint::Length(19), // Card Controls
            Constraint::Min(0),     // User
        ])
        .split(area);

    let brand = Paragraph::new(Line::from(Span::styled(
        format!(" ▣ {BRAND}"),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(brand, centre_row(chunks[0]));

    if !app.state.is_authenticated() {
        return;
    }

    for (idx, (key, label)) in NAV_ITEMS.iter().enumerate() {
        let is_selected = match idx {
            0 => matches!(app.state.current_route, Route::AccountsDashboard),
            1 => matches!(app.state.current_route, Route::MoveMoney { .. }),
            2 => matches!(app.state.current_route, Route::CardControls { .. }),
            _ => false,
        };
        render_nav_button(frame, chunks[idx + 1], key, label, is_selected);
    }

    let user = Paragraph::new(Line::from(vec![
        Span::styled("Demo User ", Style::default().fg(Color::White)),
        Span::styled("(L:log out) ", Style::default().fg(Color::DarkGray)),
    ]))
    .alignment(ratatui::layout::Alignment::Right);
    frame.render_widget(user, centre_row(chunks[4]));
}

/// Middle row of a header cell, so plain text lines up with bordered buttons
fn centre_row(area: Rect) -> Rect {
    Rect {
        y: area.y + area.height / 2,
        height: area.height.min(1),
        ..area
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Session status
    let session = if app.state.is_authenticated() {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    } else {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    };
    spans.push(session);

    spans.push(Span::styled(
        app.state.current_route.path(),
        Style::default().fg(Color::Blue),
    ));
    spans.push(Span::raw(" | "));

    // Route-specific hints
    let hints = get_route_hints(app);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Footer on the right
    let footer = format!(" © {} {BRAND} ^C:quit ", Utc::now().year());
    let footer_width = footer.chars().count() as u16;
    let footer_area = Rect {
        x: area.width.saturating_sub(footer_width),
        y: area.height.saturating_sub(1),
        width: footer_width.min(area.width),
        height: 1,
    };
    let footer_widget =
        Paragraph::new(footer).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(footer_widget, footer_area);
}

/// Get keyboard hints for the current route
fn get_route_hints(app: &App) -> String {
    match &app.state.current_route {
        Route::Login => format!("Tab:next  Enter/{SUBMIT_SHORTCUT}:login"),
        Route::AccountsDashboard => {
            "j/k:nav  Enter/m:move money  c:card  Space:details  y:copy  s:settings  q:quit"
                .to_string()
        }
        Route::MoveMoney { .. } => {
            format!("Tab:next  ←/→:account  {SUBMIT_SHORTCUT}:transfer  Esc:back")
        }
        Route::CardControls { .. } => {
            let row_hint = match app.state.card_controls.focus {
                CardControlsFocus::Freeze | CardControlsFocus::SpendingLimit => "Space:toggle",
                CardControlsFocus::LimitAmount => "0-9/Bksp:edit",
                CardControlsFocus::TransactionTypes => "←/→:choose  Space:toggle",
            };
            format!("j/k:row  {row_hint}  r:report lost  s:save  Esc:back")
        }
        Route::NotFound(_) => "Enter:home".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_inside() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(50, 10, area);
        assert_eq!(rect, Rect::new(25, 15, 50, 10));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(2, 1, 30, 8);
        let rect = centered_rect(50, 10, area);
        assert_eq!(rect, area);
    }
}
