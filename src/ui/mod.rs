//! UI module for rendering the TUI

mod card_controls;
mod components;
mod dashboard;
mod forms;
mod layout;
mod not_found;
mod widgets;

use crate::app::App;
use crate::state::Route;
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let (header_area, main_area) = layout::create_layout(area);
    layout::draw_header(frame, header_area, app);

    // Draw main content based on current route
    match &app.state.current_route {
        Route::Login => forms::draw_login(frame, main_area, app),
        Route::AccountsDashboard => dashboard::draw(frame, main_area, app),
        Route::MoveMoney { .. } => forms::draw_move_money(frame, main_area, app),
        Route::CardControls { .. } => card_controls::draw(frame, main_area, app),
        Route::NotFound(path) => not_found::draw(frame, path),
    }

    layout::draw_status_bar(frame, app);

    // Toasts go over everything else
    components::render_toasts(frame, &app.state.notifications);
}
