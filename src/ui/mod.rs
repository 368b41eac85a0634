//! View rendering.
//!
//! Pure functions from application state to a frame; no state mutation
//! happens here.

mod theme;
mod views;

pub use theme::Theme;

use ratatui::Frame;

use crate::app::{App, View};

pub fn draw(frame: &mut Frame, app: &App, theme: &Theme) {
    match app.view {
        View::MainMenu => views::draw_main_menu(frame, app, theme),
        View::ProfileList => views::draw_profile_list(frame, app, theme),
        View::CreateForm => views::draw_form(frame, app, theme, "Create New Profile"),
        View::EditForm => views::draw_form(frame, app, theme, "Edit Profile"),
        View::Running => views::draw_running(frame, app, theme),
    }
    views::draw_notice(frame, app, theme);
}
