//! Terminal rendering.
//!
//! Pure functions from shell state to ratatui widgets; nothing here
//! mutates the `App`.

mod chrome;
mod detail;
mod home;
mod search;

use crate::app::state::Page;
use crate::app::App;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(frame.size());

    chrome::draw_navbar(frame, app, chunks[0]);

    match &app.page {
        Page::Home(view) => home::draw(frame, view, chunks[1]),
        Page::Search(view) => search::draw(frame, view, chunks[1]),
        Page::Detail(view) => detail::draw(frame, view, chunks[1]),
    }

    if let Page::Detail(view) = &app.page {
        if view.sign_in_prompt {
            chrome::draw_sign_in_prompt(frame);
        }
    }
    if let Some(modal) = &app.modal {
        chrome::draw_auth_modal(frame, modal);
    }
    if app.navbar.account_menu_open {
        chrome::draw_account_menu(frame, app);
    }
    chrome::draw_toasts(frame, app);
}

/// Centers a fixed-size box inside `area`.
pub(crate) fn centered_rect(
    width: u16,
    height: u16,
    area: ratatui::layout::Rect,
) -> ratatui::layout::Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    ratatui::layout::Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}
