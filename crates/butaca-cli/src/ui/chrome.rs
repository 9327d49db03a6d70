//! Navbar, account menu, auth modal, sign-in prompt, and toasts.

use crate::app::message::AuthMode;
use crate::app::state::{AuthField, AuthModal, ToastKind};
use crate::app::App;
use crate::ui::centered_rect;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

pub fn draw_navbar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Min(10),
            Constraint::Length(24),
        ])
        .split(area);

    let logo = Paragraph::new("Butaca")
        .style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(logo, chunks[0]);

    let search_style = if app.navbar.search_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let search_text = if app.navbar.search_input.is_empty() && !app.navbar.search_focused {
        Line::from(Span::styled(
            "press / to search",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(app.navbar.search_input.as_str())
    };
    let search = Paragraph::new(search_text)
        .style(search_style)
        .block(Block::default().borders(Borders::ALL).title("Search"));
    frame.render_widget(search, chunks[1]);

    let account_text = match &app.session {
        Some(session) => session.email.clone(),
        None => "not signed in [a]".to_string(),
    };
    let account = Paragraph::new(account_text)
        .alignment(Alignment::Right)
        .block(Block::default().borders(Borders::ALL).title("Account"));
    frame.render_widget(account, chunks[2]);
}

pub fn draw_account_menu(frame: &mut Frame, app: &App) {
    let lines: Vec<Line> = if app.is_signed_in() {
        vec![Line::from("[o] Sign out"), Line::from("[Esc] Close")]
    } else {
        vec![
            Line::from("[i] Sign in"),
            Line::from("[r] Register"),
            Line::from("[Esc] Close"),
        ]
    };
    let height = lines.len() as u16 + 2;
    let area = Rect {
        x: frame.size().width.saturating_sub(26),
        y: 3,
        width: 24.min(frame.size().width),
        height: height.min(frame.size().height),
    };
    frame.render_widget(Clear, area);
    let menu = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Account"));
    frame.render_widget(menu, area);
}

pub fn draw_auth_modal(frame: &mut Frame, modal: &AuthModal) {
    let area = centered_rect(44, 11, frame.size());
    frame.render_widget(Clear, area);

    let title = match modal.mode {
        AuthMode::SignIn => "Sign in",
        AuthMode::SignUp => "Register",
    };

    let field_line = |label: &str, value: &str, focused: bool, masked: bool| {
        let shown = if masked {
            "*".repeat(value.len())
        } else {
            value.to_string()
        };
        let style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::raw(format!("{label}: ")),
            Span::styled(shown, style),
            Span::raw(if focused { "_" } else { "" }),
        ])
    };

    let mut lines = vec![
        field_line(
            "Email",
            &modal.email,
            modal.focus == AuthField::Email,
            false,
        ),
        field_line(
            "Password",
            &modal.password,
            modal.focus == AuthField::Password,
            true,
        ),
        Line::from(""),
    ];
    if let Some(error) = &modal.error {
        lines.push(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    lines.push(Line::from(Span::styled(
        match modal.mode {
            AuthMode::SignIn => "[Tab] no account? register",
            AuthMode::SignUp => "[Tab] have an account? sign in",
        },
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(Line::from(Span::styled(
        "[Enter] submit  [Esc] close",
        Style::default().fg(Color::DarkGray),
    )));

    let form = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(form, area);
}

pub fn draw_sign_in_prompt(frame: &mut Frame) {
    let area = centered_rect(44, 5, frame.size());
    frame.render_widget(Clear, area);
    let prompt = Paragraph::new(vec![
        Line::from("You must be signed in to comment"),
        Line::from(Span::styled(
            "[Enter] sign in  [Esc] close",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Notice"));
    frame.render_widget(prompt, area);
}

pub fn draw_toasts(frame: &mut Frame, app: &App) {
    let mut y = frame.size().y + 1;
    for toast in &app.toasts {
        let color = match toast.kind {
            ToastKind::Success => Color::Green,
            ToastKind::Error => Color::Red,
            ToastKind::Warning => Color::Yellow,
        };
        let width = (toast.text.len() as u16 + 4).min(frame.size().width);
        let area = Rect {
            x: frame.size().width.saturating_sub(width) / 2,
            y,
            width,
            height: 3.min(frame.size().height.saturating_sub(y)),
        };
        if area.height == 0 {
            break;
        }
        frame.render_widget(Clear, area);
        let body = Paragraph::new(toast.text.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(color))
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(body, area);
        y += 3;
    }
}
