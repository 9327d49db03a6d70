//! Movie detail page: synopsis, leading cast, and comments.

use crate::app::state::DetailView;
use butaca_core::view::RemoteData;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn draw(frame: &mut Frame, view: &DetailView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(4),
            Constraint::Min(6),
        ])
        .split(area);

    draw_details(frame, view, chunks[0]);
    draw_cast(frame, view, chunks[1]);
    draw_comments(frame, view, chunks[2]);
}

fn remote_lines<'a, T, F>(data: &'a RemoteData<T>, empty: &'a str, render: F) -> Vec<Line<'a>>
where
    F: FnOnce(&'a T) -> Vec<Line<'a>>,
    T: HasLen,
{
    match data {
        RemoteData::Loading => vec![Line::from("Loading...")],
        RemoteData::Failed(message) => vec![Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Red),
        ))],
        RemoteData::Loaded(value) if value.is_empty() => vec![Line::from(empty)],
        RemoteData::Loaded(value) => render(value),
    }
}

/// Lets `remote_lines` treat single values and vectors uniformly.
trait HasLen {
    fn is_empty(&self) -> bool;
}

impl<T> HasLen for Vec<T> {
    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl HasLen for butaca_core::catalog::CatalogEntry {
    fn is_empty(&self) -> bool {
        false
    }
}

fn draw_details(frame: &mut Frame, view: &DetailView, area: Rect) {
    let lines = remote_lines(&view.details, "", |movie| {
        let year = movie
            .release_year
            .map(|year| year.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        vec![
            Line::from(Span::styled(
                movie.title.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("Release year: {year}")),
            Line::from(""),
            Line::from(movie.synopsis.as_str()),
        ]
    });
    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Details"));
    frame.render_widget(body, area);
}

fn draw_cast(frame: &mut Frame, view: &DetailView, area: Rect) {
    let lines = remote_lines(&view.cast, "No cast information", |cast| {
        let mut spans = Vec::new();
        for member in cast {
            spans.push(Span::raw(format!(" {} ", member.name)));
            if !member.role.is_empty() {
                spans.push(Span::styled(
                    format!("as {} ", member.role),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            spans.push(Span::raw("│"));
        }
        vec![Line::from(spans)]
    });
    let body = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Main cast"));
    frame.render_widget(body, area);
}

fn draw_comments(frame: &mut Frame, view: &DetailView, area: Rect) {
    let input_style = if view.comment_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let input_line = if view.comment_input.is_empty() && !view.comment_focused {
        Line::from(Span::styled("press c to write a comment", input_style))
    } else {
        Line::from(Span::styled(
            format!("> {}", view.comment_input),
            input_style,
        ))
    };

    let mut lines = vec![input_line, Line::from("")];
    lines.extend(remote_lines(&view.comments, "No comments yet", |comments| {
        comments
            .iter()
            .flat_map(|comment| {
                vec![
                    Line::from(vec![
                        Span::styled(
                            comment.author_email.as_str(),
                            Style::default().add_modifier(Modifier::BOLD),
                        ),
                        Span::styled(
                            format!("  {}", comment.posted_at.format("%Y-%m-%d %H:%M")),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]),
                    Line::from(comment.body.as_str()),
                    Line::from(""),
                ]
            })
            .collect()
    }));

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Comments"));
    frame.render_widget(body, area);
}
