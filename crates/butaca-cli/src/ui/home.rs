//! Home page: now-playing carousel over a top-rated strip.

use crate::app::state::{HomeFocus, HomeView};
use butaca_core::view::RemoteData;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

pub fn draw(frame: &mut Frame, view: &HomeView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(6)])
        .split(area);

    draw_carousel(frame, view, chunks[0]);
    draw_top_rated(frame, view, chunks[1]);
}

fn draw_carousel(frame: &mut Frame, view: &HomeView, area: Rect) {
    let focused = view.focus == HomeFocus::Carousel;
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title("Now playing");

    let lines: Vec<Line> = match &view.now_playing {
        RemoteData::Loading => vec![Line::from("Loading...")],
        RemoteData::Failed(message) => vec![Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        ))],
        RemoteData::Loaded(movies) if movies.is_empty() => {
            vec![Line::from("Nothing is playing right now")]
        }
        RemoteData::Loaded(movies) => {
            let movie = &movies[view.carousel.index()];
            let year = movie
                .release_year
                .map(|year| year.to_string())
                .unwrap_or_else(|| "unknown year".to_string());
            vec![
                Line::from(Span::styled(
                    movie.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("Year: {year}")),
                Line::from(""),
                Line::from(movie.synopsis.clone()),
                Line::from(""),
                Line::from(Span::styled(
                    format!(
                        "< {}/{} >  [Enter] details",
                        view.carousel.index() + 1,
                        view.carousel.len()
                    ),
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        }
    };

    let body = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
    frame.render_widget(body, area);
}

fn draw_top_rated(frame: &mut Frame, view: &HomeView, area: Rect) {
    let focused = view.focus == HomeFocus::TopRated;
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title("Top rated");

    let line: Line = match &view.top_rated {
        RemoteData::Loading => Line::from("Loading..."),
        RemoteData::Failed(message) => {
            Line::from(Span::styled(message.clone(), Style::default().fg(Color::Red)))
        }
        RemoteData::Loaded(movies) if movies.is_empty() => Line::from("No top-rated movies"),
        RemoteData::Loaded(movies) => {
            let mut spans = Vec::new();
            for (i, movie) in movies.iter().enumerate() {
                let style = if focused && i == view.top_selected {
                    Style::default().fg(Color::Black).bg(Color::Yellow)
                } else {
                    Style::default()
                };
                spans.push(Span::styled(format!(" {} ", movie.title), style));
                spans.push(Span::raw("│"));
            }
            Line::from(spans)
        }
    };

    let body = Paragraph::new(line)
        .alignment(Alignment::Left)
        .block(block);
    frame.render_widget(body, area);
}
