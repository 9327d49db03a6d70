//! Search results page.

use crate::app::state::SearchView;
use butaca_core::view::RemoteData;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Frame;

pub fn draw(frame: &mut Frame, view: &SearchView, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("Search results for '{}'", view.query));

    match &view.results {
        RemoteData::Loading => {
            frame.render_widget(Paragraph::new("Loading...").block(block), area);
        }
        RemoteData::Failed(message) => {
            let body = Paragraph::new(Span::styled(
                message.clone(),
                Style::default().fg(Color::Red),
            ))
            .block(block);
            frame.render_widget(body, area);
        }
        RemoteData::Loaded(movies) if movies.is_empty() => {
            // The no-results branch of Loaded, not a failure
            frame.render_widget(
                Paragraph::new("No movies matched your search").block(block),
                area,
            );
        }
        RemoteData::Loaded(movies) => {
            let items: Vec<ListItem> = movies
                .iter()
                .map(|movie| {
                    let year = movie
                        .release_year
                        .map(|year| format!(" ({year})"))
                        .unwrap_or_default();
                    ListItem::new(format!("{}{year}", movie.title))
                })
                .collect();
            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().fg(Color::Black).bg(Color::Yellow))
                .highlight_symbol("> ");
            let mut state = ListState::default();
            state.select(Some(view.selected));
            frame.render_stateful_widget(list, area, &mut state);
        }
    }
}
