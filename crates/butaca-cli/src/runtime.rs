//! Terminal event loop.
//!
//! Keyboard input is read on a dedicated thread; fetch completions,
//! session events, and timer ticks all arrive over one message channel.
//! The shell state only ever mutates on this loop, so every component's
//! render is deferred until its own result arrives without blocking any
//! other.

use crate::app::{App, AppMessage, Services, spawn_all};
use crate::ui;
use butaca_core::session::Session;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

const TICK_INTERVAL: Duration = Duration::from_millis(250);
const INPUT_POLL: Duration = Duration::from_millis(100);

pub async fn run(services: Services, session: Option<Session>) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, services, session).await;

    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    services: Services,
    session: Option<Session>,
) -> anyhow::Result<()> {
    let (messages_tx, mut messages_rx) = mpsc::unbounded_channel::<AppMessage>();

    // Session broadcast -> shell messages
    let mut session_events = services.sessions.subscribe();
    let session_tx = messages_tx.clone();
    tokio::spawn(async move {
        while let Ok(event) = session_events.recv().await {
            if session_tx.send(AppMessage::SessionChanged(event)).is_err() {
                break;
            }
        }
    });

    // Keyboard input on its own thread; crossterm reads are blocking
    let (keys_tx, mut keys_rx) = mpsc::unbounded_channel::<Event>();
    std::thread::spawn(move || {
        loop {
            if keys_tx.is_closed() {
                break;
            }
            match event::poll(INPUT_POLL) {
                Ok(true) => {
                    if let Ok(ev) = event::read() {
                        if keys_tx.send(ev).is_err() {
                            break;
                        }
                    }
                }
                Ok(false) => {}
                Err(_) => break,
            }
        }
    });

    let mut ticker = tokio::time::interval(TICK_INTERVAL);

    let (mut app, commands) = App::new(session);
    spawn_all(&services, commands, &messages_tx);

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        let commands = tokio::select! {
            Some(input) = keys_rx.recv() => {
                match input {
                    Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                    _ => Vec::new(),
                }
            }
            Some(message) = messages_rx.recv() => app.update(message),
            _ = ticker.tick() => app.update(AppMessage::Tick),
        };
        spawn_all(&services, commands, &messages_tx);

        if app.should_quit {
            debug!("quit requested");
            break;
        }
    }

    Ok(())
}
