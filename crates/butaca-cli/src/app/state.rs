//! Shell state and update logic.
//!
//! The shell composes the routed page, the navbar, the auth modal, and
//! the toast stack. Pages own their remote-data state; the shell owns
//! the single piece of cross-view state (which modal is open) and the
//! session snapshot. All mutation happens here, synchronously, so the
//! whole state machine is testable without a terminal or a network.

use crate::app::message::{AppMessage, AuthMode, Command};
use butaca_core::carousel::Carousel;
use butaca_core::catalog::{CastMember, CatalogEntry};
use butaca_core::comment::Comment;
use butaca_core::error::ButacaError;
use butaca_core::route::Route;
use butaca_core::session::{Session, SessionEvent};
use butaca_core::view::{GenerationCounter, RemoteData};
use crossterm::event::{KeyCode, KeyEvent};

/// The top-rated list shows this many entries.
pub const TOP_RATED_LIMIT: usize = 10;
/// The detail page shows the first entries of the credited cast.
pub const CAST_DISPLAY_COUNT: usize = 6;
/// Toast lifetime in timer ticks.
pub const TOAST_TICKS: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Warning,
}

/// A transient auto-dismissing notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub kind: ToastKind,
    pub text: String,
    ticks_left: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeFocus {
    Carousel,
    TopRated,
}

/// `/` - now-playing carousel plus the top-rated strip.
#[derive(Debug)]
pub struct HomeView {
    pub now_playing: RemoteData<Vec<CatalogEntry>>,
    pub carousel: Carousel,
    pub top_rated: RemoteData<Vec<CatalogEntry>>,
    pub top_selected: usize,
    pub focus: HomeFocus,
}

impl HomeView {
    fn new() -> Self {
        Self {
            now_playing: RemoteData::Loading,
            carousel: Carousel::new(0),
            top_rated: RemoteData::Loading,
            top_selected: 0,
            focus: HomeFocus::Carousel,
        }
    }

    /// The carousel entry under the cursor, once loaded.
    pub fn current_movie(&self) -> Option<&CatalogEntry> {
        self.now_playing.value()?.get(self.carousel.index())
    }
}

/// `/busqueda?query=...` - results derived solely from the route.
#[derive(Debug)]
pub struct SearchView {
    pub query: String,
    pub results: RemoteData<Vec<CatalogEntry>>,
    pub selected: usize,
}

/// `/detalles/:id` - details, cast and comments for one movie.
#[derive(Debug)]
pub struct DetailView {
    pub movie_id: u64,
    pub details: RemoteData<CatalogEntry>,
    pub cast: RemoteData<Vec<CastMember>>,
    pub comments: RemoteData<Vec<Comment>>,
    pub comment_input: String,
    pub comment_focused: bool,
    /// The explicit "sign in to comment" prompt, distinct from an auth
    /// failure inside the modal.
    pub sign_in_prompt: bool,
}

#[derive(Debug)]
pub enum Page {
    Home(HomeView),
    Search(SearchView),
    Detail(DetailView),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthField {
    Email,
    Password,
}

/// The sign-in / sign-up form. Both modes share one buffer pair.
#[derive(Debug)]
pub struct AuthModal {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub focus: AuthField,
    pub error: Option<String>,
}

impl AuthModal {
    fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            email: String::new(),
            password: String::new(),
            focus: AuthField::Email,
            error: None,
        }
    }

    /// Switches between sign-in and sign-up, keeping the buffers and
    /// clearing any displayed error.
    fn toggle_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::SignIn => AuthMode::SignUp,
            AuthMode::SignUp => AuthMode::SignIn,
        };
        self.error = None;
    }
}

/// Navbar state: the search text buffer and the account menu flag.
/// Stateless with respect to catalog data.
#[derive(Debug, Default)]
pub struct Navbar {
    pub search_input: String,
    pub search_focused: bool,
    pub account_menu_open: bool,
}

/// One generation counter per fetch slot. Counters live on the shell,
/// not on the pages, so a fetch still in flight when the user navigates
/// away is invalidated rather than resurrected by a fresh page.
#[derive(Debug, Default)]
struct Generations {
    now_playing: GenerationCounter,
    top_rated: GenerationCounter,
    search: GenerationCounter,
    details: GenerationCounter,
    cast: GenerationCounter,
    comments: GenerationCounter,
}

pub struct App {
    pub page: Page,
    pub navbar: Navbar,
    pub modal: Option<AuthModal>,
    pub toasts: Vec<Toast>,
    pub session: Option<Session>,
    pub should_quit: bool,
    generations: Generations,
}

impl App {
    /// Builds the shell at the home route and returns the initial
    /// fetch commands.
    pub fn new(session: Option<Session>) -> (Self, Vec<Command>) {
        let mut app = Self {
            page: Page::Home(HomeView::new()),
            navbar: Navbar::default(),
            modal: None,
            toasts: Vec::new(),
            session,
            should_quit: false,
            generations: Generations::default(),
        };
        let commands = app.navigate(Route::Home);
        (app, commands)
    }

    /// The address of the current page.
    pub fn current_route(&self) -> Route {
        match &self.page {
            Page::Home(_) => Route::Home,
            Page::Search(view) => Route::Search(view.query.clone()),
            Page::Detail(view) => Route::Details(view.movie_id),
        }
    }

    /// Replaces the current page and starts its fetches. Every slot the
    /// new page uses gets a fresh generation, so completions belonging
    /// to the previous trigger are discarded on arrival.
    pub fn navigate(&mut self, route: Route) -> Vec<Command> {
        match route {
            Route::Home => {
                self.page = Page::Home(HomeView::new());
                vec![
                    Command::LoadNowPlaying {
                        generation: self.generations.now_playing.begin(),
                    },
                    Command::LoadTopRated {
                        generation: self.generations.top_rated.begin(),
                    },
                ]
            }
            Route::Search(query) => {
                self.page = Page::Search(SearchView {
                    query: query.clone(),
                    results: RemoteData::Loading,
                    selected: 0,
                });
                vec![Command::LoadSearch {
                    generation: self.generations.search.begin(),
                    query,
                }]
            }
            Route::Details(id) => {
                self.page = Page::Detail(DetailView {
                    movie_id: id,
                    details: RemoteData::Loading,
                    cast: RemoteData::Loading,
                    comments: RemoteData::Loading,
                    comment_input: String::new(),
                    comment_focused: false,
                    sign_in_prompt: false,
                });
                vec![
                    Command::LoadDetails {
                        generation: self.generations.details.begin(),
                        id,
                    },
                    Command::LoadCast {
                        generation: self.generations.cast.begin(),
                        id,
                    },
                    Command::LoadComments {
                        generation: self.generations.comments.begin(),
                        id,
                    },
                ]
            }
        }
    }

    pub fn push_toast(&mut self, kind: ToastKind, text: impl Into<String>) {
        self.toasts.push(Toast {
            kind,
            text: text.into(),
            ticks_left: TOAST_TICKS,
        });
    }

    /// Applies one completion. Returns follow-up commands (e.g. a
    /// comment listing refresh after a successful post).
    pub fn update(&mut self, message: AppMessage) -> Vec<Command> {
        match message {
            AppMessage::NowPlayingLoaded { generation, result } => {
                if !self.generations.now_playing.is_current(generation) {
                    return Vec::new();
                }
                if let Page::Home(view) = &mut self.page {
                    view.now_playing = RemoteData::from_result(result);
                    let len = view.now_playing.value().map_or(0, Vec::len);
                    view.carousel.set_len(len);
                }
                Vec::new()
            }
            AppMessage::TopRatedLoaded { generation, result } => {
                if !self.generations.top_rated.is_current(generation) {
                    return Vec::new();
                }
                if let Page::Home(view) = &mut self.page {
                    view.top_rated = RemoteData::from_result(result);
                    view.top_selected = 0;
                }
                Vec::new()
            }
            AppMessage::SearchLoaded { generation, result } => {
                if !self.generations.search.is_current(generation) {
                    return Vec::new();
                }
                if let Page::Search(view) = &mut self.page {
                    view.results = RemoteData::from_result(result);
                    view.selected = 0;
                }
                Vec::new()
            }
            AppMessage::DetailsLoaded { generation, result } => {
                if !self.generations.details.is_current(generation) {
                    return Vec::new();
                }
                if let Page::Detail(view) = &mut self.page {
                    view.details = RemoteData::from_result(result);
                }
                Vec::new()
            }
            AppMessage::CastLoaded { generation, result } => {
                if !self.generations.cast.is_current(generation) {
                    return Vec::new();
                }
                if let Page::Detail(view) = &mut self.page {
                    // The gateway returns the full credits; the view
                    // shows only the leading members.
                    view.cast = RemoteData::from_result(
                        result.map(|mut cast| {
                            cast.truncate(CAST_DISPLAY_COUNT);
                            cast
                        }),
                    );
                }
                Vec::new()
            }
            AppMessage::CommentsLoaded { generation, result } => {
                if !self.generations.comments.is_current(generation) {
                    return Vec::new();
                }
                if let Page::Detail(view) = &mut self.page {
                    view.comments = RemoteData::from_result(result);
                }
                Vec::new()
            }
            AppMessage::AuthCompleted { mode, result } => self.apply_auth(mode, result),
            AppMessage::CommentPosted { movie_id, result } => {
                self.apply_comment_posted(movie_id, result)
            }
            AppMessage::SessionChanged(event) => {
                match event {
                    SessionEvent::SignedIn(session) => self.session = Some(session),
                    SessionEvent::SignedOut => self.session = None,
                }
                Vec::new()
            }
            AppMessage::Tick => {
                for toast in &mut self.toasts {
                    toast.ticks_left = toast.ticks_left.saturating_sub(1);
                }
                self.toasts.retain(|toast| toast.ticks_left > 0);
                Vec::new()
            }
        }
    }

    fn apply_auth(
        &mut self,
        mode: AuthMode,
        result: Result<Session, ButacaError>,
    ) -> Vec<Command> {
        match result {
            Ok(session) => {
                self.session = Some(session);
                self.modal = None;
                let text = match mode {
                    AuthMode::SignIn => "Signed in",
                    AuthMode::SignUp => "Account created",
                };
                self.push_toast(ToastKind::Success, text);
            }
            Err(err) => {
                let message = err.user_message();
                if let Some(modal) = &mut self.modal {
                    modal.error = Some(message.clone());
                }
                self.push_toast(ToastKind::Error, message);
            }
        }
        Vec::new()
    }

    fn apply_comment_posted(
        &mut self,
        movie_id: u64,
        result: Result<Comment, ButacaError>,
    ) -> Vec<Command> {
        match result {
            Ok(_) => {
                self.push_toast(ToastKind::Success, "Comment posted");
                if let Page::Detail(view) = &mut self.page {
                    if view.movie_id == movie_id {
                        view.comment_input.clear();
                        view.comment_focused = false;
                        view.comments = RemoteData::Loading;
                        return vec![Command::LoadComments {
                            generation: self.generations.comments.begin(),
                            id: movie_id,
                        }];
                    }
                }
                Vec::new()
            }
            Err(ButacaError::AuthorizationRequired) => {
                if let Page::Detail(view) = &mut self.page {
                    view.sign_in_prompt = true;
                }
                Vec::new()
            }
            Err(err @ ButacaError::Validation(_)) => {
                self.push_toast(ToastKind::Warning, err.user_message());
                Vec::new()
            }
            Err(err) => {
                self.push_toast(ToastKind::Error, err.user_message());
                Vec::new()
            }
        }
    }

    /// Handles one key press. Focused overlays (modal, prompt, menu,
    /// text inputs) take priority over page navigation.
    pub fn handle_key(&mut self, key: KeyEvent) -> Vec<Command> {
        if self.modal.is_some() {
            return self.handle_modal_key(key);
        }
        if let Page::Detail(view) = &mut self.page {
            if view.sign_in_prompt {
                match key.code {
                    KeyCode::Enter => {
                        view.sign_in_prompt = false;
                        self.modal = Some(AuthModal::new(AuthMode::SignIn));
                    }
                    KeyCode::Esc => view.sign_in_prompt = false,
                    _ => {}
                }
                return Vec::new();
            }
        }
        if self.navbar.account_menu_open {
            return self.handle_account_menu_key(key);
        }
        if self.navbar.search_focused {
            return self.handle_search_input_key(key);
        }
        if let Page::Detail(view) = &mut self.page {
            if view.comment_focused {
                return Self::handle_comment_input_key(view, key);
            }
        }
        self.handle_page_key(key)
    }

    fn handle_modal_key(&mut self, key: KeyEvent) -> Vec<Command> {
        let Some(modal) = &mut self.modal else {
            return Vec::new();
        };
        match key.code {
            KeyCode::Esc => {
                self.modal = None;
            }
            KeyCode::Tab => modal.toggle_mode(),
            KeyCode::Up | KeyCode::Down => {
                modal.focus = match modal.focus {
                    AuthField::Email => AuthField::Password,
                    AuthField::Password => AuthField::Email,
                };
            }
            KeyCode::Char(c) => match modal.focus {
                AuthField::Email => modal.email.push(c),
                AuthField::Password => modal.password.push(c),
            },
            KeyCode::Backspace => {
                match modal.focus {
                    AuthField::Email => modal.email.pop(),
                    AuthField::Password => modal.password.pop(),
                };
            }
            KeyCode::Enter => {
                if modal.email.is_empty() || modal.password.is_empty() {
                    modal.error = Some("Both fields are required".to_string());
                    return Vec::new();
                }
                modal.error = None;
                return vec![Command::Authenticate {
                    mode: modal.mode,
                    email: modal.email.clone(),
                    password: modal.password.clone(),
                }];
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_account_menu_key(&mut self, key: KeyEvent) -> Vec<Command> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('a') => self.navbar.account_menu_open = false,
            KeyCode::Char('i') if self.session.is_none() => {
                self.navbar.account_menu_open = false;
                self.modal = Some(AuthModal::new(AuthMode::SignIn));
            }
            KeyCode::Char('r') if self.session.is_none() => {
                self.navbar.account_menu_open = false;
                self.modal = Some(AuthModal::new(AuthMode::SignUp));
            }
            KeyCode::Char('o') if self.session.is_some() => {
                self.navbar.account_menu_open = false;
                // The broadcast comes back as SessionChanged; the toast
                // is immediate.
                self.push_toast(ToastKind::Success, "Signed out");
                return vec![Command::SignOut];
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_search_input_key(&mut self, key: KeyEvent) -> Vec<Command> {
        match key.code {
            KeyCode::Esc => {
                self.navbar.search_focused = false;
            }
            KeyCode::Char(c) => self.navbar.search_input.push(c),
            KeyCode::Backspace => {
                self.navbar.search_input.pop();
            }
            KeyCode::Enter => {
                let query = self.navbar.search_input.trim().to_string();
                // Only an explicit non-empty confirm navigates.
                if !query.is_empty() {
                    self.navbar.search_focused = false;
                    return self.navigate(Route::Search(query));
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_comment_input_key(view: &mut DetailView, key: KeyEvent) -> Vec<Command> {
        match key.code {
            KeyCode::Esc => {
                view.comment_focused = false;
            }
            KeyCode::Char(c) => view.comment_input.push(c),
            KeyCode::Backspace => {
                view.comment_input.pop();
            }
            KeyCode::Enter => {
                return vec![Command::PostComment {
                    movie_id: view.movie_id,
                    body: view.comment_input.clone(),
                }];
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_page_key(&mut self, key: KeyEvent) -> Vec<Command> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return Vec::new();
            }
            KeyCode::Char('/') => {
                self.navbar.search_focused = true;
                return Vec::new();
            }
            KeyCode::Char('a') => {
                self.navbar.account_menu_open = true;
                return Vec::new();
            }
            _ => {}
        }

        match &mut self.page {
            Page::Home(view) => match key.code {
                KeyCode::Tab => {
                    view.focus = match view.focus {
                        HomeFocus::Carousel => HomeFocus::TopRated,
                        HomeFocus::TopRated => HomeFocus::Carousel,
                    };
                    Vec::new()
                }
                KeyCode::Left => {
                    match view.focus {
                        HomeFocus::Carousel => view.carousel.prev(),
                        HomeFocus::TopRated => {
                            view.top_selected = view.top_selected.saturating_sub(1)
                        }
                    }
                    Vec::new()
                }
                KeyCode::Right => {
                    match view.focus {
                        HomeFocus::Carousel => view.carousel.next(),
                        HomeFocus::TopRated => {
                            let len = view.top_rated.value().map_or(0, Vec::len);
                            if view.top_selected + 1 < len {
                                view.top_selected += 1;
                            }
                        }
                    }
                    Vec::new()
                }
                KeyCode::Enter => {
                    let id = match view.focus {
                        HomeFocus::Carousel => view.current_movie().map(|movie| movie.id),
                        HomeFocus::TopRated => view
                            .top_rated
                            .value()
                            .and_then(|movies| movies.get(view.top_selected))
                            .map(|movie| movie.id),
                    };
                    match id {
                        Some(id) => self.navigate(Route::Details(id)),
                        None => Vec::new(),
                    }
                }
                _ => Vec::new(),
            },
            Page::Search(view) => match key.code {
                KeyCode::Up => {
                    view.selected = view.selected.saturating_sub(1);
                    Vec::new()
                }
                KeyCode::Down => {
                    let len = view.results.value().map_or(0, Vec::len);
                    if view.selected + 1 < len {
                        view.selected += 1;
                    }
                    Vec::new()
                }
                KeyCode::Enter => {
                    let id = view
                        .results
                        .value()
                        .and_then(|movies| movies.get(view.selected))
                        .map(|movie| movie.id);
                    match id {
                        Some(id) => self.navigate(Route::Details(id)),
                        None => Vec::new(),
                    }
                }
                KeyCode::Esc => self.navigate(Route::Home),
                _ => Vec::new(),
            },
            Page::Detail(view) => match key.code {
                KeyCode::Char('c') => {
                    view.comment_focused = true;
                    Vec::new()
                }
                KeyCode::Esc => self.navigate(Route::Home),
                _ => Vec::new(),
            },
        }
    }

    /// Whether the account menu shows sign-out (signed in) or the
    /// sign-in/register entries.
    pub fn is_signed_in(&self) -> bool {
        self.session.is_some()
    }
}
