//! The interactive shell: state machine, messages, and command
//! execution.

pub mod message;
pub mod state;
pub mod tasks;

pub use message::{AppMessage, AuthMode, Command};
pub use state::{App, Page, ToastKind};
pub use tasks::{Services, execute, spawn_all};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::state::{AuthField, CAST_DISPLAY_COUNT, TOAST_TICKS};
    use butaca_application::{CommentUseCase, SessionUseCase};
    use butaca_core::catalog::{CastMember, CatalogEntry, CatalogGateway};
    use butaca_core::comment::{Comment, CommentStore};
    use butaca_core::error::{ButacaError, Result};
    use butaca_core::route::Route;
    use butaca_core::session::{AuthenticatedUser, IdentityGateway, Session, SessionStore};
    use butaca_core::view::RemoteData;
    use chrono::Utc;
    use crossterm::event::{KeyCode, KeyEvent};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn entry(id: u64, title: &str) -> CatalogEntry {
        CatalogEntry {
            id,
            title: title.to_string(),
            release_year: Some(2020),
            synopsis: "Y".to_string(),
            poster_image: Some("https://image.tmdb.org/t/p/w500/p.jpg".to_string()),
            backdrop_image: None,
        }
    }

    #[derive(Default)]
    struct FakeCatalog {
        now_playing: Vec<CatalogEntry>,
        top_rated: Vec<CatalogEntry>,
        search_results: Vec<CatalogEntry>,
        details: Option<CatalogEntry>,
        cast: Vec<CastMember>,
        fail: bool,
    }

    #[async_trait::async_trait]
    impl CatalogGateway for FakeCatalog {
        async fn fetch_now_playing(&self) -> Result<Vec<CatalogEntry>> {
            if self.fail {
                return Err(ButacaError::network("listing failed"));
            }
            Ok(self.now_playing.clone())
        }

        async fn fetch_top_rated(&self, limit: usize) -> Result<Vec<CatalogEntry>> {
            Ok(self.top_rated.iter().take(limit).cloned().collect())
        }

        async fn search_by_title(&self, query: &str) -> Result<Vec<CatalogEntry>> {
            if query.trim().is_empty() {
                return Ok(Vec::new());
            }
            Ok(self.search_results.clone())
        }

        async fn fetch_details(&self, _id: u64) -> Result<CatalogEntry> {
            self.details
                .clone()
                .ok_or_else(|| ButacaError::network("detail fetch failed"))
        }

        async fn fetch_cast(&self, _id: u64) -> Result<Vec<CastMember>> {
            Ok(self.cast.clone())
        }
    }

    struct FakeIdentity {
        reject: bool,
    }

    #[async_trait::async_trait]
    impl IdentityGateway for FakeIdentity {
        async fn sign_in(&self, email: &str, _password: &str) -> Result<AuthenticatedUser> {
            if self.reject {
                return Err(ButacaError::auth("Invalid email or password"));
            }
            Ok(AuthenticatedUser {
                user_id: "uid-1".to_string(),
                email: email.to_string(),
                id_token: "tok".to_string(),
            })
        }

        async fn sign_up(&self, email: &str, password: &str) -> Result<AuthenticatedUser> {
            self.sign_in(email, password).await
        }
    }

    #[derive(Default)]
    struct MemorySessionStore {
        session: Mutex<Option<Session>>,
    }

    impl SessionStore for MemorySessionStore {
        fn load(&self) -> Option<Session> {
            self.session.lock().unwrap().clone()
        }

        fn save(&self, session: &Session) -> Result<()> {
            *self.session.lock().unwrap() = Some(session.clone());
            Ok(())
        }

        fn clear(&self) -> Result<()> {
            *self.session.lock().unwrap() = None;
            Ok(())
        }
    }

    #[derive(Default)]
    struct MemoryCommentStore {
        comments: Mutex<Vec<Comment>>,
        post_calls: AtomicUsize,
    }

    #[async_trait::async_trait]
    impl CommentStore for MemoryCommentStore {
        async fn post_comment(
            &self,
            movie_id: u64,
            author_email: &str,
            body: &str,
        ) -> Result<Comment> {
            self.post_calls.fetch_add(1, Ordering::SeqCst);
            let comment = Comment {
                movie_id,
                author_email: author_email.to_string(),
                body: body.to_string(),
                posted_at: Utc::now(),
            };
            self.comments.lock().unwrap().push(comment.clone());
            Ok(comment)
        }

        async fn list_comments(&self, movie_id: u64) -> Result<Vec<Comment>> {
            Ok(self
                .comments
                .lock()
                .unwrap()
                .iter()
                .filter(|comment| comment.movie_id == movie_id)
                .cloned()
                .collect())
        }
    }

    fn services_with(
        catalog: FakeCatalog,
        reject_auth: bool,
    ) -> (Services, Arc<MemoryCommentStore>) {
        let store = Arc::new(MemoryCommentStore::default());
        let sessions = SessionUseCase::new(
            Arc::new(FakeIdentity {
                reject: reject_auth,
            }),
            Arc::new(MemorySessionStore::default()),
        );
        let comments = CommentUseCase::new(store.clone(), sessions.clone());
        (
            Services {
                catalog: Arc::new(catalog),
                sessions,
                comments,
            },
            store,
        )
    }

    /// Runs every command to completion, feeding results back into the
    /// app, until no follow-up commands remain.
    async fn settle(app: &mut App, services: &Services, mut commands: Vec<Command>) {
        while let Some(command) = commands.pop() {
            if let Some(message) = execute(services, command).await {
                commands.extend(app.update(message));
            }
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::from(code)
    }

    #[tokio::test]
    async fn test_detail_route_shows_six_cast_members_and_title() {
        let cast: Vec<CastMember> = (0..8)
            .map(|i| CastMember {
                id: i,
                name: format!("Actor {i}"),
                role: "Role".to_string(),
                portrait_image: None,
            })
            .collect();
        let (services, _) = services_with(
            FakeCatalog {
                details: Some(entry(42, "X")),
                cast,
                ..FakeCatalog::default()
            },
            false,
        );

        let (mut app, _) = App::new(None);
        let commands = app.navigate(Route::parse("/detalles/42").unwrap());
        settle(&mut app, &services, commands).await;

        let Page::Detail(view) = &app.page else {
            panic!("expected detail page");
        };
        let details = view.details.value().expect("details loaded");
        assert_eq!(details.title, "X");
        assert_eq!(details.release_year, Some(2020));
        assert_eq!(view.cast.value().unwrap().len(), CAST_DISPLAY_COUNT);
        assert!(view.comments.value().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_search_with_zero_matches_is_loaded_not_failed() {
        let (services, _) = services_with(FakeCatalog::default(), false);
        let (mut app, _) = App::new(None);

        let commands = app.navigate(Route::parse("/busqueda?query=batman").unwrap());
        settle(&mut app, &services, commands).await;

        let Page::Search(view) = &app.page else {
            panic!("expected search page");
        };
        assert_eq!(view.query, "batman");
        // "No results" is a branch of Loaded, never Failed.
        assert!(view.results.is_loaded());
        assert!(view.results.value().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_authenticated_comment_round_trip() {
        let (services, store) = services_with(
            FakeCatalog {
                details: Some(entry(42, "X")),
                ..FakeCatalog::default()
            },
            false,
        );
        services
            .sessions
            .sign_in("ana@example.com", "secret")
            .await
            .unwrap();

        let (mut app, _) = App::new(services.sessions.current_session());
        let commands = app.navigate(Route::Details(42));
        settle(&mut app, &services, commands).await;

        // Focus the comment box and type
        let mut commands = app.handle_key(key(KeyCode::Char('c')));
        for c in "Great movie".chars() {
            commands.extend(app.handle_key(key(KeyCode::Char(c))));
        }
        commands.extend(app.handle_key(key(KeyCode::Enter)));
        settle(&mut app, &services, commands).await;

        assert_eq!(store.post_calls.load(Ordering::SeqCst), 1);
        let Page::Detail(view) = &app.page else {
            panic!("expected detail page");
        };
        let comments = view.comments.value().expect("comments reloaded");
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].body, "Great movie");
        assert_eq!(comments[0].author_email, "ana@example.com");
        assert!(view.comment_input.is_empty());
        assert!(app
            .toasts
            .iter()
            .any(|toast| toast.kind == ToastKind::Success));
    }

    #[tokio::test]
    async fn test_unauthenticated_comment_opens_sign_in_prompt() {
        let (services, store) = services_with(
            FakeCatalog {
                details: Some(entry(42, "X")),
                ..FakeCatalog::default()
            },
            false,
        );

        let (mut app, _) = App::new(None);
        let commands = app.navigate(Route::Details(42));
        settle(&mut app, &services, commands).await;

        let mut commands = app.handle_key(key(KeyCode::Char('c')));
        for c in "hola".chars() {
            commands.extend(app.handle_key(key(KeyCode::Char(c))));
        }
        commands.extend(app.handle_key(key(KeyCode::Enter)));
        settle(&mut app, &services, commands).await;

        let Page::Detail(view) = &app.page else {
            panic!("expected detail page");
        };
        assert!(view.sign_in_prompt);
        assert_eq!(store.post_calls.load(Ordering::SeqCst), 0);

        // Confirming the prompt opens the sign-in modal
        app.handle_key(key(KeyCode::Enter));
        assert!(app.modal.is_some());
    }

    #[tokio::test]
    async fn test_empty_comment_is_a_warning_without_store_call() {
        let (services, store) = services_with(
            FakeCatalog {
                details: Some(entry(42, "X")),
                ..FakeCatalog::default()
            },
            false,
        );
        services
            .sessions
            .sign_in("ana@example.com", "secret")
            .await
            .unwrap();

        let (mut app, _) = App::new(services.sessions.current_session());
        let commands = app.navigate(Route::Details(42));
        settle(&mut app, &services, commands).await;

        let mut commands = app.handle_key(key(KeyCode::Char('c')));
        commands.extend(app.handle_key(key(KeyCode::Char(' '))));
        commands.extend(app.handle_key(key(KeyCode::Enter)));
        settle(&mut app, &services, commands).await;

        assert_eq!(store.post_calls.load(Ordering::SeqCst), 0);
        assert!(app
            .toasts
            .iter()
            .any(|toast| toast.kind == ToastKind::Warning));
    }

    #[tokio::test]
    async fn test_stale_search_result_is_discarded() {
        let (mut app, _) = App::new(None);

        let first = app.navigate(Route::Search("a".to_string()));
        let Command::LoadSearch {
            generation: stale, ..
        } = first[0].clone()
        else {
            panic!("expected a search command");
        };

        // A newer trigger starts before the first fetch completes
        let second = app.navigate(Route::Search("ab".to_string()));
        let Command::LoadSearch {
            generation: current,
            ..
        } = second[0].clone()
        else {
            panic!("expected a search command");
        };

        // The stale completion arrives late and is dropped silently
        app.update(AppMessage::SearchLoaded {
            generation: stale,
            result: Ok(vec![entry(1, "stale")]),
        });
        let Page::Search(view) = &app.page else {
            panic!("expected search page");
        };
        assert!(view.results.is_loading());

        app.update(AppMessage::SearchLoaded {
            generation: current,
            result: Ok(vec![entry(2, "fresh")]),
        });
        let Page::Search(view) = &app.page else {
            panic!("expected search page");
        };
        assert_eq!(view.results.value().unwrap()[0].title, "fresh");
    }

    #[tokio::test]
    async fn test_failed_listing_renders_failed_state() {
        let (services, _) = services_with(
            FakeCatalog {
                fail: true,
                ..FakeCatalog::default()
            },
            false,
        );
        let (mut app, commands) = App::new(None);
        settle(&mut app, &services, commands).await;

        let Page::Home(view) = &app.page else {
            panic!("expected home page");
        };
        assert!(view.now_playing.is_failed());
    }

    #[tokio::test]
    async fn test_home_carousel_navigation_and_open() {
        let (services, _) = services_with(
            FakeCatalog {
                now_playing: vec![entry(1, "uno"), entry(2, "dos"), entry(3, "tres")],
                details: Some(entry(2, "dos")),
                ..FakeCatalog::default()
            },
            false,
        );
        let (mut app, commands) = App::new(None);
        settle(&mut app, &services, commands).await;

        app.handle_key(key(KeyCode::Right));
        let Page::Home(view) = &app.page else {
            panic!("expected home page");
        };
        assert_eq!(view.current_movie().unwrap().id, 2);

        let commands = app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.current_route(), Route::Details(2));
        settle(&mut app, &services, commands).await;
    }

    #[tokio::test]
    async fn test_search_submit_from_navbar_sets_route() {
        let (mut app, _) = App::new(None);

        app.handle_key(key(KeyCode::Char('/')));
        assert!(app.navbar.search_focused);
        for c in "batman".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        let commands = app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.current_route(), Route::Search("batman".to_string()));
        assert_eq!(app.current_route().to_path(), "/busqueda?query=batman");
        assert_eq!(commands.len(), 1);
    }

    #[tokio::test]
    async fn test_whitespace_search_submit_does_not_navigate() {
        let (mut app, _) = App::new(None);
        app.handle_key(key(KeyCode::Char('/')));
        app.handle_key(key(KeyCode::Char(' ')));
        let commands = app.handle_key(key(KeyCode::Enter));
        assert!(commands.is_empty());
        assert_eq!(app.current_route(), Route::Home);
    }

    #[tokio::test]
    async fn test_auth_modal_flow() {
        let (services, _) = services_with(FakeCatalog::default(), false);
        let (mut app, _) = App::new(None);

        // Open the account menu, pick sign-in
        app.handle_key(key(KeyCode::Char('a')));
        assert!(app.navbar.account_menu_open);
        app.handle_key(key(KeyCode::Char('i')));
        assert!(app.modal.is_some());

        // Submitting with empty fields is an inline error, no command
        let commands = app.handle_key(key(KeyCode::Enter));
        assert!(commands.is_empty());
        assert!(app.modal.as_ref().unwrap().error.is_some());

        // Switching modes clears the error
        app.handle_key(key(KeyCode::Tab));
        let modal = app.modal.as_ref().unwrap();
        assert_eq!(modal.mode, AuthMode::SignUp);
        assert!(modal.error.is_none());
        app.handle_key(key(KeyCode::Tab));

        // Fill in both fields and submit
        for c in "ana@example.com".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.modal.as_ref().unwrap().focus, AuthField::Password);
        for c in "secret".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        let commands = app.handle_key(key(KeyCode::Enter));
        settle(&mut app, &services, commands).await;

        assert!(app.modal.is_none());
        assert!(app.is_signed_in());
        assert_eq!(app.session.as_ref().unwrap().email, "ana@example.com");
        assert!(app
            .toasts
            .iter()
            .any(|toast| toast.kind == ToastKind::Success));
    }

    #[tokio::test]
    async fn test_rejected_auth_keeps_modal_open_with_error() {
        let (services, _) = services_with(FakeCatalog::default(), true);
        let (mut app, _) = App::new(None);

        app.handle_key(key(KeyCode::Char('a')));
        app.handle_key(key(KeyCode::Char('i')));
        for c in "ana@example.com".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Down));
        for c in "wrong".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        let commands = app.handle_key(key(KeyCode::Enter));
        settle(&mut app, &services, commands).await;

        let modal = app.modal.as_ref().expect("modal stays open for retry");
        assert!(modal.error.as_deref().unwrap().contains("Invalid"));
        assert!(!app.is_signed_in());
        assert!(app.toasts.iter().any(|toast| toast.kind == ToastKind::Error));
    }

    #[tokio::test]
    async fn test_toasts_expire_after_their_ticks() {
        let (mut app, _) = App::new(None);
        app.push_toast(ToastKind::Success, "hello");
        for _ in 0..TOAST_TICKS {
            app.update(AppMessage::Tick);
        }
        assert!(app.toasts.is_empty());
    }

    #[tokio::test]
    async fn test_sign_out_from_menu_emits_command_and_session_event_applies() {
        let (services, _) = services_with(FakeCatalog::default(), false);
        services
            .sessions
            .sign_in("ana@example.com", "secret")
            .await
            .unwrap();
        let (mut app, _) = App::new(services.sessions.current_session());
        assert!(app.is_signed_in());

        app.handle_key(key(KeyCode::Char('a')));
        let commands = app.handle_key(key(KeyCode::Char('o')));
        assert_eq!(commands, vec![Command::SignOut]);
        settle(&mut app, &services, commands).await;
        assert!(services.sessions.current_session().is_none());

        app.update(AppMessage::SessionChanged(
            butaca_core::session::SessionEvent::SignedOut,
        ));
        assert!(!app.is_signed_in());
    }

    #[tokio::test]
    async fn test_remote_data_from_result_uses_loaded_for_empty_vec() {
        let state: RemoteData<Vec<CatalogEntry>> = RemoteData::from_result(Ok(Vec::new()));
        assert!(state.is_loaded());
    }
}
