//! Application shell: one event loop owning all view state.
//!
//! Network work runs in spawned tasks that report back over an mpsc
//! channel, so the UI thread never blocks on a fetch. Every spawned fetch
//! carries the generation it was issued under; results from a superseded
//! generation are dropped, which keeps a slow response from overwriting a
//! newer view.

use super::login::{AuthAction, AuthFlow};
use super::pages::{self, Fetch, PageData, Pages};
use super::route::Route;
use super::ui;
use crate::api::{ApiClient, ApiError, DownloadOutcome};
use crate::config::config;
use crate::logging;
use crate::session::SessionStore;
use crate::timeline::{TimelineAggregator, TimelineView};
use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::interval;

const GENERIC_LOGIN_ERROR: &str = "Invalid credentials. Please try again.";
const SESSION_EXPIRED_NOTICE: &str = "Session expired. Please log in again.";

/// Results sent back from spawned network tasks.
pub enum AppEvent {
    Page {
        generation: u64,
        route: Route,
        result: Result<PageData, ApiError>,
    },
    LoginDone {
        result: Result<(String, String), ApiError>,
    },
    ResetCodeIssued {
        result: Result<String, ApiError>,
    },
    ResetCompleted {
        result: Result<(), ApiError>,
    },
    ToggleDone {
        generation: u64,
        result: Result<TimelineView, ApiError>,
    },
    DownloadDone {
        result: Result<DownloadOutcome, ApiError>,
    },
}

pub struct App {
    pub(crate) api: ApiClient,
    pub(crate) session: SessionStore,
    /// Present while unauthenticated; `None` means the main view is active.
    pub(crate) auth: Option<AuthFlow>,
    pub(crate) route: Route,
    pub(crate) pages: Pages,
    pub(crate) timeline: TimelineAggregator,
    pub(crate) timeline_fetch: Fetch<()>,
    pub(crate) selected_step: usize,
    pub(crate) toggle_in_flight: bool,
    pub(crate) selected_extension: usize,
    pub(crate) status: Option<String>,
    pub(crate) tick_count: usize,
    generation: u64,
    tx: UnboundedSender<AppEvent>,
    rx: UnboundedReceiver<AppEvent>,
    should_quit: bool,
}

impl App {
    pub fn new(api: ApiClient, session: SessionStore, initial_route: Route) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let auth = if session.is_authenticated() {
            None
        } else {
            Some(AuthFlow::new())
        };
        Self {
            api,
            session,
            auth,
            route: initial_route,
            pages: Pages::default(),
            timeline: TimelineAggregator::new(),
            timeline_fetch: Fetch::Idle,
            selected_step: 0,
            toggle_in_flight: false,
            selected_extension: 0,
            status: None,
            tick_count: 0,
            generation: 0,
            tx,
            rx,
            should_quit: false,
        }
    }

    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut events = EventStream::new();
        let mut tick = interval(Duration::from_millis(100));

        if self.auth.is_none() {
            self.open_route(self.route);
        }

        loop {
            terminal.draw(|frame| ui::draw(frame, &self))?;

            tokio::select! {
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.on_key(key);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        logging::error(&format!("Terminal event error: {}", e));
                    }
                    None => break,
                },
                maybe_app_event = self.rx.recv() => {
                    if let Some(event) = maybe_app_event {
                        self.on_app_event(event);
                    }
                },
                _ = tick.tick() => {
                    self.tick_count = self.tick_count.wrapping_add(1);
                    if let Some(auth) = &mut self.auth {
                        auth.tick();
                    }
                },
            }

            if self.should_quit {
                break;
            }
        }
        Ok(())
    }

    // ---- key handling ----

    fn on_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.auth.is_some() {
            self.on_auth_key(key);
        } else {
            self.on_main_key(key);
        }
    }

    fn on_auth_key(&mut self, key: KeyEvent) {
        let Some(auth) = &mut self.auth else {
            return;
        };
        let Some(action) = auth.handle_key(key) else {
            return;
        };
        match action {
            AuthAction::SubmitLogin { username, password } => {
                auth.busy = true;
                auth.notice = None;
                let api = self.api.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = login_task(&api, &username, &password).await;
                    let _ = tx.send(AppEvent::LoginDone { result });
                });
            }
            AuthAction::RequestReset { username } => {
                auth.busy = true;
                let api = self.api.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = api
                        .request_password_reset(&username)
                        .await
                        .map(|r| r.reset_code);
                    let _ = tx.send(AppEvent::ResetCodeIssued { result });
                });
            }
            AuthAction::CompleteReset {
                username,
                reset_code,
                new_password,
            } => {
                auth.busy = true;
                let api = self.api.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = api
                        .complete_password_reset(&username, &reset_code, &new_password)
                        .await;
                    let _ = tx.send(AppEvent::ResetCompleted { result });
                });
            }
        }
    }

    fn on_main_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                return;
            }
            KeyCode::Char('l') => {
                self.logout(None);
                return;
            }
            KeyCode::Char('r') => {
                self.open_route(self.route);
                return;
            }
            KeyCode::Tab | KeyCode::Right => {
                self.open_route(self.route.next());
                return;
            }
            KeyCode::BackTab | KeyCode::Left => {
                self.open_route(self.route.prev());
                return;
            }
            KeyCode::Char(c @ '1'..='8') => {
                let index = c as usize - '1' as usize;
                if let Some(route) = Route::from_index(index) {
                    self.open_route(route);
                }
                return;
            }
            _ => {}
        }

        match self.route {
            Route::Progress => self.on_progress_key(key),
            Route::Extensions => self.on_extensions_key(key),
            _ => {}
        }
    }

    fn on_progress_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => {
                self.selected_step = self.selected_step.saturating_sub(1);
            }
            KeyCode::Down => {
                let len = self.timeline.visible_steps().len();
                if len > 0 {
                    self.selected_step = (self.selected_step + 1).min(len - 1);
                }
            }
            KeyCode::Char('c') => {
                self.timeline.cycle_filter();
                self.selected_step = 0;
            }
            KeyCode::Char(' ') => {
                self.toggle_selected_step();
            }
            _ => {}
        }
    }

    fn toggle_selected_step(&mut self) {
        if self.toggle_in_flight {
            return;
        }
        let Some(step) = self.timeline.visible_steps().get(self.selected_step) else {
            return;
        };
        let step_id = step.id.clone();
        let target = !step.is_completed;

        self.toggle_in_flight = true;
        self.status = None;
        let generation = self.generation;
        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = async {
                api.update_step_progress(&step_id, target).await?;
                TimelineView::fetch(&api).await
            }
            .await;
            let _ = tx.send(AppEvent::ToggleDone { generation, result });
        });
    }

    fn on_extensions_key(&mut self, key: KeyEvent) {
        let count = self
            .pages
            .extensions
            .ready()
            .map(|list| list.len())
            .unwrap_or(0);
        match key.code {
            KeyCode::Up => {
                self.selected_extension = self.selected_extension.saturating_sub(1);
            }
            KeyCode::Down => {
                if count > 0 {
                    self.selected_extension = (self.selected_extension + 1).min(count - 1);
                }
            }
            KeyCode::Enter => {
                let Some(extension) = self
                    .pages
                    .extensions
                    .ready()
                    .and_then(|list| list.get(self.selected_extension))
                    .cloned()
                else {
                    return;
                };
                self.status = Some(format!("Downloading {}…", extension.extension_name));
                let dir = config().download_dir();
                let api = self.api.clone();
                let tx = self.tx.clone();
                tokio::spawn(async move {
                    let result = api.download_extension(&extension, &dir).await;
                    let _ = tx.send(AppEvent::DownloadDone { result });
                });
            }
            _ => {}
        }
    }

    // ---- navigation + fetching ----

    /// Switch to `route` and start its fetches. Bumps the generation so any
    /// still-running fetch from the previous view is ignored on arrival.
    fn open_route(&mut self, route: Route) {
        self.route = route;
        self.generation += 1;
        self.status = None;

        if route == Route::Progress {
            self.timeline_fetch = Fetch::Loading;
            self.selected_step = 0;
        } else {
            self.pages.set_loading(route);
        }
        if route == Route::Extensions {
            self.selected_extension = 0;
        }

        let generation = self.generation;
        let api = self.api.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = pages::fetch_route(&api, route).await;
            let _ = tx.send(AppEvent::Page {
                generation,
                route,
                result,
            });
        });
    }

    // ---- task results ----

    fn on_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Page {
                generation,
                route,
                result,
            } => self.on_page_loaded(generation, route, result),
            AppEvent::LoginDone { result } => self.on_login_done(result),
            AppEvent::ResetCodeIssued { result } => self.on_reset_code(result),
            AppEvent::ResetCompleted { result } => self.on_reset_completed(result),
            AppEvent::ToggleDone { generation, result } => {
                self.on_toggle_done(generation, result)
            }
            AppEvent::DownloadDone { result } => self.on_download_done(result),
        }
    }

    fn on_page_loaded(
        &mut self,
        generation: u64,
        route: Route,
        result: Result<PageData, ApiError>,
    ) {
        if generation != self.generation {
            logging::info(&format!(
                "Dropping stale {} response (generation {} < {})",
                route.title(),
                generation,
                self.generation
            ));
            return;
        }

        match result {
            Ok(PageData::Timeline(view)) => {
                self.timeline.install(view);
                self.timeline_fetch = Fetch::Ready(());
                self.clamp_selected_step();
            }
            Ok(data) => self.pages.install(data),
            Err(ApiError::Unauthorized) => {
                self.logout(Some(SESSION_EXPIRED_NOTICE));
            }
            Err(e) => {
                logging::error(&format!("Loading {} failed: {}", route.title(), e));
                let message = format!("Could not load {}: {}", route.title(), e);
                if route == Route::Progress {
                    self.timeline_fetch = Fetch::Failed(message);
                } else {
                    self.pages.set_failed(route, message);
                }
            }
        }
    }

    fn on_login_done(&mut self, result: Result<(String, String), ApiError>) {
        let Some(auth) = &mut self.auth else {
            return;
        };
        auth.busy = false;
        match result {
            Ok((token, username)) => {
                if let Err(e) = self.session.adopt(&mut self.api, token, username) {
                    logging::error(&format!("Failed to persist session token: {}", e));
                }
                self.auth = None;
                self.open_route(self.route);
            }
            Err(e) => {
                // One generic message regardless of what actually failed
                logging::info(&format!("Login failed: {}", e));
                auth.error = Some(GENERIC_LOGIN_ERROR.to_string());
            }
        }
    }

    fn on_reset_code(&mut self, result: Result<String, ApiError>) {
        let Some(auth) = &mut self.auth else {
            return;
        };
        match result {
            Ok(code) => auth.on_code_issued(code),
            Err(e) => {
                logging::info(&format!("Reset request failed: {}", e));
                auth.busy = false;
                auth.error = Some("Could not request a reset code.".to_string());
            }
        }
    }

    fn on_reset_completed(&mut self, result: Result<(), ApiError>) {
        let Some(auth) = &mut self.auth else {
            return;
        };
        match result {
            Ok(()) => auth.on_reset_complete(),
            Err(e) => {
                auth.busy = false;
                // The backend's detail is shown inline on this form
                auth.error = Some(match e {
                    ApiError::Status { detail, .. } => detail,
                    other => {
                        logging::info(&format!("Password reset failed: {}", other));
                        "Password reset failed.".to_string()
                    }
                });
            }
        }
    }

    fn on_toggle_done(&mut self, generation: u64, result: Result<TimelineView, ApiError>) {
        self.toggle_in_flight = false;
        if generation != self.generation {
            logging::info("Dropping stale progress-toggle response");
            return;
        }
        match result {
            Ok(view) => {
                self.timeline.install(view);
                self.timeline_fetch = Fetch::Ready(());
                self.clamp_selected_step();
            }
            Err(ApiError::Unauthorized) => {
                self.logout(Some(SESSION_EXPIRED_NOTICE));
            }
            Err(e) => {
                logging::error(&format!("Progress update failed: {}", e));
                self.status = Some(format!("Update failed: {}", e));
            }
        }
    }

    fn on_download_done(&mut self, result: Result<DownloadOutcome, ApiError>) {
        match result {
            Ok(DownloadOutcome::Saved(path)) => {
                self.status = Some(format!("Saved to {}", path.display()));
            }
            Ok(DownloadOutcome::Unavailable(message)) => {
                self.status = Some(message);
            }
            Err(ApiError::Unauthorized) => {
                self.logout(Some(SESSION_EXPIRED_NOTICE));
            }
            Err(e) => {
                logging::error(&format!("Download failed: {}", e));
                self.status = Some("Download failed. Please try again.".to_string());
            }
        }
    }

    fn clamp_selected_step(&mut self) {
        let len = self.timeline.visible_steps().len();
        if len == 0 {
            self.selected_step = 0;
        } else {
            self.selected_step = self.selected_step.min(len - 1);
        }
    }

    /// Drop the session and return to the login screen. Also invalidates any
    /// in-flight fetches via a generation bump.
    fn logout(&mut self, notice: Option<&str>) {
        self.session.logout(&mut self.api);
        self.generation += 1;
        self.auth = Some(match notice {
            Some(text) => AuthFlow::with_notice(text),
            None => AuthFlow::new(),
        });
        self.pages = Pages::default();
        self.timeline = TimelineAggregator::new();
        self.timeline_fetch = Fetch::Idle;
        self.status = None;
        self.route = Route::Dashboard;
    }
}

/// Exchange credentials for a token and resolve the username. Runs inside a
/// spawned task; the app adopts the pair on success.
async fn login_task(
    api: &ApiClient,
    username: &str,
    password: &str,
) -> Result<(String, String), ApiError> {
    let token = api.login(username, password).await?.access_token;
    let mut probe = api.clone();
    probe.set_token(token.clone());
    let username = match probe.me().await {
        Ok(identity) => identity.username,
        Err(e) => {
            logging::warn(&format!("Identity fetch after login failed: {}", e));
            String::new()
        }
    };
    Ok((token, username))
}
