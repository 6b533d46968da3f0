//! App — component-based event loop.
//!
//! Architecture:
//! - `App` owns all components and `AppState` (shared read-only data for
//!   components).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background
//!   tasks: terminal input, the OAuth callback listener, and the dashboard
//!   fetch.
//! - The event loop draws a frame, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.

use std::io;
use std::time::Duration;

use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use vibes_core::auth::{self, FlowPhase};
use vibes_core::config::Config;
use vibes_core::dashboard::{self, DashboardData};
use vibes_core::session::{MemorySession, SessionStore};

use crate::{
    action::Action,
    app_state::{AppState, ContentMode, View},
    callback::{self, CallbackEvent},
    component::Component,
    components::{
        artist_list::ArtistList, connect_panel::ConnectPanel, error_panel::ErrorPanel,
        genre_tags::GenreTags, header::Header, loading_panel::LoadingPanel, radar::Radar,
    },
    theme,
    widgets::status_bar,
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    Callback(CallbackEvent),
    DashboardLoaded(Box<DashboardData>),
    LoadFailed(String),
}

pub struct App {
    config: Config,
    client: reqwest::Client,
    session: MemorySession,
    state: AppState,
    should_quit: bool,

    header: Header,
    connect_panel: ConnectPanel,
    loading_panel: LoadingPanel,
    error_panel: ErrorPanel,
    artist_list: ArtistList,
    genre_tags: GenreTags,
    radar: Radar,

    msg_tx: Option<mpsc::Sender<AppMessage>>,
    callback_server: Option<JoinHandle<()>>,
}

impl App {
    pub fn new(config: Config, client: reqwest::Client) -> Self {
        let client_id_present = !config.client_id().is_empty();
        Self {
            config,
            client,
            session: MemorySession::new(),
            state: AppState::new(client_id_present),
            should_quit: false,
            header: Header,
            connect_panel: ConnectPanel,
            loading_panel: LoadingPanel::default(),
            error_panel: ErrorPanel,
            artist_list: ArtistList,
            genre_tags: GenreTags,
            radar: Radar,
            msg_tx: None,
            callback_server: None,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(64);
        self.msg_tx = Some(tx.clone());

        // ── Background task: keyboard events ──────────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // Spinner animation and other component maintenance.
        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        loop {
            terminal.draw(|f| self.draw(f))?;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    self.handle_message(msg).await;
                }

                _ = ui_tick.tick() => {
                    self.loading_panel.tick(&self.state);
                }
            }

            if self.should_quit {
                break;
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        if let Some(server) = self.callback_server.take() {
            server.abort();
        }
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    // ── Message handling ──────────────────────────────────────────────────────

    async fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Event(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                self.handle_key(key).await;
            }
            AppMessage::Event(_) => {}

            AppMessage::Callback(CallbackEvent::Code(code)) => {
                self.on_auth_code(code).await;
            }
            AppMessage::Callback(CallbackEvent::ServerFailed(reason)) => {
                error!("callback listener failed: {reason}");
                // Let a retry attempt a fresh bind.
                self.callback_server = None;
                self.session.clear_all();
                self.state.to_error(format!(
                    "Could not start the local sign-in listener ({reason}). \
                     Free the port or change [callback] in config.toml, then try again."
                ));
            }
            AppMessage::Callback(CallbackEvent::Denied(reason)) => {
                warn!("authorization denied: {reason}");
                self.session.clear_all();
                self.state
                    .to_error(format!("Spotify authorization was denied ({reason})."));
            }

            AppMessage::DashboardLoaded(data) => {
                info!(
                    artists = data.artists.len(),
                    tracks = data.tracks.len(),
                    radar = data.avg_features.is_some(),
                    "dashboard loaded"
                );
                self.state.to_content(*data);
            }
            AppMessage::LoadFailed(message) => {
                // The token may be stale or under-scoped; force a fresh
                // consent round-trip on retry.
                self.session.clear_token();
                self.state.to_error(message);
            }
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        // Global keys work on every screen.
        let is_quit = matches!(key.code, KeyCode::Char('q'))
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL));
        if is_quit {
            self.should_quit = true;
            return;
        }

        let actions = match self.state.view {
            View::Connect => self.connect_panel.handle_key(key, &self.state),
            View::Loading => self.loading_panel.handle_key(key, &self.state),
            View::Error => self.error_panel.handle_key(key, &self.state),
            View::Content => Vec::new(),
        };

        for action in actions {
            self.dispatch(action).await;
        }
    }

    async fn dispatch(&mut self, action: Action) {
        match action {
            Action::Connect => self.on_connect(),
            Action::TryAgain => {
                info!("retrying: clearing session and returning to connect");
                self.session.clear_all();
                self.state.to_connect();
            }
            Action::Quit => self.should_quit = true,
            Action::Noop => {}
        }
    }

    // ── Connect flow ──────────────────────────────────────────────────────────

    fn on_connect(&mut self) {
        let url = match auth::start_connect(&self.config, &mut self.session) {
            Ok(url) => url,
            Err(e) => {
                error!("connect failed before redirect: {e}");
                self.state.to_error(e.user_message());
                return;
            }
        };

        self.ensure_callback_server();
        self.state.to_loading(FlowPhase::Redirecting);
        self.state.auth_url = Some(url.clone());

        match open::that(&url) {
            Ok(()) => info!("opened browser for authorization"),
            // Not fatal: the URL stays on screen for a manual visit.
            Err(e) => warn!("could not open browser: {e}"),
        }
        self.state.phase = FlowPhase::AwaitingCallback;
    }

    /// The listener outlives individual attempts; start it once, lazily, so
    /// the port is only held after the user actually tries to connect.
    fn ensure_callback_server(&mut self) {
        if self.callback_server.is_some() {
            return;
        }
        let Some(tx) = self.msg_tx.clone() else {
            return;
        };

        let (cb_tx, mut cb_rx) = mpsc::channel::<CallbackEvent>(8);
        let handle = callback::start_server(
            self.config.callback.bind_address.clone(),
            self.config.callback.port,
            cb_tx,
        );
        self.callback_server = Some(handle);

        tokio::spawn(async move {
            while let Some(event) = cb_rx.recv().await {
                if tx.send(AppMessage::Callback(event)).await.is_err() {
                    break;
                }
            }
        });
    }

    async fn on_auth_code(&mut self, code: String) {
        self.state.to_loading(FlowPhase::Exchanging);

        let grant =
            match auth::handle_callback(&self.client, &self.config, &mut self.session, &code).await
            {
                Ok(grant) => grant,
                Err(e) => {
                    error!("token exchange failed: {e}");
                    self.session.clear_all();
                    self.state.to_error(e.user_message());
                    return;
                }
            };

        // The refresh token only exists here, at the end of an interactive
        // consent round-trip. Log it so the user can copy it out of the log
        // file into SPOTIFY_REFRESH_TOKEN for `vibes snapshot`.
        if let Some(refresh) = &grant.refresh_token {
            info!("refresh token (for `vibes snapshot`): {refresh}");
        }
        let token = grant.access_token;

        self.state.to_loading(FlowPhase::Connected);

        let Some(tx) = self.msg_tx.clone() else {
            return;
        };
        let client = self.client.clone();
        tokio::spawn(async move {
            let msg = match dashboard::load_dashboard(&client, &token).await {
                Ok(data) => AppMessage::DashboardLoaded(Box::new(data)),
                Err(e) => {
                    error!("dashboard load failed: {e}");
                    AppMessage::LoadFailed(e.user_message())
                }
            };
            let _ = tx.send(msg).await;
        });
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::C_BG)),
            frame.area(),
        );

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Min(3),    // body
                Constraint::Length(1), // status bar
            ])
            .split(frame.area());

        self.header.draw(frame, rows[0], &self.state);

        match self.state.view {
            View::Connect => self.connect_panel.draw(frame, rows[1], &self.state),
            View::Loading => self.loading_panel.draw(frame, rows[1], &self.state),
            View::Error => self.error_panel.draw(frame, rows[1], &self.state),
            View::Content => {
                let cols = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Length(32), Constraint::Min(20)])
                    .split(rows[1]);

                self.artist_list.draw(frame, cols[0], &self.state);
                match self.state.content_mode() {
                    ContentMode::Radar => self.radar.draw(frame, cols[1], &self.state),
                    ContentMode::Genres => self.genre_tags.draw(frame, cols[1], &self.state),
                }
            }
        }

        status_bar::draw(frame, rows[2], &self.state);
    }
}
