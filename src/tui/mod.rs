//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! Each pass of the loop:
//!
//! 1. Draws, if anything changed since the last frame.
//! 2. Polls the terminal (up to 250ms) and drains all pending key events.
//! 3. Emits `Action::Tick` once per elapsed second (resend cooldown).
//! 4. Drains actions sent back by effect tasks.
//!
//! `update()` only ever runs on this thread. Effects are spawned on the
//! tokio runtime and report back over the mpsc channel.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;

use crate::api::{ApiService, CoinApi, Credentials, Transport};
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::effects;
use crate::core::route::{DASHBOARD_PATH, Location, Route};
use crate::core::state::App;
use crate::core::validate;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    DashboardEvent, DashboardViewState, LoginEvent, LoginForm, RegisterEvent, RegisterForm,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const TICK: Duration = Duration::from_secs(1);
const POLL_TIMEOUT: Duration = Duration::from_millis(250);

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub login_form: LoginForm,
    pub register_form: RegisterForm,
    pub dashboard: DashboardViewState,
    /// Route shown in the last frame, to notice screen changes.
    last_route: Option<Route>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            login_form: LoginForm::new(),
            register_form: RegisterForm::new(),
            dashboard: DashboardViewState::new(),
            last_route: None,
        }
    }

    /// Resets per-visit form state when the screen changes.
    fn sync_route(&mut self, route: Route) {
        if self.last_route == Some(route) {
            return;
        }
        if route == Route::Login {
            self.login_form.reset_code();
        }
        self.last_route = Some(route);
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableBracketedPaste,
            Show,                        // Show cursor for field editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset on redraw
        )?;
        info!("Terminal modes enabled (bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, Hide);
    }
}

/// Build the API client from a resolved config.
pub fn build_api(config: &ResolvedConfig) -> Arc<dyn CoinApi> {
    let transport = Transport::with_timeout(&config.base_url, config.timeout);
    Arc::new(ApiService::new(transport))
}

/// Translates a terminal event into an action for the current screen.
/// Form input is validated here; a validation error becomes
/// `Action::ValidationFailed` and nothing is sent.
fn action_for(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }
    match app.route() {
        Route::Login => match tui.login_form.handle_event(event)? {
            LoginEvent::RequestCode { mobile } => Some(match validate::mobile(&mobile) {
                Ok(mobile) => Action::RequestCode { mobile },
                Err(e) => Action::ValidationFailed(e),
            }),
            LoginEvent::Submit { mobile, code } => {
                Some(match validate::code_submission(&mobile, &code) {
                    Ok(submission) => Action::SubmitCode(submission),
                    Err(e) => Action::ValidationFailed(e),
                })
            }
        },
        Route::Register => match tui.register_form.handle_event(event)? {
            RegisterEvent::Submit { name } => Some(match validate::display_name(&name) {
                Ok(name) => Action::Register { name },
                Err(e) => Action::ValidationFailed(e),
            }),
        },
        Route::Root | Route::Dashboard => match tui.dashboard.handle_event(event)? {
            DashboardEvent::Reload => Some(Action::ReloadDashboard),
            DashboardEvent::Logout => Some(Action::Logout),
            DashboardEvent::Quit => Some(Action::Quit),
        },
        Route::NotFound => match event {
            TuiEvent::InputChar('d') => Some(Action::Navigate(Location::new(DASHBOARD_PATH))),
            TuiEvent::InputChar('q') | TuiEvent::Escape => Some(Action::Quit),
            _ => None,
        },
    }
}

/// Applies an action and spawns its effects. Returns true when the app should quit.
fn dispatch(
    app: &mut App,
    action: Action,
    api: &Arc<dyn CoinApi>,
    tx: &mpsc::Sender<Action>,
) -> bool {
    let mut quit = false;
    for effect in update(app, action) {
        if effect == Effect::Quit {
            quit = true;
        } else {
            effects::spawn(effect, api.clone(), tx.clone());
        }
    }
    quit
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let api = build_api(&config);
    let mut app = App::new(Credentials::new(config.access_token.clone()));
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start = Location::parse(&config.start_route);
    let mut should_quit = dispatch(&mut app, Action::Startup(start), &api, &tx);

    let mut last_tick = Instant::now();
    let mut needs_redraw = true; // Force first frame

    while !should_quit {
        tui.sync_route(app.route());
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui))?;
            needs_redraw = false;
        }

        let timeout = POLL_TIMEOUT.min(TICK.saturating_sub(last_tick.elapsed()));
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            needs_redraw = true;
            if matches!(event, TuiEvent::Resize) {
                continue;
            }
            if let Some(action) = action_for(&app, &mut tui, &event) {
                should_quit |= dispatch(&mut app, action, &api, &tx);
            }
            tui.sync_route(app.route());
        }

        if last_tick.elapsed() >= TICK {
            last_tick = Instant::now();
            should_quit |= dispatch(&mut app, Action::Tick, &api, &tx);
            needs_redraw = true;
        }

        // Handle background task actions
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            should_quit |= dispatch(&mut app, action, &api, &tx);
        }
    }

    info!("coinwatch shutting down");
    ratatui::restore();
    Ok(())
}
