//! # Actions
//!
//! Everything that can happen in coinwatch becomes an `Action`.
//! User submits the code? That's `Action::SubmitCode(submission)`.
//! The server answers? That's `Action::CodeVerified(result)`.
//!
//! `update()` takes the current state and an action, mutates the state and
//! returns the `Effect`s to run. No I/O happens here; effects are performed
//! by `core::effects` and come back as new actions.
//!
//! ```text
//! State + Action  →  update()  →  New State + [Effect]
//!                                                │
//!            Action  ◄──  effects::perform()  ◄──┘
//! ```

use log::{debug, info};

use crate::api::{AuthResponse, CoinList, Credentials, RequestResult, SmsResponse, User, Value};
use crate::core::login::LoginPhase;
use crate::core::route::{DASHBOARD_PATH, Location, Route};
use crate::core::session::SessionStatus;
use crate::core::state::App;
use crate::core::validate::{CodeSubmission, ValidationError};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// First navigation. Always checks the session, whatever the route.
    Startup(Location),
    /// Go to a client route. Also what the history listener reports.
    Navigate(Location),
    SessionQueried { seq: u64, result: RequestResult<User> },
    /// Ask for a code. The mobile number is already validated.
    RequestCode { mobile: String },
    CodeSent(RequestResult<SmsResponse>),
    SubmitCode(CodeSubmission),
    CodeVerified(RequestResult<AuthResponse>),
    Register { name: String },
    Registered(RequestResult<User>),
    Logout,
    LoggedOut,
    ReloadDashboard,
    CoinsLoaded { seq: u64, result: RequestResult<CoinList> },
    ValuesLoaded { seq: u64, result: RequestResult<Vec<Value>> },
    ValidationFailed(ValidationError),
    /// One second of wall time passed.
    Tick,
    Quit,
}

/// Side effects requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    QuerySession { seq: u64, credentials: Credentials },
    SendSms { mobile: String },
    VerifySms { mobile: String, code: u32 },
    Register { credentials: Credentials, name: String },
    Unauth { credentials: Credentials },
    LoadDashboard { seq: u64, credentials: Credentials },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Vec<Effect> {
    match action {
        Action::Startup(location) => {
            let mut effects = navigate(app, location);
            if !effects.iter().any(|e| matches!(e, Effect::QuerySession { .. })) {
                effects.insert(0, query_session(app));
            }
            effects
        }

        Action::Navigate(location) => navigate(app, location),

        Action::SessionQueried { seq, result } => {
            let redirect = app.session.apply_me_result(seq, result);
            match redirect {
                Some(target) if target.route() != app.route() => navigate(app, target),
                _ => vec![],
            }
        }

        Action::RequestCode { mobile } => {
            if !app.login.can_request_code() {
                app.status_message = if app.login.cooldown > 0 {
                    format!("Wait {}s before requesting another code", app.login.cooldown)
                } else {
                    String::from("A request is already in progress")
                };
                return vec![];
            }
            app.login.begin_code_request(&mobile);
            app.status_message = format!("Sending code to {mobile}...");
            vec![Effect::SendSms { mobile }]
        }

        Action::CodeSent(result) => {
            app.login.apply_sms_result(result);
            if app.login.error.is_none() {
                app.status_message = String::from("Code sent");
            }
            vec![]
        }

        Action::SubmitCode(CodeSubmission { mobile, code }) => {
            if app.login.phase == LoginPhase::Verifying {
                return vec![];
            }
            app.login.begin_verify();
            app.status_message = String::from("Verifying...");
            vec![Effect::VerifySms { mobile, code }]
        }

        Action::CodeVerified(result) => match app.login.apply_auth_result(result) {
            Some(token) => {
                app.credentials = Credentials::new(Some(token));
                app.status_message = String::from("Logged in");
                navigate(app, Location::new(DASHBOARD_PATH))
            }
            None => {
                app.status_message = String::from("Verification failed");
                vec![]
            }
        },

        Action::Register { name } => {
            if app.register.submitting {
                return vec![];
            }
            app.register.begin();
            vec![Effect::Register {
                credentials: app.credentials.clone(),
                name,
            }]
        }

        Action::Registered(result) => match app.register.apply_result(result) {
            Some(user) => {
                info!("Registered as {}", user.name);
                app.session.user = Some(user);
                app.session.status = SessionStatus::Authenticated;
                navigate(app, Location::new(DASHBOARD_PATH))
            }
            None => vec![],
        },

        Action::Logout => {
            app.status_message = String::from("Logging out...");
            vec![Effect::Unauth {
                credentials: app.credentials.clone(),
            }]
        }

        Action::LoggedOut => {
            info!("Logged out");
            app.credentials = Credentials::default();
            app.session.clear_user();
            app.dashboard.reset();
            app.status_message = String::from("Logged out");
            vec![query_session(app)]
        }

        Action::ReloadDashboard => {
            if app.route().requires_session() {
                vec![load_dashboard(app)]
            } else {
                vec![]
            }
        }

        Action::CoinsLoaded { seq, result } => {
            if let Some(error) = app.dashboard.apply_coins(seq, result) {
                app.status_message = error;
            }
            vec![]
        }

        Action::ValuesLoaded { seq, result } => {
            if let Some(error) = app.dashboard.apply_values(seq, result) {
                app.status_message = error;
            }
            vec![]
        }

        Action::ValidationFailed(error) => {
            debug!("Validation failed: {}", error);
            match app.route() {
                Route::Login => app.login.error = Some(error.to_string()),
                Route::Register => app.register.error = Some(error.to_string()),
                _ => app.status_message = error.to_string(),
            }
            vec![]
        }

        Action::Tick => {
            app.login.tick();
            vec![]
        }

        Action::Quit => vec![Effect::Quit],
    }
}

fn query_session(app: &mut App) -> Effect {
    Effect::QuerySession {
        seq: app.session.begin_query(),
        credentials: app.credentials.clone(),
    }
}

fn load_dashboard(app: &mut App) -> Effect {
    Effect::LoadDashboard {
        seq: app.dashboard.begin_load(),
        credentials: app.credentials.clone(),
    }
}

fn navigate(app: &mut App, location: Location) -> Vec<Effect> {
    // The root route is a redirect
    let location = if location.route() == Route::Root {
        Location {
            pathname: DASHBOARD_PATH.to_string(),
            query: location.query,
        }
    } else {
        location
    };
    let route = location.route();
    info!("Navigating to {}", location.href());

    if route == Route::Login && app.login.phase == LoginPhase::Verified {
        app.login.phase = LoginPhase::Idle;
        app.login.error = None;
    }

    app.session.set_referer(&location);
    app.location = location;

    let mut effects = Vec::new();
    if route.requires_session() {
        effects.push(query_session(app));
        effects.push(load_dashboard(app));
    }
    effects
}
