//! # Application State
//!
//! Core business state for coinwatch. No TUI types live here; presentation
//! state belongs to the `tui` module.
//!
//! ```text
//! App
//! ├── location: Location          // current client route
//! ├── credentials: Credentials    // access token, passed to API calls
//! ├── session: SessionState       // user, referer, bootstrap status
//! ├── login: LoginState           // SMS flow phase, cooldown
//! ├── register: RegisterState     // name submission
//! ├── dashboard: DashboardState   // balances and values
//! └── status_message: String      // status bar text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::api::Credentials;
use crate::core::dashboard::DashboardState;
use crate::core::login::LoginState;
use crate::core::register::RegisterState;
use crate::core::route::{Location, Route};
use crate::core::session::SessionState;

#[derive(Debug, Clone, PartialEq)]
pub struct App {
    pub location: Location,
    pub credentials: Credentials,
    pub session: SessionState,
    pub login: LoginState,
    pub register: RegisterState,
    pub dashboard: DashboardState,
    pub status_message: String,
}

impl App {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            location: Location::default(),
            credentials,
            session: SessionState::new(),
            login: LoginState::new(),
            register: RegisterState::default(),
            dashboard: DashboardState::new(),
            status_message: String::from("Welcome to coinwatch!"),
        }
    }

    pub fn route(&self) -> Route {
        self.location.route()
    }
}
