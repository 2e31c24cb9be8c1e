//! # Session Bootstrap
//!
//! Tracks who is logged in and where the user was when the session was
//! last checked.
//!
//! ```text
//!            me() ok            ┌───────────────┐
//!        ┌─────────────────────►│ Authenticated │
//!        │                      └───────────────┘
//! ┌─────────┐  401 / 403       ┌─────────────────┐
//! │ Unknown │─────────────────►│ Unauthenticated │ → /login?from=<referer>
//! └─────────┘                  └─────────────────┘
//!        │     404              ┌───────────────┐
//!        └─────────────────────►│ NotRegistered │ → /register
//!                               └───────────────┘
//! ```
//!
//! Any other failure keeps the current status and records the error.
//! Transitions are not one-way: a later query may move the session anywhere.

use std::collections::BTreeMap;

use log::{info, warn};

use crate::api::{RequestError, RequestResult, User};
use crate::core::route::{FROM_PARAM, LOGIN_PATH, Location, REGISTER_PATH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionStatus {
    #[default]
    Unknown,
    Authenticated,
    Unauthenticated,
    NotRegistered,
}

/// How a failed `me()` is interpreted.
#[derive(Debug, Clone, PartialEq)]
pub enum MeFailure {
    Unauthorized,
    UserNotFound,
    Other(RequestError),
}

impl MeFailure {
    pub fn classify(error: RequestError) -> Self {
        match error.response().map(|r| r.status) {
            Some(401) | Some(403) => MeFailure::Unauthorized,
            Some(404) => MeFailure::UserNotFound,
            _ => MeFailure::Other(error),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub referer_pathname: String,
    pub referer_query: BTreeMap<String, String>,
    pub status: SessionStatus,
    /// Sequence number of the newest bootstrap query.
    pub query_seq: u64,
    pub last_error: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the location the user is on now.
    pub fn set_referer(&mut self, location: &Location) {
        self.referer_pathname = location.pathname.clone();
        self.referer_query = location.query.clone();
    }

    /// Referer path plus its query, used as the post-login target.
    pub fn referer_href(&self) -> String {
        Location {
            pathname: self.referer_pathname.clone(),
            query: self.referer_query.clone(),
        }
        .href()
    }

    /// Starts a new bootstrap query and returns its sequence number.
    /// The previous query's error no longer applies.
    pub fn begin_query(&mut self) -> u64 {
        self.query_seq += 1;
        self.last_error = None;
        self.query_seq
    }

    /// Applies a `me()` result. Returns the location to redirect to, if any.
    /// Results from a superseded query are ignored.
    pub fn apply_me_result(&mut self, seq: u64, result: RequestResult<User>) -> Option<Location> {
        if seq != self.query_seq {
            info!(
                "Ignoring stale session query result (seq={}, current={})",
                seq, self.query_seq
            );
            return None;
        }

        match result {
            Ok(user) => {
                info!("Session authenticated as {} (id={})", user.name, user.id);
                self.user = Some(user);
                self.status = SessionStatus::Authenticated;
                self.last_error = None;
                None
            }
            Err(error) => match MeFailure::classify(error) {
                MeFailure::Unauthorized => {
                    info!("Session unauthorized, redirecting to login");
                    self.user = None;
                    self.status = SessionStatus::Unauthenticated;
                    self.last_error = None;
                    Some(Location::new(LOGIN_PATH).with_query(FROM_PARAM, self.referer_href()))
                }
                MeFailure::UserNotFound => {
                    info!("Session has no registered user, redirecting to register");
                    self.user = None;
                    self.status = SessionStatus::NotRegistered;
                    self.last_error = None;
                    Some(Location::new(REGISTER_PATH))
                }
                MeFailure::Other(error) => {
                    warn!("Session query failed: {}", error);
                    self.last_error = Some(error.user_message());
                    None
                }
            },
        }
    }

    /// Forgets the user after logout. The referer is kept.
    pub fn clear_user(&mut self) {
        self.user = None;
        self.status = SessionStatus::Unknown;
        self.last_error = None;
    }
}
