//! # Routing
//!
//! Client-side routes, resolved from a static table.
//!
//! ```text
//! /           → redirect to /dashboard
//! /login      → LoginForm         (?from=<path> carries the post-login target)
//! /register   → RegisterForm
//! /dashboard  → Dashboard
//! *           → NotFound
//! ```

use std::collections::BTreeMap;

use reqwest::Url;

/// Base used only to let `Url` parse bare paths.
const PARSE_BASE: &str = "http://localhost/";

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const DASHBOARD_PATH: &str = "/dashboard";

/// Query parameter on `/login` naming where the user was headed.
pub const FROM_PARAM: &str = "from";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Root,
    Login,
    Register,
    Dashboard,
    NotFound,
}

const ROUTES: &[(&str, Route)] = &[
    (ROOT_PATH, Route::Root),
    (LOGIN_PATH, Route::Login),
    (REGISTER_PATH, Route::Register),
    (DASHBOARD_PATH, Route::Dashboard),
];

impl Route {
    /// Exact-match lookup; a trailing slash is ignored.
    pub fn resolve(pathname: &str) -> Route {
        let trimmed = pathname.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { ROOT_PATH } else { trimmed };
        ROUTES
            .iter()
            .find(|(path, _)| *path == normalized)
            .map(|(_, route)| *route)
            .unwrap_or(Route::NotFound)
    }

    /// Routes whose content depends on who is logged in. Entering one
    /// checks the session and loads the dashboard.
    pub fn requires_session(self) -> bool {
        matches!(self, Route::Root | Route::Dashboard)
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Root | Route::Dashboard => "Dashboard",
            Route::Login => "Login",
            Route::Register => "Register",
            Route::NotFound => "Not Found",
        }
    }
}

/// A pathname plus its decoded query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
    pub pathname: String,
    pub query: BTreeMap<String, String>,
}

impl Location {
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            query: BTreeMap::new(),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Parses `path?k=v&…`. Input that isn't a usable path is kept verbatim
    /// as the pathname so it still routes to NotFound.
    pub fn parse(raw: &str) -> Self {
        let joined = Url::parse(PARSE_BASE).and_then(|base| base.join(raw));
        match joined {
            Ok(url) => Self {
                pathname: url.path().to_string(),
                query: url
                    .query_pairs()
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect(),
            },
            Err(_) => Self::new(raw),
        }
    }

    pub fn route(&self) -> Route {
        Route::resolve(&self.pathname)
    }

    /// Encoded query string without the leading `?`; empty when there is no query.
    pub fn search(&self) -> String {
        if self.query.is_empty() {
            return String::new();
        }
        let mut url = match Url::parse(PARSE_BASE) {
            Ok(url) => url,
            Err(_) => return String::new(),
        };
        url.query_pairs_mut().extend_pairs(self.query.iter());
        url.query().unwrap_or("").to_string()
    }

    /// `pathname` followed by `?search` when there is a query.
    pub fn href(&self) -> String {
        let search = self.search();
        if search.is_empty() {
            self.pathname.clone()
        } else {
            format!("{}?{}", self.pathname, search)
        }
    }
}
