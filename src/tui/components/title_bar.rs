//! # TitleBar Component
//!
//! Single-line top bar: app name, current screen, the signed-in user and
//! the latest status.
//!
//! Stateless: all fields are props, rebuilt from `App` every frame.
//! A session error comes before the status message; both are shown:
//!
//! 1. `coinwatch | Login | Session check failed: HTTP 500 | Wait 42s ...`
//! 2. `coinwatch | Dashboard | Ann (since 2024-01-05) | Logged in`
//! 3. `coinwatch | Login`

use chrono::{DateTime, Utc};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::api::User;
use crate::tui::component::Component;

pub struct TitleBar {
    pub screen: &'static str,
    pub user: Option<User>,
    pub status_message: String,
    pub session_error: Option<String>,
}

impl TitleBar {
    pub fn new(screen: &'static str, user: Option<User>, status_message: String) -> Self {
        Self {
            screen,
            user,
            status_message,
            session_error: None,
        }
    }

    pub fn text(&self) -> String {
        let mut parts = vec![String::from("coinwatch"), self.screen.to_string()];
        if let Some(user) = &self.user {
            parts.push(match user.created.and_then(format_created) {
                Some(since) => format!("{} (since {since})", user.name),
                None => user.name.clone(),
            });
        }
        if let Some(error) = &self.session_error {
            parts.push(format!("Session check failed: {error}"));
        }
        if !self.status_message.is_empty() {
            parts.push(self.status_message.clone());
        }
        parts.join(" | ")
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let style = if self.session_error.is_some() {
            Style::default().fg(Color::Red)
        } else {
            Style::default()
        };
        frame.render_widget(Line::from(Span::styled(self.text(), style)), area);
    }
}

/// Unix seconds as a calendar date.
fn format_created(ts: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(ts, 0).map(|dt| dt.format("%Y-%m-%d").to_string())
}
