//! # Login Form
//!
//! Mobile number and verification code fields for the SMS flow.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `LoginForm` lives in `TuiState` (field buffers, focus)
//! - `LoginView` is created each frame with the form and the core `LoginState`
//!
//! The form emits raw field text. Validation happens in `core::validate`
//! before anything is dispatched.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::core::login::{LoginPhase, LoginState};
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::{TextField, digit_char, phone_char};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Mobile,
    Code,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoginEvent {
    RequestCode { mobile: String },
    Submit { mobile: String, code: String },
}

pub struct LoginForm {
    pub mobile: TextField,
    pub code: TextField,
    pub focus: LoginField,
}

impl LoginForm {
    pub fn new() -> Self {
        let mut form = Self {
            mobile: TextField::new("Mobile", phone_char).with_max_len(20),
            code: TextField::new("Code", digit_char).with_max_len(9),
            focus: LoginField::Mobile,
        };
        form.sync_focus();
        form
    }

    pub fn focus(&mut self, field: LoginField) {
        self.focus = field;
        self.sync_focus();
    }

    /// Clears the code, e.g. after leaving the login screen.
    pub fn reset_code(&mut self) {
        self.code.clear();
    }

    fn sync_focus(&mut self) {
        self.mobile.focused = self.focus == LoginField::Mobile;
        self.code.focused = self.focus == LoginField::Code;
    }

    fn toggle_focus(&mut self) {
        let next = match self.focus {
            LoginField::Mobile => LoginField::Code,
            LoginField::Code => LoginField::Mobile,
        };
        self.focus(next);
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for LoginForm {
    type Event = LoginEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<LoginEvent> {
        match event {
            TuiEvent::NextField | TuiEvent::PrevField | TuiEvent::CursorUp | TuiEvent::CursorDown => {
                self.toggle_focus();
                None
            }
            TuiEvent::Submit => match self.focus {
                LoginField::Mobile => {
                    // Move on to the code once it's been asked for
                    self.focus(LoginField::Code);
                    Some(LoginEvent::RequestCode {
                        mobile: self.mobile.value().to_string(),
                    })
                }
                LoginField::Code => Some(LoginEvent::Submit {
                    mobile: self.mobile.value().to_string(),
                    code: self.code.value().to_string(),
                }),
            },
            other => {
                match self.focus {
                    LoginField::Mobile => self.mobile.handle_event(other),
                    LoginField::Code => self.code.handle_event(other),
                };
                None
            }
        }
    }
}

/// Transient render wrapper.
pub struct LoginView<'a> {
    pub form: &'a mut LoginForm,
    pub login: &'a LoginState,
}

impl Component for LoginView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};
        let [heading, mobile_area, code_area, hint_area, error_area, _] =
            Layout::vertical([Length(2), Length(3), Length(3), Length(1), Length(1), Min(0)])
                .areas(area);

        frame.render_widget(
            Paragraph::new("Sign in with your mobile number"),
            heading,
        );
        self.form.mobile.render(frame, mobile_area);
        self.form.code.render(frame, code_area);

        frame.render_widget(
            Paragraph::new(hint(self.login)).style(Style::default().fg(Color::DarkGray)),
            hint_area,
        );
        if let Some(error) = &self.login.error {
            frame.render_widget(
                Paragraph::new(Line::from(error.as_str())).style(Style::default().fg(Color::Red)),
                error_area,
            );
        }
    }
}

fn hint(login: &LoginState) -> String {
    if login.requesting {
        return String::from("Sending code...");
    }
    match login.phase {
        LoginPhase::Verifying => String::from("Verifying..."),
        LoginPhase::Verified => String::from("Signed in"),
        _ if login.cooldown > 0 => format!("Code sent. Resend available in {}s", login.cooldown),
        LoginPhase::CodeRequested => String::from("Enter on Mobile to resend the code"),
        LoginPhase::Idle => String::from("Enter on Mobile to request a code"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn type_text(form: &mut LoginForm, text: &str) {
        for c in text.chars() {
            form.handle_event(&TuiEvent::InputChar(c));
        }
    }

    fn render_text(form: &mut LoginForm, login: &LoginState) -> String {
        let backend = TestBackend::new(50, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                LoginView { form, login }.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_enter_on_mobile_requests_code_and_moves_focus() {
        let mut form = LoginForm::new();
        type_text(&mut form, "138 0013 8000");
        let event = form.handle_event(&TuiEvent::Submit);
        assert_eq!(
            event,
            Some(LoginEvent::RequestCode {
                mobile: "138 0013 8000".into()
            })
        );
        assert_eq!(form.focus, LoginField::Code);
        assert!(form.code.focused);
        assert!(!form.mobile.focused);
    }

    #[test]
    fn test_enter_on_code_submits_both_fields() {
        let mut form = LoginForm::new();
        type_text(&mut form, "13800138000");
        form.handle_event(&TuiEvent::NextField);
        type_text(&mut form, "42a");
        let event = form.handle_event(&TuiEvent::Submit);
        assert_eq!(
            event,
            Some(LoginEvent::Submit {
                mobile: "13800138000".into(),
                code: "42".into()
            })
        );
    }

    #[test]
    fn test_mobile_rejects_letters() {
        let mut form = LoginForm::new();
        type_text(&mut form, "1a2");
        assert_eq!(form.mobile.value(), "12");
    }

    #[test]
    fn test_tab_toggles_focus() {
        let mut form = LoginForm::new();
        form.handle_event(&TuiEvent::NextField);
        assert_eq!(form.focus, LoginField::Code);
        form.handle_event(&TuiEvent::PrevField);
        assert_eq!(form.focus, LoginField::Mobile);
    }

    #[test]
    fn test_render_shows_cooldown_and_error() {
        let mut form = LoginForm::new();
        let login = LoginState {
            phase: LoginPhase::CodeRequested,
            cooldown: 42,
            error: Some("invalid code".into()),
            ..Default::default()
        };
        let text = render_text(&mut form, &login);
        assert!(text.contains("Mobile"));
        assert!(text.contains("Code"));
        assert!(text.contains("42s"));
        assert!(text.contains("invalid code"));
    }

    #[test]
    fn test_hint_follows_phase() {
        let mut login = LoginState::default();
        assert!(hint(&login).contains("request a code"));
        login.requesting = true;
        assert_eq!(hint(&login), "Sending code...");
        login.requesting = false;
        login.phase = LoginPhase::Verifying;
        assert_eq!(hint(&login), "Verifying...");
    }
}
