//! Display-name form shown when the signed-in account has no user yet.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::Paragraph;

use crate::core::register::RegisterState;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::text_field::{TextField, any_char};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum RegisterEvent {
    Submit { name: String },
}

pub struct RegisterForm {
    pub name: TextField,
}

impl RegisterForm {
    pub fn new() -> Self {
        let mut name = TextField::new("Display name", any_char).with_max_len(32);
        name.focused = true;
        Self { name }
    }
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for RegisterForm {
    type Event = RegisterEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<RegisterEvent> {
        if matches!(event, TuiEvent::Submit) {
            return Some(RegisterEvent::Submit {
                name: self.name.value().to_string(),
            });
        }
        self.name.handle_event(event);
        None
    }
}

pub struct RegisterView<'a> {
    pub form: &'a mut RegisterForm,
    pub register: &'a RegisterState,
}

impl Component for RegisterView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min};
        let [heading, name_area, status_area, _] =
            Layout::vertical([Length(2), Length(3), Length(1), Min(0)]).areas(area);

        frame.render_widget(Paragraph::new("Choose a display name to finish signing up"), heading);
        self.form.name.render(frame, name_area);

        let status = if self.register.submitting {
            Some(Paragraph::new("Registering...").style(Style::default().fg(Color::DarkGray)))
        } else {
            self.register
                .error
                .as_deref()
                .map(|e| Paragraph::new(e).style(Style::default().fg(Color::Red)))
        };
        if let Some(status) = status {
            frame.render_widget(status, status_area);
        }
    }
}
