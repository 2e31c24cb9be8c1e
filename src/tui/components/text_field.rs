//! # TextField Component
//!
//! Single-line text input used by the login and register forms.
//!
//! The field owns its buffer and a byte-offset cursor. Characters the
//! `accept` filter rejects are dropped, both when typed and when pasted.

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub struct TextField {
    pub label: &'static str,
    buffer: String,
    /// Byte offset into `buffer` (always on a char boundary)
    cursor: usize,
    accept: fn(char) -> bool,
    /// Props
    pub focused: bool,
    pub max_len: usize,
}

/// Emitted when the buffer changes.
#[derive(Debug, Clone, PartialEq)]
pub struct Changed;

impl TextField {
    pub fn new(label: &'static str, accept: fn(char) -> bool) -> Self {
        Self {
            label,
            buffer: String::new(),
            cursor: 0,
            accept,
            focused: false,
            max_len: 64,
        }
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    fn insert(&mut self, c: char) -> bool {
        if !(self.accept)(c) || self.buffer.chars().count() >= self.max_len {
            return false;
        }
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        true
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map_or(self.cursor, |c| self.cursor + c.len_utf8())
    }

    /// Column of the cursor, in chars.
    fn cursor_column(&self) -> u16 {
        self.buffer[..self.cursor].chars().count() as u16
    }
}

impl EventHandler for TextField {
    type Event = Changed;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Changed> {
        match event {
            TuiEvent::InputChar(c) => self.insert(*c).then_some(Changed),
            TuiEvent::Paste(text) => {
                let mut changed = false;
                for c in text.chars() {
                    changed |= self.insert(c);
                }
                changed.then_some(Changed)
            }
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let start = self.prev_boundary();
                self.buffer.replace_range(start..self.cursor, "");
                self.cursor = start;
                Some(Changed)
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let end = self.next_boundary();
                self.buffer.replace_range(self.cursor..end, "");
                Some(Changed)
            }
            TuiEvent::CursorLeft => {
                self.cursor = self.prev_boundary();
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = self.next_boundary();
                None
            }
            TuiEvent::CursorHome => {
                self.cursor = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor = self.buffer.len();
                None
            }
            _ => None,
        }
    }
}

impl Component for TextField {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let border_style = if self.focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .title(self.label)
            .border_style(border_style)
            .title_style(border_style.add_modifier(Modifier::BOLD));
        frame.render_widget(Paragraph::new(self.buffer.as_str()).block(block), area);

        if self.focused && area.width > 2 && area.height > 2 {
            let max_x = area.x + area.width - 2;
            let x = (area.x + 1 + self.cursor_column()).min(max_x);
            frame.set_cursor_position(Position::new(x, area.y + 1));
        }
    }
}

/// Digits and spaces, for phone numbers.
pub fn phone_char(c: char) -> bool {
    c.is_ascii_digit() || c == ' '
}

pub fn digit_char(c: char) -> bool {
    c.is_ascii_digit()
}

pub fn any_char(c: char) -> bool {
    !c.is_control()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn typed(field: &mut TextField, text: &str) {
        for c in text.chars() {
            field.handle_event(&TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_typing_appends() {
        let mut field = TextField::new("Mobile", phone_char);
        typed(&mut field, "138 0013");
        assert_eq!(field.value(), "138 0013");
    }

    #[test]
    fn test_filter_rejects_characters() {
        let mut field = TextField::new("Code", digit_char);
        assert_eq!(field.handle_event(&TuiEvent::InputChar('x')), None);
        assert_eq!(field.handle_event(&TuiEvent::InputChar('4')), Some(Changed));
        assert_eq!(field.value(), "4");
    }

    #[test]
    fn test_paste_keeps_accepted_chars() {
        let mut field = TextField::new("Code", digit_char);
        field.handle_event(&TuiEvent::Paste("12-34\n".into()));
        assert_eq!(field.value(), "1234");
    }

    #[test]
    fn test_max_len() {
        let mut field = TextField::new("Code", digit_char).with_max_len(3);
        typed(&mut field, "123456");
        assert_eq!(field.value(), "123");
    }

    #[test]
    fn test_cursor_editing() {
        let mut field = TextField::new("Name", any_char);
        typed(&mut field, "ac");
        field.handle_event(&TuiEvent::CursorLeft);
        typed(&mut field, "b");
        assert_eq!(field.value(), "abc");

        field.handle_event(&TuiEvent::CursorHome);
        field.handle_event(&TuiEvent::Delete);
        assert_eq!(field.value(), "bc");

        field.handle_event(&TuiEvent::CursorEnd);
        field.handle_event(&TuiEvent::Backspace);
        assert_eq!(field.value(), "b");
    }

    #[test]
    fn test_multibyte_backspace() {
        let mut field = TextField::new("Name", any_char);
        typed(&mut field, "né");
        field.handle_event(&TuiEvent::Backspace);
        assert_eq!(field.value(), "n");
        assert_eq!(field.handle_event(&TuiEvent::Backspace), Some(Changed));
        assert_eq!(field.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_clear() {
        let mut field = TextField::new("Name", any_char);
        typed(&mut field, "abc");
        field.clear();
        assert_eq!(field.value(), "");
        typed(&mut field, "z");
        assert_eq!(field.value(), "z");
    }

    #[test]
    fn test_render_shows_label_and_value() {
        let backend = TestBackend::new(30, 3);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut field = TextField::new("Mobile", phone_char);
        typed(&mut field, "13800138000");
        field.focused = true;

        terminal
            .draw(|f| {
                field.render(f, f.area());
            })
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Mobile"));
        assert!(text.contains("13800138000"));
    }
}
