//! Fallback view for paths outside the route table.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Paragraph};

use crate::tui::component::Component;

pub struct NotFound<'a> {
    pub pathname: &'a str,
}

impl Component for NotFound<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from("404 Not Found"),
            Line::from(""),
            Line::from(format!("Nothing lives at {}", self.pathname))
                .style(Style::default().fg(Color::DarkGray)),
        ];
        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .block(Block::bordered().border_style(Style::default().fg(Color::DarkGray))),
            area,
        );
    }
}
