//! # Dashboard Component
//!
//! Total balance, a holdings list and the values panel.
//!
//! `DashboardViewState` keeps the list selection between frames; the data
//! itself comes from `core::dashboard::DashboardState` as props.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Padding, Paragraph};

use crate::api::{Holding, Value};
use crate::core::dashboard::DashboardState;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardEvent {
    Reload,
    Logout,
    Quit,
}

#[derive(Default)]
pub struct DashboardViewState {
    pub selected: usize,
    pub list_state: ListState,
    /// Number of holdings last rendered, bounds the selection.
    holdings_len: usize,
}

impl DashboardViewState {
    pub fn new() -> Self {
        Self::default()
    }

    fn select(&mut self, index: usize) {
        self.selected = index;
        self.list_state.select(Some(index));
    }
}

impl EventHandler for DashboardViewState {
    type Event = DashboardEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<DashboardEvent> {
        match event {
            TuiEvent::InputChar('r') => Some(DashboardEvent::Reload),
            TuiEvent::InputChar('l') => Some(DashboardEvent::Logout),
            TuiEvent::InputChar('q') | TuiEvent::Escape => Some(DashboardEvent::Quit),
            TuiEvent::CursorUp => {
                if self.holdings_len > 0 {
                    self.select(self.selected.saturating_sub(1));
                }
                None
            }
            TuiEvent::CursorDown => {
                if self.holdings_len > 0 {
                    self.select((self.selected + 1).min(self.holdings_len - 1));
                }
                None
            }
            _ => None,
        }
    }
}

/// Transient render wrapper.
pub struct DashboardView<'a> {
    pub state: &'a mut DashboardViewState,
    pub dashboard: &'a DashboardState,
}

impl Component for DashboardView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        use Constraint::{Length, Min, Percentage};
        let [balance_area, body] = Layout::vertical([Length(3), Min(0)]).areas(area);
        let [holdings_area, values_area] =
            Layout::horizontal([Percentage(60), Percentage(40)]).areas(body);

        let balance = if self.dashboard.coins_loading && self.dashboard.coin_list.states.is_empty() {
            String::from("Loading...")
        } else {
            format_usd(self.dashboard.coin_list.balance)
        };
        frame.render_widget(
            Paragraph::new(balance)
                .alignment(Alignment::Center)
                .style(Style::default().add_modifier(Modifier::BOLD))
                .block(panel(" Total balance ")),
            balance_area,
        );

        self.render_holdings(frame, holdings_area);
        render_values(frame, values_area, &self.dashboard.values, self.dashboard.values_loading);
    }
}

impl DashboardView<'_> {
    fn render_holdings(&mut self, frame: &mut Frame, area: Rect) {
        let holdings = &self.dashboard.coin_list.states;
        self.state.holdings_len = holdings.len();
        if holdings.is_empty() {
            self.state.list_state.select(None);
            let text = if self.dashboard.coins_loading {
                "Loading..."
            } else {
                "No holdings."
            };
            frame.render_widget(
                Paragraph::new(text)
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center)
                    .block(panel(" Holdings ")),
                area,
            );
            return;
        }

        if self.state.selected >= holdings.len() {
            self.state.selected = holdings.len() - 1;
        }
        let selected = self.state.selected;
        self.state.list_state.select(Some(selected));

        let inner_width = area.width.saturating_sub(4) as usize;
        let items: Vec<ListItem> = holdings
            .iter()
            .enumerate()
            .map(|(i, holding)| {
                let style = if i == selected {
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::Gray)
                };
                ListItem::new(holding_line(holding, inner_width, style))
            })
            .collect();

        let list = List::new(items).block(panel(" Holdings "));
        frame.render_stateful_widget(list, area, &mut self.state.list_state);
    }
}

fn holding_line(holding: &Holding, width: usize, style: Style) -> Line<'static> {
    let amount = format!("{}", holding.amount);
    let worth = format_usd(holding.amount * holding.coin.price_usd);
    let fixed = amount.len() + worth.len() + 4;
    let name_width = width.saturating_sub(fixed);
    let name = format!("{:<name_width$}", truncate_str(&holding.coin.name, name_width));
    Line::from(vec![
        Span::styled(name, style),
        Span::styled("  ", style),
        Span::styled(amount, style),
        Span::styled("  ", style),
        Span::styled(worth, style),
    ])
}

fn render_values(frame: &mut Frame, area: Rect, values: &[Value], loading: bool) {
    if values.is_empty() {
        let text = if loading { "Loading..." } else { "No values." };
        frame.render_widget(
            Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .block(panel(" Values ")),
            area,
        );
        return;
    }
    let items: Vec<ListItem> = values
        .iter()
        .map(|v| ListItem::new(format!("{}  {}", v.name, format_usd(v.value))))
        .collect();
    frame.render_widget(List::new(items).block(panel(" Values ")), area);
}

fn panel(title: &'static str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(title)
        .padding(Padding::horizontal(1))
}

pub fn format_usd(amount: f64) -> String {
    format!("${amount:.2}")
}

fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else if max_width <= 3 {
        ".".repeat(max_width)
    } else {
        let head: String = s.chars().take(max_width - 3).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Coin, CoinList};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn holding(name: &str, amount: f64, price_usd: f64) -> Holding {
        Holding {
            coin: Coin {
                id: name.to_lowercase(),
                name: name.to_string(),
                price_usd,
            },
            amount,
        }
    }

    fn render_text(state: &mut DashboardViewState, dashboard: &DashboardState) -> String {
        let backend = TestBackend::new(80, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                DashboardView { state, dashboard }.render(f, f.area());
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
    fn test_keys_map_to_events() {
        let mut state = DashboardViewState::new();
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('r')),
            Some(DashboardEvent::Reload)
        );
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('l')),
            Some(DashboardEvent::Logout)
        );
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('q')),
            Some(DashboardEvent::Quit)
        );
        assert_eq!(state.handle_event(&TuiEvent::InputChar('x')), None);
    }

    #[test]
    fn test_renders_balance_holdings_and_values() {
        let mut state = DashboardViewState::new();
        let dashboard = DashboardState {
            coin_list: CoinList {
                balance: 1234.5,
                states: vec![holding("Bitcoin", 0.5, 2000.0), holding("Ether", 2.0, 100.0)],
            },
            values: vec![Value {
                name: "today".into(),
                value: 12.0,
            }],
            ..Default::default()
        };
        let text = render_text(&mut state, &dashboard);
        assert!(text.contains("$1234.50"));
        assert!(text.contains("Bitcoin"));
        assert!(text.contains("$1000.00"));
        assert!(text.contains("Ether"));
        assert!(text.contains("today"));
        assert!(text.contains("$12.00"));
    }

    #[test]
    fn test_loading_placeholders() {
        let mut state = DashboardViewState::new();
        let mut dashboard = DashboardState::new();
        dashboard.begin_load();
        let text = render_text(&mut state, &dashboard);
        assert!(text.contains("Loading..."));
        assert!(!text.contains("No holdings."));
    }

    #[test]
    fn test_selection_is_clamped_to_holdings() {
        let mut state = DashboardViewState::new();
        let dashboard = DashboardState {
            coin_list: CoinList {
                balance: 0.0,
                states: vec![holding("A", 1.0, 1.0), holding("B", 1.0, 1.0)],
            },
            ..Default::default()
        };
        render_text(&mut state, &dashboard);
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.selected, 1);
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.selected, 0);
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("Bitcoin", 10), "Bitcoin");
        assert_eq!(truncate_str("Bitcoin Cash", 8), "Bitco...");
        assert_eq!(truncate_str("Bitcoin", 2), "..");
    }
}
