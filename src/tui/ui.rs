use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Padding, Paragraph};

use crate::core::route::Route;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{DashboardView, LoginView, NotFound, RegisterView, TitleBar};

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    let route = app.route();
    let mut title_bar = TitleBar::new(
        route.title(),
        app.session.user.clone(),
        app.status_message.clone(),
    );
    title_bar.session_error = app.session.last_error.clone();
    title_bar.render(frame, title_area);

    let content = content_area(main_area);
    match route {
        Route::Login => LoginView {
            form: &mut tui.login_form,
            login: &app.login,
        }
        .render(frame, content),
        Route::Register => RegisterView {
            form: &mut tui.register_form,
            register: &app.register,
        }
        .render(frame, content),
        Route::Root | Route::Dashboard => DashboardView {
            state: &mut tui.dashboard,
            dashboard: &app.dashboard,
        }
        .render(frame, content),
        Route::NotFound => NotFound {
            pathname: &app.location.pathname,
        }
        .render(frame, content),
    }

    frame.render_widget(
        Paragraph::new(help_text(route)).style(Style::default().fg(Color::DarkGray)),
        help_area,
    );
}

fn content_area(area: Rect) -> Rect {
    Block::default().padding(Padding::horizontal(1)).inner(area)
}

fn help_text(route: Route) -> &'static str {
    match route {
        Route::Login => " Tab Switch field  Enter Request code / Sign in  Ctrl+C Quit ",
        Route::Register => " Enter Register  Ctrl+C Quit ",
        Route::Root | Route::Dashboard => " ↑↓ Select  r Reload  l Log out  q Quit ",
        Route::NotFound => " d Dashboard  q Quit ",
    }
}
