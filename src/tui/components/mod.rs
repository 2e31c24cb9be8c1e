//! # TUI Components
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! Receive all data as struct fields, rebuilt every frame:
//! - `TitleBar`: screen name, user and status
//! - `NotFound`: fallback for unknown paths
//!
//! ### Stateful Components (Event-Driven)
//!
//! Persistent state lives in `TuiState`; a transient `*View` wrapper borrows
//! it together with the core slice it displays:
//! - `TextField`: single-line input with a character filter
//! - `LoginForm` / `LoginView`: mobile and code fields
//! - `RegisterForm` / `RegisterView`: display name
//! - `DashboardViewState` / `DashboardView`: balance, holdings, values
//!
//! Components emit high-level events (`LoginEvent`, `DashboardEvent`, ...)
//! and never touch `App` directly. The event loop turns those into actions.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── title_bar.rs
//! ├── text_field.rs
//! ├── login_form.rs
//! ├── register_form.rs
//! ├── dashboard.rs
//! └── not_found.rs
//! ```

pub mod dashboard;
pub mod login_form;
pub mod not_found;
pub mod register_form;
pub mod text_field;
mod title_bar;

pub use dashboard::{DashboardEvent, DashboardView, DashboardViewState};
pub use login_form::{LoginEvent, LoginForm, LoginView};
pub use not_found::NotFound;
pub use register_form::{RegisterEvent, RegisterForm, RegisterView};
pub use title_bar::TitleBar;
