//! # Core Application Logic
//!
//! This module contains coinwatch's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (app data)     │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • effects (async I/O)  │
//!                    └───────────┬─────────────┘
//!                                │
//!                ┌───────────────┴───────────────┐
//!                ▼                               ▼
//!         ┌────────────┐                  ┌────────────┐
//!         │    TUI     │                  │    API     │
//!         │  Adapter   │                  │  (reqwest) │
//!         │ (ratatui)  │                  │            │
//!         └────────────┘                  └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`effects`]: Async handlers that turn `Effect`s into API calls
//! - [`session`], [`login`], [`register`], [`dashboard`]: per-screen state slices
//! - [`route`]: Client routes and locations
//! - [`validate`]: Form input validation
//! - [`config`]: Config file and override resolution

pub mod action;
pub mod config;
pub mod dashboard;
pub mod effects;
pub mod login;
pub mod register;
pub mod route;
pub mod session;
pub mod state;
pub mod validate;
