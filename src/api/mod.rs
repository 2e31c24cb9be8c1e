//! # Backend API
//!
//! ```text
//! CoinApi (trait) ── ApiService ── Transport ── reqwest
//! ```
//!
//! - [`request`]: URL building, token attachment, result normalization
//! - [`service`]: one method per backend operation
//! - [`types`]: wire payloads

pub mod request;
pub mod service;
pub mod types;

pub use request::{ApiError, ErrorResponse, RequestError, RequestOptions, RequestResult, Transport};
pub use service::{ApiService, CoinApi, Credentials};
pub use types::{AuthResponse, Coin, CoinList, Holding, SmsResponse, User, Value};
