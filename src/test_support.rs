//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Mutex;
use std::sync::mpsc;

use async_trait::async_trait;

use crate::api::{
    ApiError, AuthResponse, Coin, CoinApi, CoinList, Credentials, ErrorResponse, Holding,
    RequestError, RequestResult, SmsResponse, User, Value,
};
use crate::core::action::{Action, Effect, update};
use crate::core::effects;
use crate::core::state::App;

/// A scripted backend. Every call returns a clone of its field and is
/// recorded in `calls`. `me` without a token answers 401, like the server.
pub struct FakeApi {
    pub sms: RequestResult<SmsResponse>,
    pub sms_auth: RequestResult<AuthResponse>,
    pub me: RequestResult<User>,
    pub register: RequestResult<User>,
    pub unauth: RequestResult<serde_json::Value>,
    pub coins: RequestResult<CoinList>,
    pub values: RequestResult<Vec<Value>>,
    pub calls: Mutex<Vec<String>>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            sms: Ok(SmsResponse { interval: Some(60) }),
            sms_auth: Ok(auth_response("test-token")),
            me: Ok(User {
                id: 1,
                name: "A".to_string(),
                created: None,
            }),
            register: Ok(User {
                id: 1,
                name: "A".to_string(),
                created: None,
            }),
            unauth: Ok(serde_json::Value::Null),
            coins: Ok(coin_list(0.0)),
            values: Ok(vec![]),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl FakeApi {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

#[async_trait]
impl CoinApi for FakeApi {
    async fn sms(&self, mobile: &str) -> RequestResult<SmsResponse> {
        self.record(format!("sms {mobile}"));
        self.sms.clone()
    }

    async fn sms_auth(&self, mobile: &str, code: u32) -> RequestResult<AuthResponse> {
        self.record(format!("sms_auth {mobile} {code}"));
        self.sms_auth.clone()
    }

    async fn me(&self, credentials: &Credentials) -> RequestResult<User> {
        self.record(format!("me token={}", credentials.token().unwrap_or("")));
        if credentials.is_empty() {
            return Err(status_error(401));
        }
        self.me.clone()
    }

    async fn register(&self, _credentials: &Credentials, name: &str) -> RequestResult<User> {
        self.record(format!("register {name}"));
        self.register.clone()
    }

    async fn unauth(&self, _credentials: &Credentials) -> RequestResult<serde_json::Value> {
        self.record("unauth".to_string());
        self.unauth.clone()
    }

    async fn my_coins(&self, _credentials: &Credentials) -> RequestResult<CoinList> {
        self.record("my_coins".to_string());
        self.coins.clone()
    }

    async fn my_values(&self, _credentials: &Credentials) -> RequestResult<Vec<Value>> {
        self.record("my_values".to_string());
        self.values.clone()
    }
}

/// Creates a test App with no credentials.
pub fn test_app() -> App {
    App::new(Credentials::default())
}

/// Feeds `action` through `update` and performs every resulting effect
/// against `api`, one at a time, until no actions remain.
pub fn settle(app: &mut App, api: &FakeApi, action: Action) {
    let mut pending = vec![action];
    while !pending.is_empty() {
        let action = pending.remove(0);
        for effect in update(app, action) {
            if effect == Effect::Quit {
                continue;
            }
            let (tx, rx) = mpsc::channel();
            tokio_test::block_on(effects::perform(effect, api, &tx));
            drop(tx);
            pending.extend(rx.iter());
        }
    }
}

pub fn status_error(status: u16) -> RequestError {
    let status_code = reqwest::StatusCode::from_u16(status).unwrap_or(reqwest::StatusCode::BAD_REQUEST);
    RequestError::Status(ErrorResponse {
        status,
        status_text: status_code.canonical_reason().unwrap_or("").to_string(),
        body: String::new(),
        api_error: None,
    })
}

pub fn api_error(status: u16, err: i64, msg: &str) -> RequestError {
    let body = serde_json::json!({ "err": err, "msg": msg }).to_string();
    RequestError::Status(ErrorResponse {
        status,
        status_text: String::new(),
        body,
        api_error: Some(ApiError {
            err,
            msg: msg.to_string(),
        }),
    })
}

pub fn auth_response(token: &str) -> AuthResponse {
    AuthResponse {
        access_token: token.to_string(),
    }
}

pub fn coin_list(balance: f64) -> CoinList {
    CoinList {
        balance,
        states: vec![Holding {
            coin: Coin {
                id: "bitcoin".to_string(),
                name: "Bitcoin".to_string(),
                price_usd: 100.0,
            },
            amount: balance / 100.0,
        }],
    }
}
