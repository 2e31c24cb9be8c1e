use serde::{Deserialize, Serialize};

/// The session owner, as returned by `GET /me`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    /// Unix timestamp of account creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<i64>,
}

/// Response of `POST /sms`. The interval is the resend cooldown in seconds.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SmsResponse {
    #[serde(default)]
    pub interval: Option<i64>,
}

/// Response of `POST /sms/auth`. Any user summary sent alongside the
/// token is ignored; the session owner comes from `GET /me`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct AuthResponse {
    pub access_token: String,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Coin {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price_usd: f64,
}

/// A user's balance of one coin.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Holding {
    pub coin: Coin,
    #[serde(default)]
    pub amount: f64,
}

/// Balances endpoint payload. The server calls the total `total_balance`.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct CoinList {
    #[serde(default, alias = "total_balance")]
    pub balance: f64,
    #[serde(default)]
    pub states: Vec<Holding>,
}

/// One row of the values endpoint.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Value {
    pub name: String,
    #[serde(default)]
    pub value: f64,
}
