use async_trait::async_trait;
use log::info;
use serde_json::json;

use super::request::{RequestOptions, RequestResult, Transport};
use super::types::{AuthResponse, CoinList, SmsResponse, User, Value};

pub const SMS_PATH: &str = "/sms";
pub const SMS_AUTH_PATH: &str = "/sms/auth";
pub const ME_PATH: &str = "/me";
pub const COINS_PATH: &str = "/";
pub const VALUES_PATH: &str = "/values";

/// Credential attached to authenticated requests.
///
/// Owned by the caller and passed into every call that needs it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Credentials {
    pub access_token: Option<String>,
}

impl Credentials {
    pub fn new(access_token: Option<String>) -> Self {
        Self {
            access_token: access_token.filter(|t| !t.is_empty()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.access_token.is_none()
    }
}

/// The backend operations the client needs. Every call returns the
/// transport's result unchanged.
#[async_trait]
pub trait CoinApi: Send + Sync {
    /// Asks the server to text a verification code to `mobile`.
    async fn sms(&self, mobile: &str) -> RequestResult<SmsResponse>;

    /// Exchanges a verification code for an access token.
    async fn sms_auth(&self, mobile: &str, code: u32) -> RequestResult<AuthResponse>;

    /// Fetches the session owner.
    async fn me(&self, credentials: &Credentials) -> RequestResult<User>;

    /// Sets the session owner's display name.
    async fn register(&self, credentials: &Credentials, name: &str) -> RequestResult<User>;

    /// Ends the session on the server side.
    async fn unauth(&self, credentials: &Credentials) -> RequestResult<serde_json::Value>;

    async fn my_coins(&self, credentials: &Credentials) -> RequestResult<CoinList>;

    async fn my_values(&self, credentials: &Credentials) -> RequestResult<Vec<Value>>;
}

/// HTTP implementation of [`CoinApi`].
#[derive(Debug, Clone)]
pub struct ApiService {
    transport: Transport,
}

impl ApiService {
    pub fn new(transport: Transport) -> Self {
        info!("API service using base URL {}", transport.base_url());
        Self { transport }
    }
}

#[async_trait]
impl CoinApi for ApiService {
    async fn sms(&self, mobile: &str) -> RequestResult<SmsResponse> {
        self.transport
            .request(SMS_PATH, RequestOptions::post(json!({ "mobile": mobile })))
            .await
    }

    async fn sms_auth(&self, mobile: &str, code: u32) -> RequestResult<AuthResponse> {
        self.transport
            .request(
                SMS_AUTH_PATH,
                RequestOptions::post(json!({ "mobile": mobile, "code": code })),
            )
            .await
    }

    async fn me(&self, credentials: &Credentials) -> RequestResult<User> {
        self.transport
            .request(ME_PATH, RequestOptions::get().with_token(credentials.token()))
            .await
    }

    async fn register(&self, credentials: &Credentials, name: &str) -> RequestResult<User> {
        self.transport
            .request(
                ME_PATH,
                RequestOptions::post(json!({ "name": name })).with_token(credentials.token()),
            )
            .await
    }

    // The logout variant of /me goes out without the token.
    async fn unauth(&self, _credentials: &Credentials) -> RequestResult<serde_json::Value> {
        self.transport.request(ME_PATH, RequestOptions::get()).await
    }

    async fn my_coins(&self, credentials: &Credentials) -> RequestResult<CoinList> {
        self.transport
            .request(COINS_PATH, RequestOptions::get().with_token(credentials.token()))
            .await
    }

    async fn my_values(&self, credentials: &Credentials) -> RequestResult<Vec<Value>> {
        self.transport
            .request(VALUES_PATH, RequestOptions::get().with_token(credentials.token()))
            .await
    }
}
