//! # SMS Login Flow
//!
//! ```text
//! Idle ──RequestCode──► CodeRequested ──SubmitCode──► Verifying ──ok──► Verified
//!                          ▲   │                          │
//!                          └───┘ resend (after cooldown)  └──err──► CodeRequested
//! ```

use log::{info, warn};

use crate::api::{AuthResponse, RequestResult, SmsResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginPhase {
    #[default]
    Idle,
    CodeRequested,
    Verifying,
    Verified,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginState {
    pub phase: LoginPhase,
    /// Resend interval reported by the server, in seconds.
    pub interval: i64,
    /// Seconds left before another code may be requested.
    pub cooldown: u64,
    /// Number the last code was sent to.
    pub mobile: Option<String>,
    pub requesting: bool,
    pub error: Option<String>,
}

impl LoginState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_request_code(&self) -> bool {
        !self.requesting && self.cooldown == 0 && self.phase != LoginPhase::Verifying
    }

    pub fn begin_code_request(&mut self, mobile: &str) {
        self.requesting = true;
        self.mobile = Some(mobile.to_string());
        self.error = None;
    }

    /// Merges the `/sms` response. Fields the response lacks keep their value.
    pub fn apply_sms_result(&mut self, result: RequestResult<SmsResponse>) {
        self.requesting = false;
        match result {
            Ok(response) => {
                if let Some(interval) = response.interval {
                    self.interval = interval;
                }
                self.cooldown = self.interval.max(0) as u64;
                self.phase = LoginPhase::CodeRequested;
                self.error = None;
                info!("Verification code sent, resend in {}s", self.cooldown);
            }
            Err(error) => {
                warn!("Requesting verification code failed: {}", error);
                self.error = Some(error.user_message());
            }
        }
    }

    pub fn begin_verify(&mut self) {
        self.phase = LoginPhase::Verifying;
        self.error = None;
    }

    /// Returns the access token on success.
    pub fn apply_auth_result(&mut self, result: RequestResult<AuthResponse>) -> Option<String> {
        match result {
            Ok(response) => {
                info!("Verification code accepted");
                self.phase = LoginPhase::Verified;
                self.error = None;
                Some(response.access_token)
            }
            Err(error) => {
                warn!("Verification failed: {}", error);
                self.phase = LoginPhase::CodeRequested;
                self.error = Some(error.user_message());
                None
            }
        }
    }

    /// One second elapsed.
    pub fn tick(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RequestError;
    use crate::test_support::{api_error, auth_response};

    #[test]
    fn test_sms_success_merges_interval_and_starts_cooldown() {
        let mut login = LoginState::new();
        login.begin_code_request("13800138000");
        login.apply_sms_result(Ok(SmsResponse { interval: Some(60) }));
        assert_eq!(login.phase, LoginPhase::CodeRequested);
        assert_eq!(login.interval, 60);
        assert_eq!(login.cooldown, 60);
        assert_eq!(login.mobile.as_deref(), Some("13800138000"));
        assert!(!login.can_request_code());
    }

    #[test]
    fn test_sms_response_without_interval_keeps_previous() {
        let mut login = LoginState {
            interval: 30,
            ..Default::default()
        };
        login.apply_sms_result(Ok(SmsResponse { interval: None }));
        assert_eq!(login.interval, 30);
    }

    #[test]
    fn test_sms_failure_shows_error_and_keeps_phase() {
        let mut login = LoginState::new();
        login.begin_code_request("1");
        login.apply_sms_result(Err(api_error(400, 2, "wait 60s")));
        assert_eq!(login.phase, LoginPhase::Idle);
        assert_eq!(login.error.as_deref(), Some("wait 60s"));
        assert!(!login.requesting);
    }

    #[test]
    fn test_auth_success_returns_token() {
        let mut login = LoginState::new();
        login.begin_verify();
        let token = login.apply_auth_result(Ok(auth_response("tok")));
        assert_eq!(token.as_deref(), Some("tok"));
        assert_eq!(login.phase, LoginPhase::Verified);
    }

    #[test]
    fn test_auth_failure_returns_to_code_requested() {
        let mut login = LoginState::new();
        login.begin_verify();
        let token = login.apply_auth_result(Err(RequestError::Network("timeout".into())));
        assert!(token.is_none());
        assert_eq!(login.phase, LoginPhase::CodeRequested);
        assert!(login.error.is_some());
    }

    #[test]
    fn test_tick_counts_down_to_zero() {
        let mut login = LoginState {
            cooldown: 2,
            ..Default::default()
        };
        login.tick();
        assert_eq!(login.cooldown, 1);
        login.tick();
        login.tick();
        assert_eq!(login.cooldown, 0);
        assert!(login.can_request_code());
    }
}
