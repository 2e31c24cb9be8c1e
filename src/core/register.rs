//! Display-name registration for sessions with no user yet.

use log::warn;

use crate::api::{RequestResult, User};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterState {
    pub submitting: bool,
    pub error: Option<String>,
}

impl RegisterState {
    pub fn begin(&mut self) {
        self.submitting = true;
        self.error = None;
    }

    pub fn apply_result(&mut self, result: RequestResult<User>) -> Option<User> {
        self.submitting = false;
        match result {
            Ok(user) => Some(user),
            Err(error) => {
                warn!("Registration failed: {}", error);
                self.error = Some(error.user_message());
                None
            }
        }
    }
}
