//! Form validation. Pure functions only; the caller decides what to dispatch.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MobileRequired,
    CodeRequired,
    CodeNotNumeric(String),
    NameRequired,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MobileRequired => write!(f, "mobile number is required"),
            ValidationError::CodeRequired => write!(f, "verification code is required"),
            ValidationError::CodeNotNumeric(raw) => {
                write!(f, "verification code must be a number: {raw:?}")
            }
            ValidationError::NameRequired => write!(f, "name is required"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Removes every space; empty after stripping is an error.
pub fn mobile(raw: &str) -> Result<String, ValidationError> {
    let mobile = raw.replace(' ', "");
    if mobile.trim().is_empty() {
        return Err(ValidationError::MobileRequired);
    }
    Ok(mobile)
}

pub fn code(raw: &str) -> Result<u32, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::CodeRequired);
    }
    trimmed
        .parse::<u32>()
        .map_err(|_| ValidationError::CodeNotNumeric(trimmed.to_string()))
}

/// Validated input for `POST /sms/auth`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSubmission {
    pub mobile: String,
    pub code: u32,
}

pub fn code_submission(raw_mobile: &str, raw_code: &str) -> Result<CodeSubmission, ValidationError> {
    Ok(CodeSubmission {
        mobile: mobile(raw_mobile)?,
        code: code(raw_code)?,
    })
}

pub fn display_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::NameRequired);
    }
    Ok(name.to_string())
}
