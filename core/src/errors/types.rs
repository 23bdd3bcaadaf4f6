//! Error type definitions for authentication, token management and
//! request validation. Stable client-facing codes are assigned by the
//! presentation layer.

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid phone format: {phone}")]
    InvalidPhoneFormat { phone: String },

    #[error("Failed to deliver verification code: {reason}")]
    DeliveryFailed { reason: String },

    #[error("No verification code found for this phone number")]
    NoCodeFound,

    #[error("Verification code expired")]
    CodeExpired,

    #[error("Maximum attempts exceeded, request a new code")]
    AttemptsExceeded,

    #[error("Invalid verification code, {remaining_attempts} attempts remaining")]
    CodeMismatch { remaining_attempts: u32 },

    #[error("User not found")]
    UserNotFound,

    #[error("Failed to create user: {reason}")]
    UserCreationFailed { reason: String },

    #[error("User store failure: {reason}")]
    StoreFailure { reason: String },

    #[error("Failed to update profile: {reason}")]
    UpdateFailed { reason: String },

    #[error("Account suspended")]
    AccountSuspended,
}

impl AuthError {
    /// Whether this error comes from checking a submitted code
    pub fn is_verification_failure(&self) -> bool {
        matches!(
            self,
            AuthError::NoCodeFound
                | AuthError::CodeExpired
                | AuthError::AttemptsExceeded
                | AuthError::CodeMismatch { .. }
        )
    }
}

/// Token-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    ExpiredToken,

    #[error("Token generation failed: {reason}")]
    TokenGenerationFailed { reason: String },
}

/// Input validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field: {field}")]
    RequiredField { field: String },

    #[error("Invalid format: {field}")]
    InvalidFormat { field: String },
}
