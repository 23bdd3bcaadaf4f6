//! Translation of domain failures into HTTP responses
//!
//! Error codes are part of the client contract and must not change.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::{json, Map, Value};
use sp_core::errors::{AuthError, DomainError, TokenError};
use sp_shared::types::ApiResponse;
use validator::ValidationErrors;

/// Error returned by handlers and middleware, rendered as the standard
/// `{success: false, error: {code, message, details?}}` envelope
#[derive(Debug, Clone, thiserror::Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    details: Option<Value>,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "INVALID_REQUEST", message)
    }

    pub fn unauthorized() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Authentication required")
    }

    pub fn auth_required() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "AUTH_REQUIRED",
            "Authorization header is required",
        )
    }

    pub fn invalid_token_format() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "INVALID_TOKEN_FORMAT",
            "Authorization header must be 'Bearer <token>'",
        )
    }

    pub fn token_expired() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED", "Access token has expired")
    }

    pub fn invalid_token() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "INVALID_TOKEN", "Invalid access token")
    }

    pub fn invalid_token_type() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "INVALID_TOKEN_TYPE",
            "An access token is required",
        )
    }

    pub fn token_refresh_failed() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "TOKEN_REFRESH_FAILED",
            "Failed to refresh token",
        )
    }

    pub fn insufficient_permissions() -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            "INSUFFICIENT_PERMISSIONS",
            "Insufficient permissions",
        )
    }

    pub fn not_found() -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "The requested resource was not found",
        )
    }

    /// Replace the details object
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Add one field to the details object
    pub fn with_detail(mut self, key: &str, value: Value) -> Self {
        let mut details = match self.details.take() {
            Some(Value::Object(map)) => map,
            _ => Map::new(),
        };
        details.insert(key.to_string(), value);
        self.details = Some(Value::Object(details));
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = ApiResponse::error(self.code, self.message.clone());
        if let Some(details) = &self.details {
            body = body.with_details(details.clone());
        }
        HttpResponse::build(self.status).json(body)
    }
}

fn verification_reason(error: &AuthError) -> &'static str {
    match error {
        AuthError::NoCodeFound => "NO_CODE_FOUND",
        AuthError::CodeExpired => "CODE_EXPIRED",
        AuthError::AttemptsExceeded => "ATTEMPTS_EXCEEDED",
        _ => "CODE_MISMATCH",
    }
}

fn verification_failure(error: &AuthError) -> ApiError {
    let api_error = ApiError::new(StatusCode::BAD_REQUEST, "INVALID_SMS_CODE", error.to_string())
        .with_detail("reason", json!(verification_reason(error)));
    match error {
        AuthError::CodeMismatch { remaining_attempts } => {
            api_error.with_detail("remaining_attempts", json!(remaining_attempts))
        }
        AuthError::AttemptsExceeded => api_error.with_detail("remaining_attempts", json!(0)),
        _ => api_error,
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match &error {
            AuthError::InvalidPhoneFormat { .. } => Self::new(
                StatusCode::BAD_REQUEST,
                "SMS_SEND_FAILED",
                "Invalid phone number format",
            ),
            AuthError::DeliveryFailed { .. } => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "SMS_SEND_FAILED",
                "Failed to send SMS verification code",
            ),
            AuthError::NoCodeFound
            | AuthError::CodeExpired
            | AuthError::AttemptsExceeded
            | AuthError::CodeMismatch { .. } => verification_failure(&error),
            AuthError::UserCreationFailed { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "USER_CREATION_FAILED",
                "Failed to create user account",
            ),
            AuthError::StoreFailure { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "Database operation failed",
            ),
            AuthError::UpdateFailed { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPDATE_FAILED",
                "Failed to update profile",
            ),
            AuthError::UserNotFound => {
                Self::new(StatusCode::NOT_FOUND, "USER_NOT_FOUND", "User not found")
            }
            AuthError::AccountSuspended => Self::new(
                StatusCode::FORBIDDEN,
                "ACCOUNT_SUSPENDED",
                "Account is suspended",
            ),
        }
    }
}

impl From<TokenError> for ApiError {
    fn from(error: TokenError) -> Self {
        match error {
            TokenError::InvalidToken => Self::invalid_token(),
            TokenError::ExpiredToken => Self::token_expired(),
            TokenError::TokenGenerationFailed { .. } => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "TOKEN_GENERATION_FAILED",
                "Failed to generate tokens",
            ),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(error: DomainError) -> Self {
        match error {
            DomainError::Auth(error) => error.into(),
            DomainError::Token(error) => error.into(),
            DomainError::ValidationErr(error) => Self::invalid_request(error.to_string()),
            DomainError::Validation { message } => Self::invalid_request(message),
            DomainError::Internal { message } => {
                tracing::error!(error = %message, "Unhandled internal error");
                Self::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred",
                )
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        fields.sort_unstable();
        Self::invalid_request("Invalid request data").with_detail("fields", json!(fields))
    }
}
