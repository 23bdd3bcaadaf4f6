//! Request and response bodies of the HTTP API
//!
//! Field names are snake_case. Request bodies also accept the camelCase
//! spellings used by older mobile clients.

pub mod auth;
pub mod user;

pub use auth::{
    LoginResponse, RefreshTokenRequest, SendSmsRequest, SendSmsResponse, TokenResponse,
    UserSummary, VerifyLoginRequest,
};
pub use user::{UpdateProfileRequest, UserListResponse, UserProfileResponse};
