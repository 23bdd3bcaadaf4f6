use actix_web::{web, HttpResponse};
use validator::Validate;

use sp_core::repositories::UserRepository;
use sp_core::services::verification::SmsServiceTrait;
use sp_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::{RefreshTokenRequest, TokenResponse};
use crate::handlers::error::ApiError;

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a new access and refresh token pair.
/// The presented refresh token is not revoked.
///
/// ## Errors
/// - 400 INVALID_REQUEST: Missing refresh token
/// - 401 TOKEN_REFRESH_FAILED: Invalid, expired or access-kind token
pub async fn refresh<U, S>(
    state: web::Data<AppState<U, S>>,
    request: web::Json<RefreshTokenRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: SmsServiceTrait + 'static,
{
    request.validate()?;

    let tokens = state
        .auth_service
        .refresh_tokens(&request.refresh_token)
        .await
        .map_err(|error| {
            tracing::warn!(error = %error, event = "refresh_failed", "Token refresh failed");
            ApiError::token_refresh_failed()
        })?;

    Ok(HttpResponse::Ok().json(
        ApiResponse::success(TokenResponse::from(tokens)).with_message("Token refreshed successfully"),
    ))
}
