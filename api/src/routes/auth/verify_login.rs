use actix_web::{web, HttpResponse};
use validator::Validate;

use sp_core::errors::{AuthError, DomainError};
use sp_core::repositories::UserRepository;
use sp_core::services::verification::SmsServiceTrait;
use sp_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::{LoginResponse, VerifyLoginRequest};
use crate::handlers::error::ApiError;

/// Handler for POST /api/v1/auth/verify-login
///
/// Consumes the verification code and logs the user in, registering them on
/// first login. Profile fields are only stored for new users.
///
/// ## Errors
/// - 400 INVALID_REQUEST: Missing phone or code
/// - 400 INVALID_SMS_CODE: `details.reason` tells the client whether to
///   retry (CODE_MISMATCH) or request a new code
/// - 403 ACCOUNT_SUSPENDED: Correct code but the account cannot log in
/// - 500 USER_CREATION_FAILED / DATABASE_ERROR: User store failures
pub async fn verify_login<U, S>(
    state: web::Data<AppState<U, S>>,
    request: web::Json<VerifyLoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: SmsServiceTrait + 'static,
{
    request.validate()?;

    let phone = request.phone.trim();
    let result = state
        .auth_service
        .verify_and_login(phone, request.code.trim(), &request.profile())
        .await;

    match result {
        Ok(login) => Ok(HttpResponse::Ok().json(
            ApiResponse::success(LoginResponse::from(login)).with_message("Authentication successful"),
        )),
        // The record is gone, so the client sees the budget of a new code
        Err(DomainError::Auth(error @ (AuthError::NoCodeFound | AuthError::CodeExpired))) => {
            let remaining = state.auth_service.remaining_attempts(phone).await;
            Err(ApiError::from(error).with_detail("remaining_attempts", remaining.into()))
        }
        Err(error) => Err(error.into()),
    }
}
