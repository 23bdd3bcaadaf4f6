use actix_web::{web, HttpResponse};
use validator::Validate;

use sp_core::repositories::UserRepository;
use sp_core::services::verification::SmsServiceTrait;
use sp_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::{SendSmsRequest, SendSmsResponse};
use crate::handlers::error::ApiError;

/// Handler for POST /api/v1/auth/send-sms
///
/// Sends a verification code to the phone number, or reuses the active one.
///
/// # Request Body
///
/// ```json
/// { "phone": "+996700123456" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "success": true,
///     "data": {
///         "phone": "+996700123456",
///         "expires_at": "2024-05-01T10:05:00Z",
///         "remaining_attempts": 3
///     },
///     "message": "SMS verification code sent successfully"
/// }
/// ```
///
/// ## Errors
/// - 400 INVALID_REQUEST: Missing or malformed body
/// - 400 SMS_SEND_FAILED: Phone number is not in a supported format
/// - 503 SMS_SEND_FAILED: The SMS provider could not deliver the code
pub async fn send_sms<U, S>(
    state: web::Data<AppState<U, S>>,
    request: web::Json<SendSmsRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: SmsServiceTrait + 'static,
{
    request.validate()?;

    let result = state
        .auth_service
        .send_verification_code(request.phone.trim())
        .await?;

    let response = SendSmsResponse {
        phone: result.phone,
        expires_at: result.expires_at,
        remaining_attempts: result.remaining_attempts,
    };

    Ok(HttpResponse::Ok()
        .json(ApiResponse::success(response).with_message("SMS verification code sent successfully")))
}
