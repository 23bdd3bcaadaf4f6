use actix_web::{web, HttpResponse};
use validator::Validate;

use sp_core::domain::entities::ProfileFields;
use sp_core::repositories::UserRepository;
use sp_core::services::verification::SmsServiceTrait;
use sp_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::{UpdateProfileRequest, UserProfileResponse};
use crate::handlers::error::ApiError;
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/user/profile
pub async fn get_profile<U, S>(
    state: web::Data<AppState<U, S>>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: SmsServiceTrait + 'static,
{
    let user = state.auth_service.get_profile(auth.user_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(UserProfileResponse::from(user))))
}

/// Handler for PUT /api/v1/user/profile
///
/// Only the fields present and non-empty in the body are changed.
pub async fn update_profile<U, S>(
    state: web::Data<AppState<U, S>>,
    auth: AuthContext,
    request: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: SmsServiceTrait + 'static,
{
    request.validate()?;

    let profile = ProfileFields::from(request.into_inner());
    let user = state.auth_service.update_profile(auth.user_id, &profile).await?;

    Ok(HttpResponse::Ok().json(
        ApiResponse::success(UserProfileResponse::from(user))
            .with_message("Profile updated successfully"),
    ))
}
