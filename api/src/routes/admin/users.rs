use actix_web::{web, HttpResponse};

use sp_core::repositories::UserRepository;
use sp_core::services::verification::SmsServiceTrait;
use sp_shared::types::ApiResponse;

use crate::app::AppState;
use crate::dto::UserListResponse;
use crate::handlers::error::ApiError;
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/admin/users
pub async fn list_users<U, S>(
    state: web::Data<AppState<U, S>>,
    auth: AuthContext,
) -> Result<HttpResponse, ApiError>
where
    U: UserRepository + 'static,
    S: SmsServiceTrait + 'static,
{
    let users = state.auth_service.list_users().await?;
    tracing::info!(
        admin_id = %auth.user_id,
        total = users.len(),
        event = "users_listed",
        "Administrator listed users"
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(UserListResponse::from(users))))
}
