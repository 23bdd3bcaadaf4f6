//! Application state and route wiring
//!
//! [`configure`] registers every route on an actix `ServiceConfig`, so the
//! binary and the HTTP tests build the same application.

use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse, ResponseError};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use sp_core::repositories::UserRepository;
use sp_core::services::auth::AuthService;
use sp_core::services::token::{TokenService, TokenServiceConfig};
use sp_core::services::verification::{
    SmsServiceTrait, VerificationCleanupService, VerificationService, VerificationServiceConfig,
};
use sp_infra::database::InMemoryUserRepository;
use sp_infra::sms::SmsServiceAdapter;
use sp_shared::config::AppConfig;

use crate::handlers::error::ApiError;
use crate::middleware::{JwtAuth, OptionalAuth, RequireRole};
use crate::routes::{admin, auth, user};

/// Shared state handed to every handler
pub struct AppState<U, S>
where
    U: UserRepository,
    S: SmsServiceTrait,
{
    pub auth_service: Arc<AuthService<U, S>>,
}

impl<U, S> AppState<U, S>
where
    U: UserRepository,
    S: SmsServiceTrait,
{
    pub fn new(auth_service: Arc<AuthService<U, S>>) -> Self {
        Self { auth_service }
    }

    pub fn token_service(&self) -> Arc<TokenService> {
        self.auth_service.token_service()
    }

    /// Background sweep over the verification code store
    pub fn cleanup_service(&self) -> VerificationCleanupService {
        let verification = self.auth_service.verification_service();
        VerificationCleanupService::new(
            verification.store(),
            Duration::from_secs(verification.config().sweep_interval_seconds),
        )
    }
}

/// State used by the server binary
pub type DefaultAppState = AppState<InMemoryUserRepository, SmsServiceAdapter>;

impl DefaultAppState {
    /// Wire the in-memory user store and the configured SMS provider
    pub fn from_config(config: &AppConfig) -> Self {
        let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.auth.jwt)));
        let sms_service = Arc::new(SmsServiceAdapter::from_config(&config.sms));
        let verification_service = Arc::new(VerificationService::new(
            sms_service,
            VerificationServiceConfig::from(&config.auth.verification),
        ));
        let user_repository = Arc::new(InMemoryUserRepository::new());

        Self::new(Arc::new(AuthService::new(
            user_repository,
            verification_service,
            token_service,
        )))
    }
}

/// Register state, routes and the JSON error handler
pub fn configure<U, S>(state: web::Data<AppState<U, S>>) -> impl FnOnce(&mut web::ServiceConfig)
where
    U: UserRepository + 'static,
    S: SmsServiceTrait + 'static,
{
    move |cfg: &mut web::ServiceConfig| {
        let token_service = state.token_service();

        cfg.app_data(state)
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .route("/health", web::get().to(health_check))
            .service(
                web::scope("/api/v1")
                    .service(
                        web::scope("/auth")
                            .route("/send-sms", web::post().to(auth::send_sms::<U, S>))
                            .route("/verify-login", web::post().to(auth::verify_login::<U, S>))
                            .route("/refresh", web::post().to(auth::refresh::<U, S>)),
                    )
                    .service(
                        web::scope("/user")
                            .wrap(JwtAuth::required(Arc::clone(&token_service)))
                            .route("/profile", web::get().to(user::get_profile::<U, S>))
                            .route("/profile", web::put().to(user::update_profile::<U, S>)),
                    )
                    .service(
                        web::scope("/admin")
                            .wrap(RequireRole::admin_only())
                            .wrap(JwtAuth::required(Arc::clone(&token_service)))
                            .route("/users", web::get().to(admin::list_users::<U, S>)),
                    )
                    .service(
                        web::resource("/")
                            .wrap(JwtAuth::optional(token_service))
                            .route(web::get().to(api_info)),
                    ),
            )
            .default_service(web::route().to(not_found));
    }
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!(error = %err, "Rejected malformed JSON body");
    ApiError::invalid_request(format!("Invalid request body: {}", err)).into()
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": "skypark-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Service description, personalised when a valid token is presented
async fn api_info(auth: OptionalAuth) -> HttpResponse {
    let mut body = json!({
        "message": "SkyPark API v1",
        "endpoints": {
            "health": "/health",
            "auth": {
                "send_sms": {"path": "/api/v1/auth/send-sms", "method": "POST"},
                "verify_login": {"path": "/api/v1/auth/verify-login", "method": "POST"},
                "refresh": {"path": "/api/v1/auth/refresh", "method": "POST"}
            },
            "user": {
                "profile": {"path": "/api/v1/user/profile", "methods": ["GET", "PUT"]}
            },
            "admin": {
                "users": {"path": "/api/v1/admin/users", "method": "GET"}
            }
        }
    });

    if let OptionalAuth(Some(context)) = auth {
        body["viewer"] = json!({
            "user_id": context.user_id,
            "role": context.role,
        });
    }

    HttpResponse::Ok().json(body)
}

async fn not_found() -> HttpResponse {
    ApiError::not_found().error_response()
}
