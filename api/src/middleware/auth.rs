//! JWT authentication middleware for protecting API endpoints.
//!
//! [`JwtAuth`] extracts the Bearer token from the Authorization header,
//! validates it and injects an [`AuthContext`] into the request extensions.
//! It runs in two modes:
//! 1. Required: any failure short-circuits with a 401 response
//! 2. Optional: failures are ignored and the request proceeds anonymously
//!
//! [`RequireRole`] must be wrapped inside a required [`JwtAuth`].

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use serde_json::json;
use sp_core::domain::entities::{Claims, TokenKind, UserRole};
use sp_core::errors::{DomainError, TokenError};
use sp_core::services::token::TokenService;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};
use uuid::Uuid;

use crate::handlers::error::ApiError;

/// Identity of the caller, available to handlers behind [`JwtAuth`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub phone: String,
    pub role: UserRole,
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            phone: claims.phone,
            role: claims.role,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthMode {
    Required,
    Optional,
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    token_service: Arc<TokenService>,
    mode: AuthMode,
}

impl JwtAuth {
    /// Reject requests without a valid access token
    pub fn required(token_service: Arc<TokenService>) -> Self {
        Self {
            token_service,
            mode: AuthMode::Required,
        }
    }

    /// Authenticate when possible, never reject
    pub fn optional(token_service: Arc<TokenService>) -> Self {
        Self {
            token_service,
            mode: AuthMode::Optional,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            token_service: Arc::clone(&self.token_service),
            mode: self.mode,
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
    mode: AuthMode,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        match authenticate(&req, &self.token_service) {
            Ok(context) => {
                req.extensions_mut().insert(context);
            }
            Err(error) if self.mode == AuthMode::Required => {
                tracing::debug!(
                    path = %req.path(),
                    code = error.code(),
                    "Rejected unauthenticated request"
                );
                let response = req.into_response(error.error_response());
                return Box::pin(async move { Ok(response.map_into_right_body()) });
            }
            Err(_) => {}
        }

        Box::pin(async move { service.call(req).await.map(ServiceResponse::map_into_left_body) })
    }
}

/// Extracts the token from `Authorization: Bearer <token>`
fn extract_bearer_token(req: &ServiceRequest) -> Result<String, ApiError> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .ok_or_else(ApiError::auth_required)?;
    let value = header
        .to_str()
        .map_err(|_| ApiError::invalid_token_format())?;

    let parts: Vec<&str> = value.split(' ').collect();
    match parts.as_slice() {
        ["Bearer", token] => Ok((*token).to_string()),
        _ => Err(ApiError::invalid_token_format()),
    }
}

fn authenticate(req: &ServiceRequest, token_service: &TokenService) -> Result<AuthContext, ApiError> {
    let token = extract_bearer_token(req)?;

    let claims = token_service.validate_token(&token).map_err(|error| match error {
        DomainError::Token(TokenError::ExpiredToken) => ApiError::token_expired(),
        _ => ApiError::invalid_token(),
    })?;

    if claims.token_type != TokenKind::Access {
        return Err(ApiError::invalid_token_type());
    }

    Ok(claims.into())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthContext>()
                .cloned()
                .ok_or_else(ApiError::unauthorized),
        )
    }
}

/// Extractor for optional authentication
pub struct OptionalAuth(pub Option<AuthContext>);

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        ready(Ok(OptionalAuth(req.extensions().get::<AuthContext>().cloned())))
    }
}

/// Role guard middleware factory
#[derive(Clone)]
pub struct RequireRole {
    allowed: Rc<Vec<UserRole>>,
}

impl RequireRole {
    pub fn new(allowed: impl Into<Vec<UserRole>>) -> Self {
        Self {
            allowed: Rc::new(allowed.into()),
        }
    }

    /// Admin and super admin
    pub fn admin_only() -> Self {
        Self::new(UserRole::ADMINS)
    }

    /// Manager, admin and super admin
    pub fn manager_or_admin() -> Self {
        Self::new(UserRole::MANAGERS)
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequireRole
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequireRoleMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireRoleMiddleware {
            service: Rc::new(service),
            allowed: Rc::clone(&self.allowed),
        }))
    }
}

pub struct RequireRoleMiddleware<S> {
    service: Rc<S>,
    allowed: Rc<Vec<UserRole>>,
}

impl<S, B> Service<ServiceRequest> for RequireRoleMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let role = req.extensions().get::<AuthContext>().map(|context| context.role);

        let rejection = match role {
            None => Some(ApiError::unauthorized()),
            Some(role) if !self.allowed.contains(&role) => {
                tracing::warn!(
                    path = %req.path(),
                    role = role.as_str(),
                    "Insufficient permissions"
                );
                let required: Vec<&str> = self.allowed.iter().map(UserRole::as_str).collect();
                Some(ApiError::insufficient_permissions().with_details(json!({
                    "required_roles": required,
                    "user_role": role.as_str(),
                })))
            }
            Some(_) => None,
        };

        if let Some(error) = rejection {
            let response = req.into_response(error.error_response());
            return Box::pin(async move { Ok(response.map_into_right_body()) });
        }

        Box::pin(async move { service.call(req).await.map(ServiceResponse::map_into_left_body) })
    }
}
