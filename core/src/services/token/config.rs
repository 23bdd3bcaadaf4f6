//! Configuration for the token service

use chrono::Duration;
use jsonwebtoken::Algorithm;
use sp_shared::config::{JwtConfig, DEFAULT_JWT_SECRET};

use crate::domain::clock;
use crate::domain::entities::token::{
    ACCESS_TOKEN_EXPIRY_MINUTES, JWT_AUDIENCE, JWT_ISSUER, REFRESH_TOKEN_EXPIRY_DAYS,
};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Issuer written to and required from every token
    pub issuer: String,
    /// Audience written to and required from every token
    pub audience: String,
    /// Access token lifetime in seconds
    pub access_token_ttl_seconds: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_ttl_seconds: i64,
    /// Clock skew tolerated by the signature library, in seconds
    pub leeway_seconds: u64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            algorithm: Algorithm::HS256,
            issuer: JWT_ISSUER.to_string(),
            audience: JWT_AUDIENCE.to_string(),
            access_token_ttl_seconds: ACCESS_TOKEN_EXPIRY_MINUTES * 60,
            refresh_token_ttl_seconds: REFRESH_TOKEN_EXPIRY_DAYS * 24 * 60 * 60,
            leeway_seconds: 60,
        }
    }
}

impl TokenServiceConfig {
    /// Default configuration with a specific secret
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn access_token_ttl(&self) -> Duration {
        clock::seconds(self.access_token_ttl_seconds)
    }

    pub fn refresh_token_ttl(&self) -> Duration {
        clock::seconds(self.refresh_token_ttl_seconds)
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_token_ttl_seconds: config.access_token_expiry,
            refresh_token_ttl_seconds: config.refresh_token_expiry,
            ..Default::default()
        }
    }
}
