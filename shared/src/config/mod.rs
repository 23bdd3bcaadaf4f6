//! Configuration module with business-specific sub-modules
//!
//! - `auth` - Token signing and verification code settings
//! - `environment` - Environment detection and logging configuration
//! - `server` - HTTP server binding
//! - `sms` - SMS provider selection

pub mod auth;
pub mod environment;
pub mod server;
pub mod sms;

use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub use auth::{
    AuthConfig, JwtConfig, VerificationConfig, DEFAULT_JWT_SECRET, MAX_CODE_TTL_SECONDS,
    MAX_TOKEN_TTL_SECONDS,
};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use server::ServerConfig;
pub use sms::SmsConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// SMS provider configuration
    pub sms: SmsConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        let env = Environment::default();
        Self {
            environment: env,
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            sms: SmsConfig::default(),
            logging: LoggingConfig::for_environment(env),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// A `.env` file in the working directory is read first when present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let environment = Environment::from_env();
        Self {
            environment,
            server: ServerConfig::from_env(),
            auth: AuthConfig::from_env(),
            sms: SmsConfig::from_env(),
            logging: LoggingConfig::from_env(environment),
        }
    }

    /// Reject configurations that must never reach production
    pub fn validate(&self) -> Result<(), String> {
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err("JWT_SECRET must be set in production".to_string());
        }
        if self.auth.jwt.secret.is_empty() {
            return Err("JWT secret cannot be empty".to_string());
        }
        if self.auth.verification.max_attempts == 0 {
            return Err("Maximum verification attempts must be positive".to_string());
        }
        if self.auth.verification.code_length == 0 {
            return Err("Verification code length must be positive".to_string());
        }
        check_ttl(
            "SMS_CODE_TTL_SECONDS",
            self.auth.verification.code_ttl_seconds,
            MAX_CODE_TTL_SECONDS,
        )?;
        check_ttl(
            "JWT_ACCESS_TOKEN_EXPIRY",
            self.auth.jwt.access_token_expiry,
            MAX_TOKEN_TTL_SECONDS,
        )?;
        check_ttl(
            "JWT_REFRESH_TOKEN_EXPIRY",
            self.auth.jwt.refresh_token_expiry,
            MAX_TOKEN_TTL_SECONDS,
        )?;
        Ok(())
    }
}

/// Lifetimes must be positive and no longer than `max` seconds
fn check_ttl(name: &str, seconds: i64, max: i64) -> Result<(), String> {
    if seconds <= 0 || seconds > max {
        return Err(format!(
            "{} must be between 1 and {} seconds, got {}",
            name, max, seconds
        ));
    }
    Ok(())
}

/// Read an environment variable and parse it, falling back to `default`
/// when the variable is missing or unparseable.
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> T {
    parse_or(std::env::var(key).ok().as_deref(), default)
}

fn parse_or<T: FromStr>(raw: Option<&str>, default: T) -> T {
    raw.and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
