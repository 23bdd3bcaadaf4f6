//! Authentication configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// Signing secret used when `JWT_SECRET` is not provided. Development only.
pub const DEFAULT_JWT_SECRET: &str = "skypark-super-secret-key-for-development-only";

/// Longest accepted verification code lifetime (1 day)
pub const MAX_CODE_TTL_SECONDS: i64 = 86_400;

/// Longest accepted token lifetime (90 days)
pub const MAX_TOKEN_TTL_SECONDS: i64 = 90 * 86_400;

/// JWT authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// JWT secret key for signing tokens
    pub secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::from(DEFAULT_JWT_SECRET),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
            issuer: String::from("skypark-api"),
            audience: String::from("skypark-app"),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: i64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    /// Check if using default secret (security warning)
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == DEFAULT_JWT_SECRET
    }
}

/// SMS verification code settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VerificationConfig {
    /// How long a code stays valid, in seconds
    pub code_ttl_seconds: i64,

    /// Number of digits in a generated code
    pub code_length: usize,

    /// Wrong guesses allowed before the code is burned
    pub max_attempts: u32,

    /// How often the background sweep purges expired codes, in seconds
    pub sweep_interval_seconds: u64,
}

impl Default for VerificationConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: 300,
            code_length: 6,
            max_attempts: 3,
            sweep_interval_seconds: 60,
        }
    }
}

impl VerificationConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            code_ttl_seconds: env_or("SMS_CODE_TTL_SECONDS", defaults.code_ttl_seconds),
            code_length: env_or("SMS_CODE_LENGTH", defaults.code_length),
            max_attempts: env_or("SMS_MAX_ATTEMPTS", defaults.max_attempts),
            sweep_interval_seconds: env_or(
                "SMS_SWEEP_INTERVAL_SECONDS",
                defaults.sweep_interval_seconds,
            ),
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Verification code configuration
    #[serde(default)]
    pub verification: VerificationConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = JwtConfig::default();
        let secret = std::env::var("JWT_SECRET")
            .ok()
            .filter(|secret| !secret.is_empty())
            .unwrap_or(defaults.secret);

        Self {
            jwt: JwtConfig {
                secret,
                access_token_expiry: env_or(
                    "JWT_ACCESS_TOKEN_EXPIRY",
                    defaults.access_token_expiry,
                ),
                refresh_token_expiry: env_or(
                    "JWT_REFRESH_TOKEN_EXPIRY",
                    defaults.refresh_token_expiry,
                ),
                issuer: defaults.issuer,
                audience: defaults.audience,
            },
            verification: VerificationConfig::from_env(),
        }
    }
}
