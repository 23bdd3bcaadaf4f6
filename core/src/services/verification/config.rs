//! Configuration for the verification service

use chrono::Duration;
use sp_shared::config::VerificationConfig;

use crate::domain::clock;
use crate::domain::entities::verification_code::{
    CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS,
};

/// Configuration for the verification service
#[derive(Debug, Clone)]
pub struct VerificationServiceConfig {
    /// Number of seconds before a verification code expires
    pub code_ttl_seconds: i64,
    /// Number of digits in a code
    pub code_length: usize,
    /// Maximum number of verification attempts allowed
    pub max_attempts: u32,
    /// Seconds between background sweeps of expired codes
    pub sweep_interval_seconds: u64,
}

impl Default for VerificationServiceConfig {
    fn default() -> Self {
        Self {
            code_ttl_seconds: DEFAULT_EXPIRATION_MINUTES * 60,
            code_length: CODE_LENGTH,
            max_attempts: MAX_ATTEMPTS,
            sweep_interval_seconds: 60,
        }
    }
}

impl VerificationServiceConfig {
    pub fn code_ttl(&self) -> Duration {
        clock::seconds(self.code_ttl_seconds)
    }
}

impl From<&VerificationConfig> for VerificationServiceConfig {
    fn from(config: &VerificationConfig) -> Self {
        Self {
            code_ttl_seconds: config.code_ttl_seconds,
            code_length: config.code_length,
            max_attempts: config.max_attempts,
            sweep_interval_seconds: config.sweep_interval_seconds,
        }
    }
}
