//! SMS provider configuration

use serde::{Deserialize, Serialize};

use super::env_or;

/// SMS service configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SmsConfig {
    /// SMS service provider ("mock", "failover")
    pub provider: String,

    /// Seconds to stay on the backup provider before retrying the primary
    pub failover_timeout_seconds: u64,

    /// Print delivered messages to stdout (mock provider only)
    pub console_output: bool,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: String::from("mock"),
            failover_timeout_seconds: 30,
            console_output: true,
        }
    }
}

impl SmsConfig {
    /// Create from SMS_PROVIDER, SMS_FAILOVER_TIMEOUT and SMS_CONSOLE_OUTPUT
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            provider: std::env::var("SMS_PROVIDER").unwrap_or(defaults.provider),
            failover_timeout_seconds: env_or(
                "SMS_FAILOVER_TIMEOUT",
                defaults.failover_timeout_seconds,
            ),
            console_output: env_or("SMS_CONSOLE_OUTPUT", defaults.console_output),
        }
    }
}
