//! SMS Service Module
//!
//! Delivery of verification codes. Providers implement [`SmsService`];
//! [`SmsServiceAdapter`] exposes any of them to the core verification
//! service.
//!
//! ## Providers
//!
//! - **Mock**: console output for development
//! - **Failover**: primary provider with automatic switch to a backup

use std::time::Duration;

use sp_shared::config::SmsConfig;

pub mod adapter;
pub mod failover_sms;
pub mod mock_sms;
pub mod sms_service;

pub use adapter::SmsServiceAdapter;
pub use failover_sms::FailoverSmsService;
pub use mock_sms::MockSmsService;
pub use sms_service::{SmsService, VERIFICATION_MESSAGE_PREFIX};

#[cfg(test)]
mod tests;

/// Create an SMS service based on configuration
///
/// # Arguments
///
/// * `config` - SMS configuration naming the provider
///
/// # Returns
///
/// A boxed SMS service implementation. Unknown providers fall back to
/// the mock service.
pub fn create_sms_service(config: &SmsConfig) -> Box<dyn SmsService> {
    match config.provider.as_str() {
        "mock" => Box::new(MockSmsService::with_options(config.console_output, false)),
        "failover" => {
            let primary = MockSmsService::with_options(config.console_output, false)
                .named("MockPrimary");
            let backup = MockSmsService::with_options(config.console_output, false)
                .named("MockBackup");
            Box::new(FailoverSmsService::new(
                Box::new(primary),
                Box::new(backup),
                Duration::from_secs(config.failover_timeout_seconds),
            ))
        }
        other => {
            tracing::warn!(
                provider = other,
                "Unknown SMS provider, using mock implementation"
            );
            Box::new(MockSmsService::with_options(config.console_output, false))
        }
    }
}
