//! SMS Service Trait Adapter
//!
//! Bridges any infrastructure [`SmsService`] to the core delivery trait
//! consumed by the verification service.

use async_trait::async_trait;
use sp_core::services::verification::SmsServiceTrait;
use sp_shared::config::SmsConfig;

use super::create_sms_service;
use super::sms_service::SmsService;

/// Adapter that implements the core `SmsServiceTrait` for a boxed provider
pub struct SmsServiceAdapter {
    inner: Box<dyn SmsService>,
}

impl SmsServiceAdapter {
    pub fn new(inner: Box<dyn SmsService>) -> Self {
        Self { inner }
    }

    /// Create the provider named in `config` and wrap it
    pub fn from_config(config: &SmsConfig) -> Self {
        Self::new(create_sms_service(config))
    }

    pub fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }
}

#[async_trait]
impl SmsServiceTrait for SmsServiceAdapter {
    async fn send_verification_code(&self, phone: &str, code: &str) -> Result<String, String> {
        self.inner
            .send_verification_code(phone, code)
            .await
            .map_err(|e| e.to_string())
    }
}
