//! Main verification service implementation

use sp_shared::utils::phone::{is_valid_regional_phone, mask_phone_number};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::errors::{AuthError, DomainResult};

use super::config::VerificationServiceConfig;
use super::store::{IssuedCode, VerificationCodeStore};
use super::traits::SmsServiceTrait;
use super::types::SendCodeResult;

/// Verification service for handling SMS verification codes
pub struct VerificationService<S: SmsServiceTrait> {
    /// SMS service for sending messages
    sms_service: Arc<S>,
    /// Owned code store, shared with the cleanup task
    store: Arc<VerificationCodeStore>,
    /// Per-phone locks held from issuing a code until its delivery settles
    send_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl<S: SmsServiceTrait> VerificationService<S> {
    /// Create a new verification service with its own store
    ///
    /// # Arguments
    ///
    /// * `sms_service` - SMS service implementation
    /// * `config` - Service configuration
    pub fn new(sms_service: Arc<S>, config: VerificationServiceConfig) -> Self {
        Self::with_store(sms_service, Arc::new(VerificationCodeStore::new(config)))
    }

    /// Create a service around an existing store
    pub fn with_store(sms_service: Arc<S>, store: Arc<VerificationCodeStore>) -> Self {
        Self {
            sms_service,
            store,
            send_locks: Mutex::new(HashMap::new()),
        }
    }

    /// The underlying store, for wiring the background sweep
    pub fn store(&self) -> Arc<VerificationCodeStore> {
        Arc::clone(&self.store)
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        self.store.config()
    }

    /// Send a verification code to a phone number
    ///
    /// This method:
    /// 1. Validates the phone number against the regional formats
    /// 2. Reuses the active code or generates a new one
    /// 3. Delivers a newly generated code via SMS
    ///
    /// A reused code is not delivered again. When delivery of a fresh code
    /// fails the code is discarded, so the next request generates a new one.
    /// Sends for the same phone are serialized until delivery settles, so a
    /// resend never reuses a code whose delivery is still in flight.
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - The active code and its expiry
    /// * `Err(DomainError)` - `InvalidPhoneFormat` or `DeliveryFailed`
    pub async fn send_code(&self, phone: &str) -> DomainResult<SendCodeResult> {
        if !is_valid_regional_phone(phone) {
            tracing::warn!(
                phone = %mask_phone_number(phone),
                event = "invalid_phone",
                "Rejected verification request for malformed phone"
            );
            return Err(AuthError::InvalidPhoneFormat {
                phone: phone.to_string(),
            }
            .into());
        }

        let phone_lock = self.acquire_send_lock(phone).await;
        let result = {
            let _guard = phone_lock.lock().await;
            self.issue_and_deliver(phone).await
        };
        self.release_send_lock(phone, phone_lock).await;
        result
    }

    async fn issue_and_deliver(&self, phone: &str) -> DomainResult<SendCodeResult> {
        let issued = self.store.issue_or_reuse(phone).await;
        let record = issued.code().clone();
        let reused = !issued.is_fresh();

        let message_id = match issued {
            IssuedCode::Reused(_) => None,
            IssuedCode::Fresh(_) => {
                match self
                    .sms_service
                    .send_verification_code(phone, &record.code)
                    .await
                {
                    Ok(message_id) => {
                        tracing::info!(
                            phone = %mask_phone_number(phone),
                            message_id = %message_id,
                            event = "code_dispatched",
                            "Verification code dispatched"
                        );
                        Some(message_id)
                    }
                    Err(reason) => {
                        self.store.discard(phone, &record.code).await;
                        tracing::error!(
                            phone = %mask_phone_number(phone),
                            error = %reason,
                            event = "delivery_failed",
                            "Failed to deliver verification code"
                        );
                        return Err(AuthError::DeliveryFailed { reason }.into());
                    }
                }
            }
        };

        Ok(SendCodeResult {
            phone: record.phone.clone(),
            remaining_attempts: record.remaining_attempts(self.config().max_attempts),
            reused,
            code: record.code,
            expires_at: record.expires_at,
            message_id,
        })
    }

    async fn acquire_send_lock(&self, phone: &str) -> Arc<Mutex<()>> {
        let mut locks = self.send_locks.lock().await;
        Arc::clone(locks.entry(phone.to_string()).or_default())
    }

    /// Drop the phone's lock entry once no other send holds or awaits it
    async fn release_send_lock(&self, phone: &str, phone_lock: Arc<Mutex<()>>) {
        let mut locks = self.send_locks.lock().await;
        // One reference in the map plus ours
        if Arc::strong_count(&phone_lock) == 2 {
            locks.remove(phone);
        }
    }

    /// Verify a submitted code; see [`VerificationCodeStore::verify`]
    pub async fn verify_code(&self, phone: &str, code: &str) -> DomainResult<()> {
        self.store.verify(phone, code).await?;
        Ok(())
    }

    /// Guesses left for `phone`, or the full budget when no code is active
    pub async fn remaining_attempts(&self, phone: &str) -> u32 {
        self.store.remaining_attempts(phone).await
    }

    /// Purge expired codes, returning how many were removed
    pub async fn sweep_expired(&self) -> usize {
        self.store.sweep_expired().await
    }
}
