//! In-process verification code store
//!
//! Holds at most one code per phone number. Every read-modify-write runs
//! under a single async mutex, so two concurrent guesses against the same
//! phone can never both observe an attempt count below the limit.

use chrono::Utc;
use sp_shared::utils::phone::mask_phone_number;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::domain::entities::verification_code::VerificationCode;
use crate::errors::AuthError;

use super::config::VerificationServiceConfig;

/// Outcome of asking the store for a code
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssuedCode {
    /// A new code was generated and must be delivered
    Fresh(VerificationCode),
    /// An active code already existed and is returned unchanged
    Reused(VerificationCode),
}

impl IssuedCode {
    pub fn code(&self) -> &VerificationCode {
        match self {
            IssuedCode::Fresh(code) | IssuedCode::Reused(code) => code,
        }
    }

    pub fn is_fresh(&self) -> bool {
        matches!(self, IssuedCode::Fresh(_))
    }
}

/// Phone to code mapping guarded by a mutex
pub struct VerificationCodeStore {
    codes: Mutex<HashMap<String, VerificationCode>>,
    config: VerificationServiceConfig,
}

impl VerificationCodeStore {
    pub fn new(config: VerificationServiceConfig) -> Self {
        Self {
            codes: Mutex::new(HashMap::new()),
            config,
        }
    }

    pub fn config(&self) -> &VerificationServiceConfig {
        &self.config
    }

    /// Return the active code for `phone`, or create one.
    ///
    /// An unexpired code with attempts below the limit is returned as-is:
    /// neither the code nor its expiry is refreshed by repeated requests.
    pub async fn issue_or_reuse(&self, phone: &str) -> IssuedCode {
        let mut codes = self.codes.lock().await;
        let now = Utc::now();

        if let Some(existing) = codes.get(phone) {
            if !existing.is_expired_at(now) && existing.has_attempts_left(self.config.max_attempts) {
                tracing::debug!(
                    phone = %mask_phone_number(phone),
                    event = "code_reused",
                    "Active verification code reused"
                );
                return IssuedCode::Reused(existing.clone());
            }
        }

        let code = VerificationCode::with_settings(
            phone.to_string(),
            self.config.code_length,
            self.config.code_ttl(),
        );
        codes.insert(phone.to_string(), code.clone());

        tracing::info!(
            phone = %mask_phone_number(phone),
            expires_at = %code.expires_at,
            event = "code_generated",
            "Verification code generated"
        );

        IssuedCode::Fresh(code)
    }

    /// Check a candidate code.
    ///
    /// Order matters: expiry is checked before the attempt counter moves, so
    /// an expired code never burns an attempt. A mismatch keeps the record;
    /// every other outcome removes it.
    pub async fn verify(&self, phone: &str, candidate: &str) -> Result<(), AuthError> {
        let mut codes = self.codes.lock().await;
        let now = Utc::now();
        let max_attempts = self.config.max_attempts;

        let outcome = match codes.get_mut(phone) {
            None => return Err(AuthError::NoCodeFound),
            Some(record) if record.is_expired_at(now) => Err(AuthError::CodeExpired),
            Some(record) => {
                let attempts = record.record_attempt();
                if attempts > max_attempts {
                    Err(AuthError::AttemptsExceeded)
                } else if record.matches(candidate) {
                    Ok(())
                } else {
                    let remaining_attempts = max_attempts - attempts;
                    tracing::warn!(
                        phone = %mask_phone_number(phone),
                        attempts = attempts,
                        remaining_attempts = remaining_attempts,
                        event = "code_mismatch",
                        "Verification code mismatch"
                    );
                    return Err(AuthError::CodeMismatch { remaining_attempts });
                }
            }
        };

        codes.remove(phone);

        match &outcome {
            Ok(()) => tracing::info!(
                phone = %mask_phone_number(phone),
                event = "code_verified",
                "Verification code accepted"
            ),
            Err(error) => tracing::warn!(
                phone = %mask_phone_number(phone),
                error = %error,
                event = "code_purged",
                "Verification code purged"
            ),
        }

        outcome
    }

    /// Guesses left for `phone`.
    ///
    /// Returns the full budget when no active record exists, so callers
    /// cannot tell "no code" apart from "untouched code".
    pub async fn remaining_attempts(&self, phone: &str) -> u32 {
        let codes = self.codes.lock().await;
        match codes.get(phone) {
            Some(record) if !record.is_expired() => {
                record.remaining_attempts(self.config.max_attempts)
            }
            _ => self.config.max_attempts,
        }
    }

    /// Remove `phone`'s record if it still holds `code`.
    ///
    /// Used to roll back a freshly generated code whose delivery failed,
    /// without clobbering a newer code issued in the meantime.
    pub async fn discard(&self, phone: &str, code: &str) -> bool {
        let mut codes = self.codes.lock().await;
        match codes.get(phone) {
            Some(record) if record.code == code => {
                codes.remove(phone);
                true
            }
            _ => false,
        }
    }

    /// Remove every expired record, returning how many were purged
    pub async fn sweep_expired(&self) -> usize {
        let mut codes = self.codes.lock().await;
        let now = Utc::now();
        let before = codes.len();
        codes.retain(|_, record| !record.is_expired_at(now));
        before - codes.len()
    }

    /// Number of records currently held
    pub async fn len(&self) -> usize {
        self.codes.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for VerificationCodeStore {
    fn default() -> Self {
        Self::new(VerificationServiceConfig::default())
    }
}
