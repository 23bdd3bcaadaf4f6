//! Failover SMS Service Implementation
//!
//! Sends through a primary provider and switches to a backup when the
//! primary fails. While on the backup, the primary is retried once the
//! failover timeout has elapsed since its last failure. A single send never
//! retries the same provider.

use async_trait::async_trait;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::sms::sms_service::SmsService;
use crate::InfrastructureError;

#[derive(Debug, Clone, Default)]
struct FailoverState {
    using_backup: bool,
    last_primary_failure: Option<Instant>,
    primary_failure_count: u32,
}

/// SMS service with automatic failover capability
pub struct FailoverSmsService {
    primary: Box<dyn SmsService>,
    backup: Box<dyn SmsService>,
    state: RwLock<FailoverState>,
    /// How long to stay on the backup before trying the primary again
    failover_timeout: Duration,
}

impl FailoverSmsService {
    /// Create a new failover SMS service
    ///
    /// # Arguments
    ///
    /// * `primary` - The provider tried first
    /// * `backup` - The provider used while the primary is failing
    /// * `failover_timeout` - How long to wait before retrying the primary
    pub fn new(
        primary: Box<dyn SmsService>,
        backup: Box<dyn SmsService>,
        failover_timeout: Duration,
    ) -> Self {
        info!(
            primary = primary.provider_name(),
            backup = backup.provider_name(),
            "Initializing failover SMS service"
        );

        Self {
            primary,
            backup,
            state: RwLock::new(FailoverState::default()),
            failover_timeout,
        }
    }

    /// Whether sends currently go to the backup provider
    pub async fn is_using_backup(&self) -> bool {
        self.state.read().await.using_backup
    }

    /// Consecutive primary failures since it last succeeded
    pub async fn primary_failure_count(&self) -> u32 {
        self.state.read().await.primary_failure_count
    }

    async fn should_try_primary(&self) -> bool {
        let state = self.state.read().await;
        if !state.using_backup {
            return true;
        }
        state
            .last_primary_failure
            .map_or(true, |failed_at| failed_at.elapsed() >= self.failover_timeout)
    }

    async fn record_primary_failure(&self) {
        let mut state = self.state.write().await;
        state.primary_failure_count += 1;
        state.last_primary_failure = Some(Instant::now());

        if !state.using_backup {
            warn!(
                primary = self.primary.provider_name(),
                backup = self.backup.provider_name(),
                "Primary SMS provider failed, switching to backup"
            );
            state.using_backup = true;
        }
    }

    async fn record_primary_success(&self) {
        let mut state = self.state.write().await;
        if state.using_backup {
            info!(
                primary = self.primary.provider_name(),
                "Primary SMS provider recovered"
            );
        }
        *state = FailoverState::default();
    }
}

#[async_trait]
impl SmsService for FailoverSmsService {
    async fn send_sms(&self, phone_number: &str, message: &str) -> Result<String, InfrastructureError> {
        if self.should_try_primary().await {
            match self.primary.send_sms(phone_number, message).await {
                Ok(message_id) => {
                    self.record_primary_success().await;
                    return Ok(message_id);
                }
                Err(e) => {
                    error!(
                        provider = self.primary.provider_name(),
                        error = %e,
                        "Primary SMS provider failed"
                    );
                    self.record_primary_failure().await;
                }
            }
        }

        self.backup
            .send_sms(phone_number, message)
            .await
            .map_err(|e| {
                error!(
                    provider = self.backup.provider_name(),
                    error = %e,
                    "Backup SMS provider failed"
                );
                InfrastructureError::Sms(format!(
                    "Both primary and backup SMS services failed. Primary: {}, Backup: {}",
                    self.primary.provider_name(),
                    self.backup.provider_name()
                ))
            })
    }

    fn provider_name(&self) -> &str {
        "Failover"
    }

    async fn is_available(&self) -> bool {
        self.primary.is_available().await || self.backup.is_available().await
    }
}
