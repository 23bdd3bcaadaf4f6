//! Periodic sweep of expired verification codes
//!
//! Expiry is already enforced lazily whenever a phone's code is touched.
//! The sweep bounds memory for phones that request a code and never return.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::store::VerificationCodeStore;

/// Service for purging expired codes on a timer
pub struct VerificationCleanupService {
    store: Arc<VerificationCodeStore>,
    interval: Duration,
}

impl VerificationCleanupService {
    /// Create a new cleanup service
    pub fn new(store: Arc<VerificationCodeStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Run a single cleanup cycle, returning the number of purged codes
    pub async fn run_cleanup(&self) -> usize {
        let purged = self.store.sweep_expired().await;
        if purged > 0 {
            info!(purged = purged, event = "codes_swept", "Purged expired verification codes");
        } else {
            debug!(event = "codes_swept", "No expired verification codes to purge");
        }
        purged
    }

    /// Start the cleanup service as a background task
    ///
    /// This spawns a tokio task that runs cleanup at regular intervals.
    /// Returns `None` when the interval is zero, which disables the sweep.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if self.interval.is_zero() {
            warn!("Verification code sweep is disabled");
            return None;
        }

        Some(tokio::spawn(async move {
            info!(
                interval_seconds = self.interval.as_secs_f64(),
                "Verification code sweep started"
            );

            let mut interval_timer = tokio::time::interval(self.interval);
            loop {
                interval_timer.tick().await;
                self.run_cleanup().await;
            }
        }))
    }
}
