use std::sync::Arc;
use std::time::Duration;

use crate::services::verification::{
    VerificationCleanupService, VerificationCodeStore, VerificationServiceConfig,
};

fn expiring_store() -> Arc<VerificationCodeStore> {
    Arc::new(VerificationCodeStore::new(VerificationServiceConfig {
        code_ttl_seconds: 0,
        ..Default::default()
    }))
}

#[tokio::test]
async fn test_run_cleanup_purges_expired_codes() {
    let store = expiring_store();
    store.issue_or_reuse("+996700123456").await;
    store.issue_or_reuse("+996555123456").await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    let cleanup = VerificationCleanupService::new(Arc::clone(&store), Duration::from_secs(60));
    assert_eq!(cleanup.run_cleanup().await, 2);
    assert_eq!(cleanup.run_cleanup().await, 0);
}

#[tokio::test]
async fn test_background_task_sweeps_periodically() {
    let store = expiring_store();
    store.issue_or_reuse("+996700123456").await;

    let cleanup = Arc::new(VerificationCleanupService::new(
        Arc::clone(&store),
        Duration::from_millis(10),
    ));
    let handle = cleanup.start_background_task().expect("sweep enabled");

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(store.is_empty().await);
    handle.abort();
}

#[tokio::test]
async fn test_zero_interval_disables_sweep() {
    let cleanup = Arc::new(VerificationCleanupService::new(
        expiring_store(),
        Duration::ZERO,
    ));
    assert!(cleanup.start_background_task().is_none());
}
