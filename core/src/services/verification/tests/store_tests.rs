use std::sync::Arc;
use std::time::Duration;

use crate::errors::AuthError;
use crate::services::verification::{IssuedCode, VerificationCodeStore, VerificationServiceConfig};

const PHONE: &str = "+996700123456";

fn store_with_ttl(code_ttl_seconds: i64) -> VerificationCodeStore {
    VerificationCodeStore::new(VerificationServiceConfig {
        code_ttl_seconds,
        ..Default::default()
    })
}

fn wrong_code(code: &str) -> String {
    if code == "000000" { "111111".to_string() } else { "000000".to_string() }
}

#[tokio::test]
async fn test_issue_creates_fresh_code() {
    let store = VerificationCodeStore::default();

    let issued = store.issue_or_reuse(PHONE).await;
    assert!(issued.is_fresh());
    assert_eq!(issued.code().code.len(), 6);
    assert_eq!(issued.code().attempts, 0);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_resend_within_ttl_returns_same_code_and_expiry() {
    let store = VerificationCodeStore::default();

    let first = store.issue_or_reuse(PHONE).await;
    let second = store.issue_or_reuse(PHONE).await;

    assert!(matches!(second, IssuedCode::Reused(_)));
    assert_eq!(first.code().code, second.code().code);
    assert_eq!(first.code().expires_at, second.code().expires_at);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_resend_after_mismatch_keeps_attempt_count() {
    let store = VerificationCodeStore::default();
    let code = store.issue_or_reuse(PHONE).await.code().code.clone();

    let _ = store.verify(PHONE, &wrong_code(&code)).await;
    let reused = store.issue_or_reuse(PHONE).await;

    assert!(!reused.is_fresh());
    assert_eq!(reused.code().attempts, 1);
}

#[tokio::test]
async fn test_resend_after_expiry_generates_new_record() {
    let store = store_with_ttl(0);
    let first = store.issue_or_reuse(PHONE).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    let second = store.issue_or_reuse(PHONE).await;
    assert!(second.is_fresh());
    assert!(second.code().created_at > first.code().created_at);
}

#[tokio::test]
async fn test_resend_after_exhausted_attempts_generates_new_record() {
    let store = VerificationCodeStore::default();
    let code = store.issue_or_reuse(PHONE).await.code().code.clone();
    let wrong = wrong_code(&code);

    for _ in 0..3 {
        let _ = store.verify(PHONE, &wrong).await;
    }

    let issued = store.issue_or_reuse(PHONE).await;
    assert!(issued.is_fresh());
    assert_eq!(issued.code().attempts, 0);
}

#[tokio::test]
async fn test_verify_success_is_single_use() {
    let store = VerificationCodeStore::default();
    let code = store.issue_or_reuse(PHONE).await.code().code.clone();

    assert_eq!(store.verify(PHONE, &code).await, Ok(()));
    assert_eq!(store.verify(PHONE, &code).await, Err(AuthError::NoCodeFound));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_verify_without_code() {
    let store = VerificationCodeStore::default();
    assert_eq!(store.verify(PHONE, "123456").await, Err(AuthError::NoCodeFound));
}

#[tokio::test]
async fn test_verify_expired_code_purges_record() {
    let store = store_with_ttl(0);
    let code = store.issue_or_reuse(PHONE).await.code().code.clone();
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(store.verify(PHONE, &code).await, Err(AuthError::CodeExpired));
    assert_eq!(store.verify(PHONE, &code).await, Err(AuthError::NoCodeFound));
}

#[tokio::test]
async fn test_three_mismatches_then_attempts_exceeded() {
    let store = VerificationCodeStore::default();
    let code = store.issue_or_reuse(PHONE).await.code().code.clone();
    let wrong = wrong_code(&code);

    assert_eq!(
        store.verify(PHONE, &wrong).await,
        Err(AuthError::CodeMismatch { remaining_attempts: 2 })
    );
    assert_eq!(
        store.verify(PHONE, &wrong).await,
        Err(AuthError::CodeMismatch { remaining_attempts: 1 })
    );
    assert_eq!(
        store.verify(PHONE, &wrong).await,
        Err(AuthError::CodeMismatch { remaining_attempts: 0 })
    );

    // Fourth call fails even with the right code, and purges the record
    assert_eq!(store.verify(PHONE, &code).await, Err(AuthError::AttemptsExceeded));
    assert_eq!(store.verify(PHONE, &code).await, Err(AuthError::NoCodeFound));
}

#[tokio::test]
async fn test_correct_code_after_mismatch() {
    let store = VerificationCodeStore::default();
    let code = store.issue_or_reuse(PHONE).await.code().code.clone();

    assert!(store.verify(PHONE, &wrong_code(&code)).await.is_err());
    assert_eq!(store.verify(PHONE, &code).await, Ok(()));
}

#[tokio::test]
async fn test_remaining_attempts() {
    let store = VerificationCodeStore::default();
    assert_eq!(store.remaining_attempts(PHONE).await, 3);

    let code = store.issue_or_reuse(PHONE).await.code().code.clone();
    assert_eq!(store.remaining_attempts(PHONE).await, 3);

    let _ = store.verify(PHONE, &wrong_code(&code)).await;
    assert_eq!(store.remaining_attempts(PHONE).await, 2);

    store.verify(PHONE, &code).await.unwrap();
    assert_eq!(store.remaining_attempts(PHONE).await, 3);
}

#[tokio::test]
async fn test_discard_only_removes_matching_code() {
    let store = VerificationCodeStore::default();
    let code = store.issue_or_reuse(PHONE).await.code().code.clone();

    assert!(!store.discard(PHONE, &wrong_code(&code)).await);
    assert_eq!(store.len().await, 1);
    assert!(store.discard(PHONE, &code).await);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_sweep_expired_removes_only_expired() {
    let short = store_with_ttl(0);
    short.issue_or_reuse(PHONE).await;
    short.issue_or_reuse("+996555123456").await;
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(short.sweep_expired().await, 2);
    assert!(short.is_empty().await);

    let long = VerificationCodeStore::default();
    long.issue_or_reuse(PHONE).await;
    assert_eq!(long.sweep_expired().await, 0);
    assert_eq!(long.len().await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_guesses_never_exceed_budget() {
    let store = Arc::new(VerificationCodeStore::default());
    let code = store.issue_or_reuse(PHONE).await.code().code.clone();
    let wrong = wrong_code(&code);

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let store = Arc::clone(&store);
            let wrong = wrong.clone();
            tokio::spawn(async move { store.verify(PHONE, &wrong).await })
        })
        .collect();

    let mut mismatches = 0;
    for handle in handles {
        if let Err(AuthError::CodeMismatch { .. }) = handle.await.unwrap() {
            mismatches += 1;
        }
    }

    assert_eq!(mismatches, 3);
    assert!(store.is_empty().await);
}
