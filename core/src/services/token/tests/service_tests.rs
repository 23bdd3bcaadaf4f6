//! Unit tests for token service

use chrono::Utc;

use crate::domain::entities::{ProfileFields, TokenKind, User, UserRole};
use crate::errors::{DomainError, TokenError};
use crate::services::token::{TokenService, TokenServiceConfig};

const SECRET: &str = "test-secret-key-for-token-service";

fn create_test_service() -> TokenService {
    TokenService::new(TokenServiceConfig::with_secret(SECRET))
}

fn service_with_access_ttl(seconds: i64) -> TokenService {
    TokenService::new(TokenServiceConfig {
        access_token_ttl_seconds: seconds,
        ..TokenServiceConfig::with_secret(SECRET)
    })
}

fn create_test_user() -> User {
    User::new_customer("+996700123456".to_string(), &ProfileFields::default())
}

fn assert_token_error(result: Result<impl std::fmt::Debug, DomainError>, expected: TokenError) {
    match result {
        Err(DomainError::Token(actual)) => assert_eq!(actual, expected),
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}

#[test]
fn test_access_token_round_trip() {
    let service = create_test_service();
    let user = create_test_user();

    let (token, issued) = service.issue_access_token(&user).unwrap();
    let claims = service.validate_token(&token).unwrap();

    assert_eq!(claims, issued);
    assert_eq!(claims.user_id, user.id);
    assert_eq!(claims.sub, user.id.to_string());
    assert_eq!(claims.phone, "+996700123456");
    assert_eq!(claims.role, UserRole::Customer);
    assert_eq!(claims.token_type, TokenKind::Access);
    assert_eq!(claims.iss, "skypark-api");
    assert_eq!(claims.aud, "skypark-app");
    assert_eq!(claims.exp - claims.iat, 15 * 60);
}

#[test]
fn test_refresh_token_round_trip() {
    let service = create_test_service();
    let user = create_test_user();

    let (token, _) = service.issue_refresh_token(&user).unwrap();
    let claims = service
        .validate_token_of_kind(&token, TokenKind::Refresh)
        .unwrap();

    assert_eq!(claims.token_type, TokenKind::Refresh);
    assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
}

#[test]
fn test_token_pair() {
    let service = create_test_service();
    let user = create_test_user();

    let pair = service.issue_token_pair(&user).unwrap();

    assert_ne!(pair.access_token, pair.refresh_token);
    assert_eq!(pair.access_expires_in, 900);
    assert!(pair.access_expires_at > Utc::now());
    assert!(pair.refresh_expires_at > pair.access_expires_at);
    assert!(service.validate_access_token(&pair.access_token).is_ok());
}

#[test]
fn test_kind_mismatch_is_rejected() {
    let service = create_test_service();
    let pair = service.issue_token_pair(&create_test_user()).unwrap();

    assert_token_error(
        service.validate_token_of_kind(&pair.refresh_token, TokenKind::Access),
        TokenError::InvalidToken,
    );
    assert_token_error(
        service.validate_token_of_kind(&pair.access_token, TokenKind::Refresh),
        TokenError::InvalidToken,
    );
}

#[test]
fn test_refresh_rotates_pair() {
    let service = create_test_service();
    let mut user = create_test_user();
    user.role = UserRole::Manager;
    let pair = service.issue_token_pair(&user).unwrap();

    let rotated = service.refresh_tokens(&pair.refresh_token).unwrap();
    let claims = service.validate_access_token(&rotated.access_token).unwrap();

    assert_eq!(claims.user_id, user.id);
    assert_eq!(claims.role, UserRole::Manager);
    assert!(service
        .validate_token_of_kind(&rotated.refresh_token, TokenKind::Refresh)
        .is_ok());
    // The old refresh token is not revoked
    assert!(service.refresh_tokens(&pair.refresh_token).is_ok());
}

#[test]
fn test_refresh_with_access_token_fails() {
    let service = create_test_service();
    let pair = service.issue_token_pair(&create_test_user()).unwrap();

    assert_token_error(
        service.refresh_tokens(&pair.access_token),
        TokenError::InvalidToken,
    );
}

#[test]
fn test_expired_beyond_leeway() {
    let service = service_with_access_ttl(-120);
    let (token, _) = service.issue_access_token(&create_test_user()).unwrap();

    assert_token_error(service.validate_token(&token), TokenError::ExpiredToken);
}

#[test]
fn test_expired_within_leeway() {
    let service = service_with_access_ttl(-10);
    let (token, _) = service.issue_access_token(&create_test_user()).unwrap();

    assert_token_error(service.validate_token(&token), TokenError::ExpiredToken);
}

#[test]
fn test_wrong_secret_is_rejected() {
    let service = create_test_service();
    let other = TokenService::new(TokenServiceConfig::with_secret("another-secret"));
    let (token, _) = other.issue_access_token(&create_test_user()).unwrap();

    assert_token_error(service.validate_token(&token), TokenError::InvalidToken);
}

#[test]
fn test_wrong_issuer_is_rejected() {
    let service = create_test_service();
    let other = TokenService::new(TokenServiceConfig {
        issuer: "someone-else".to_string(),
        ..TokenServiceConfig::with_secret(SECRET)
    });
    let (token, _) = other.issue_access_token(&create_test_user()).unwrap();

    assert_token_error(service.validate_token(&token), TokenError::InvalidToken);
}

#[test]
fn test_garbage_is_rejected() {
    let service = create_test_service();

    assert_token_error(service.validate_token("not-a-jwt"), TokenError::InvalidToken);
    assert_token_error(service.validate_token(""), TokenError::InvalidToken);
}

#[test]
fn test_out_of_range_ttl_does_not_panic() {
    let service = TokenService::new(TokenServiceConfig {
        access_token_ttl_seconds: i64::MAX,
        refresh_token_ttl_seconds: i64::MAX,
        ..TokenServiceConfig::with_secret(SECRET)
    });
    let user = create_test_user();

    let pair = service.issue_token_pair(&user).unwrap();
    assert!(pair.access_expires_at > Utc::now());
    assert!(pair.refresh_expires_at > Utc::now());
    assert!(service.validate_access_token(&pair.access_token).is_ok());
}
