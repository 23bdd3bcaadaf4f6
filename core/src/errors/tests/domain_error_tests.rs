use crate::errors::{AuthError, DomainError, TokenError, ValidationError};

#[test]
fn test_auth_error_converts_into_domain_error() {
    let error: DomainError = AuthError::CodeExpired.into();
    assert!(matches!(error, DomainError::Auth(AuthError::CodeExpired)));
}

#[test]
fn test_token_error_converts_into_domain_error() {
    let error: DomainError = TokenError::ExpiredToken.into();
    assert!(matches!(error, DomainError::Token(TokenError::ExpiredToken)));
}

#[test]
fn test_transparent_display() {
    let error: DomainError = AuthError::CodeMismatch { remaining_attempts: 2 }.into();
    assert_eq!(
        error.to_string(),
        "Invalid verification code, 2 attempts remaining"
    );

    let error: DomainError = ValidationError::RequiredField {
        field: "phone".to_string(),
    }
    .into();
    assert_eq!(error.to_string(), "Required field: phone");
}

#[test]
fn test_verification_failures_are_distinguishable() {
    let verification = [
        AuthError::NoCodeFound,
        AuthError::CodeExpired,
        AuthError::AttemptsExceeded,
        AuthError::CodeMismatch { remaining_attempts: 1 },
    ];
    for error in verification {
        assert!(DomainError::from(error).is_verification_failure());
    }

    assert!(!DomainError::from(AuthError::AccountSuspended).is_verification_failure());
    assert!(!DomainError::from(TokenError::InvalidToken).is_verification_failure());
}
