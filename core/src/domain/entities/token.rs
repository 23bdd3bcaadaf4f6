//! Token entities for JWT-based authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserRole;
use crate::domain::clock;

/// Access token expiration time (15 minutes)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 15;

/// Refresh token expiration time (7 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 7;

/// JWT issuer
pub const JWT_ISSUER: &str = "skypark-api";

/// JWT audience
pub const JWT_AUDIENCE: &str = "skypark-app";

/// Kind of a token. Fixed at issuance; an access token is never accepted
/// where a refresh token is required and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

/// Claims structure for JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// User ID
    pub user_id: Uuid,

    /// Phone number the user logged in with
    pub phone: String,

    /// Role at issuance time
    pub role: UserRole,

    /// Access or refresh
    #[serde(rename = "type")]
    pub token_type: TokenKind,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,
}

impl Claims {
    /// Creates new claims valid from now for `ttl`
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user's UUID
    /// * `phone` - The user's phone number
    /// * `role` - The user's role
    /// * `kind` - Access or refresh
    /// * `ttl` - Lifetime of the token
    pub fn new(
        user_id: Uuid,
        phone: impl Into<String>,
        role: UserRole,
        kind: TokenKind,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();
        let expiry = clock::expiry_after(now, ttl);

        Self {
            sub: user_id.to_string(),
            user_id,
            phone: phone.into(),
            role,
            token_type: kind,
            iat: now.timestamp(),
            exp: expiry.timestamp(),
            nbf: now.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
        }
    }

    /// Overrides issuer and audience
    pub fn with_issuer(mut self, issuer: &str, audience: &str) -> Self {
        self.iss = issuer.to_string();
        self.aud = audience.to_string();
        self
    }

    /// Checks if the claims have expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }

    pub fn is_access(&self) -> bool {
        self.token_type == TokenKind::Access
    }

    pub fn is_refresh(&self) -> bool {
        self.token_type == TokenKind::Refresh
    }

    /// Expiration as a timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }
}

/// Freshly issued access and refresh tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// JWT access token
    pub access_token: String,

    /// JWT refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Access token expiration time
    pub access_expires_at: DateTime<Utc>,

    /// Refresh token expiration time
    pub refresh_expires_at: DateTime<Utc>,
}

impl TokenPair {
    /// Scheme clients must use in the Authorization header
    pub const TOKEN_TYPE: &'static str = "Bearer";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_claims() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(
            user_id,
            "+996700123456",
            UserRole::Customer,
            TokenKind::Access,
            Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES),
        );

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
        assert_eq!(claims.nbf, claims.iat);
        assert_eq!(claims.iss, JWT_ISSUER);
        assert!(claims.is_access());
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_kind_is_serialized_as_type() {
        let claims = Claims::new(
            Uuid::new_v4(),
            "+996700123456",
            UserRole::Admin,
            TokenKind::Refresh,
            Duration::days(REFRESH_TOKEN_EXPIRY_DAYS),
        );
        let value = serde_json::to_value(&claims).unwrap();

        assert_eq!(value["type"], "refresh");
        assert_eq!(value["role"], "admin");
        assert!(value.get("token_type").is_none());
    }

    #[test]
    fn test_expired_claims() {
        let claims = Claims::new(
            Uuid::new_v4(),
            "+996700123456",
            UserRole::Customer,
            TokenKind::Access,
            Duration::seconds(-1),
        );
        assert!(claims.is_expired());
    }
}
