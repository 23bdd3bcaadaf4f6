//! JWT token service implementation

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::entities::{Claims, TokenKind, TokenPair, User, UserRole};
use crate::errors::{DomainResult, TokenError};

use super::config::TokenServiceConfig;

/// Issues and validates signed access/refresh tokens
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Create a new token service
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = config.leeway_seconds;

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }

    /// Access token lifetime advertised to clients as `expires_in`
    pub fn access_token_ttl_seconds(&self) -> i64 {
        self.config.access_token_ttl_seconds
    }

    /// Issue an access token for `user`
    pub fn issue_access_token(&self, user: &User) -> DomainResult<(String, Claims)> {
        self.issue(user, TokenKind::Access)
    }

    /// Issue a refresh token for `user`
    pub fn issue_refresh_token(&self, user: &User) -> DomainResult<(String, Claims)> {
        self.issue(user, TokenKind::Refresh)
    }

    /// Issue a fresh access/refresh pair for `user`
    pub fn issue_token_pair(&self, user: &User) -> DomainResult<TokenPair> {
        let (access_token, access_claims) = self.issue_access_token(user)?;
        let (refresh_token, refresh_claims) = self.issue_refresh_token(user)?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_in: self.config.access_token_ttl_seconds,
            access_expires_at: expiry_of(&access_claims)?,
            refresh_expires_at: expiry_of(&refresh_claims)?,
        })
    }

    /// Verify signature, issuer, audience and expiry of `token`.
    ///
    /// The signature library tolerates a small clock skew on `exp`; claims
    /// are then checked against the current time with no leeway, so a token
    /// is never accepted past its expiry.
    pub fn validate_token(&self, token: &str) -> DomainResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::ExpiredToken,
                _ => {
                    debug!(error = %e, event = "token_rejected", "Token failed validation");
                    TokenError::InvalidToken
                }
            },
        )?;

        if token_data.claims.is_expired() {
            return Err(TokenError::ExpiredToken.into());
        }

        Ok(token_data.claims)
    }

    /// Validate `token` and require it to be of `kind`
    pub fn validate_token_of_kind(&self, token: &str, kind: TokenKind) -> DomainResult<Claims> {
        let claims = self.validate_token(token)?;
        if claims.token_type != kind {
            warn!(
                expected = kind.as_str(),
                actual = claims.token_type.as_str(),
                event = "token_kind_mismatch",
                "Token presented with the wrong kind"
            );
            return Err(TokenError::InvalidToken.into());
        }
        Ok(claims)
    }

    /// Validate an access token
    pub fn validate_access_token(&self, token: &str) -> DomainResult<Claims> {
        self.validate_token_of_kind(token, TokenKind::Access)
    }

    /// Exchange a refresh token for a new pair.
    ///
    /// The new pair carries the identity and role recorded in the old
    /// refresh token. The old token is not revoked.
    pub fn refresh_tokens(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        let claims = self.validate_token_of_kind(refresh_token, TokenKind::Refresh)?;

        let (access_token, access_claims) = self.sign(&self.claims_for(
            claims.user_id,
            &claims.phone,
            claims.role,
            TokenKind::Access,
        ))?;
        let (new_refresh, refresh_claims) = self.sign(&self.claims_for(
            claims.user_id,
            &claims.phone,
            claims.role,
            TokenKind::Refresh,
        ))?;

        debug!(user_id = %claims.user_id, event = "tokens_refreshed", "Token pair rotated");

        Ok(TokenPair {
            access_token,
            refresh_token: new_refresh,
            access_expires_in: self.config.access_token_ttl_seconds,
            access_expires_at: expiry_of(&access_claims)?,
            refresh_expires_at: expiry_of(&refresh_claims)?,
        })
    }

    fn claims_for(
        &self,
        user_id: Uuid,
        phone: &str,
        role: UserRole,
        kind: TokenKind,
    ) -> Claims {
        let ttl = match kind {
            TokenKind::Access => self.config.access_token_ttl(),
            TokenKind::Refresh => self.config.refresh_token_ttl(),
        };
        Claims::new(user_id, phone, role, kind, ttl)
            .with_issuer(&self.config.issuer, &self.config.audience)
    }

    fn issue(&self, user: &User, kind: TokenKind) -> DomainResult<(String, Claims)> {
        let claims = self.claims_for(user.id, &user.phone, user.role, kind);
        self.sign(&claims)
    }

    fn sign(&self, claims: &Claims) -> DomainResult<(String, Claims)> {
        let token = encode(&Header::new(self.config.algorithm), claims, &self.encoding_key)
            .map_err(|e| TokenError::TokenGenerationFailed {
                reason: e.to_string(),
            })?;
        Ok((token, claims.clone()))
    }
}

fn expiry_of(claims: &Claims) -> DomainResult<DateTime<Utc>> {
    claims.expires_at().ok_or_else(|| {
        TokenError::TokenGenerationFailed {
            reason: format!("expiry out of range: {}", claims.exp),
        }
        .into()
    })
}
