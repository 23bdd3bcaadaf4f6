use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use sp_core::domain::entities::{LoyaltyTier, ProfileFields, TokenPair, User, UserRole};
use sp_core::domain::value_objects::LoginResult;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SendSmsRequest {
    /// Phone number with the +996 prefix, e.g. "+996700123456"
    #[validate(length(min = 1, max = 20))]
    pub phone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendSmsResponse {
    pub phone: String,
    pub expires_at: DateTime<Utc>,
    pub remaining_attempts: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VerifyLoginRequest {
    #[validate(length(min = 1, max = 20))]
    pub phone: String,

    /// Numeric code received by SMS
    #[validate(length(min = 1, max = 10))]
    pub code: String,

    // Optional profile, stored only when this login registers the user
    #[serde(default, alias = "firstName")]
    #[validate(length(max = 100))]
    pub first_name: Option<String>,

    #[serde(default, alias = "lastName")]
    #[validate(length(max = 100))]
    pub last_name: Option<String>,

    #[serde(default)]
    #[validate(length(max = 255))]
    pub email: Option<String>,

    /// Birth date as YYYY-MM-DD
    #[serde(default, alias = "dateOfBirth")]
    pub date_of_birth: Option<String>,
}

impl VerifyLoginRequest {
    pub fn profile(&self) -> ProfileFields {
        ProfileFields {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            date_of_birth: self.date_of_birth.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[serde(alias = "refreshToken")]
    #[validate(length(min = 1))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    /// Access token lifetime in seconds
    pub expires_in: i64,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: TokenPair::TOKEN_TYPE.to_string(),
            expires_in: pair.access_expires_in,
        }
    }
}

/// User as returned by the login endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub phone: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: UserRole,
    pub loyalty_tier: LoyaltyTier,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            phone: user.phone.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            role: user.role,
            loyalty_tier: user.loyalty_tier,
            is_verified: user.is_phone_verified,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserSummary,
    pub tokens: TokenResponse,
    pub is_new_user: bool,
}

impl From<LoginResult> for LoginResponse {
    fn from(result: LoginResult) -> Self {
        Self {
            user: UserSummary::from(&result.user),
            tokens: result.tokens.into(),
            is_new_user: result.is_new_user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_verify_login_accepts_camel_case_profile() {
        let request: VerifyLoginRequest = serde_json::from_value(json!({
            "phone": "+996700123456",
            "code": "123456",
            "firstName": "Aida",
            "dateOfBirth": "2015-06-01"
        }))
        .unwrap();

        let profile = request.profile();
        assert_eq!(profile.first_name.as_deref(), Some("Aida"));
        assert_eq!(profile.date_of_birth.as_deref(), Some("2015-06-01"));
        assert!(profile.last_name.is_none());
    }

    #[test]
    fn test_refresh_request_aliases() {
        let snake: RefreshTokenRequest =
            serde_json::from_value(json!({"refresh_token": "abc"})).unwrap();
        let camel: RefreshTokenRequest =
            serde_json::from_value(json!({"refreshToken": "abc"})).unwrap();
        assert_eq!(snake.refresh_token, camel.refresh_token);
    }

    #[test]
    fn test_empty_code_fails_validation() {
        let request = VerifyLoginRequest {
            phone: "+996700123456".to_string(),
            code: String::new(),
            first_name: None,
            last_name: None,
            email: None,
            date_of_birth: None,
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("code"));
    }
}
