use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use sp_core::domain::entities::{LoyaltyTier, ProfileFields, User, UserRole, UserStatus};

/// Full profile of the authenticated user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfileResponse {
    pub id: Uuid,
    pub phone: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub role: UserRole,
    pub status: UserStatus,
    pub loyalty_tier: LoyaltyTier,
    pub loyalty_points: i64,
    pub is_verified: bool,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfileResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            phone: user.phone,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            date_of_birth: user.date_of_birth,
            role: user.role,
            status: user.status,
            loyalty_tier: user.loyalty_tier,
            loyalty_points: user.loyalty_points,
            is_verified: user.is_phone_verified,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Partial profile update; absent and empty fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[serde(default, alias = "firstName")]
    #[validate(length(max = 100))]
    pub first_name: Option<String>,

    #[serde(default, alias = "lastName")]
    #[validate(length(max = 100))]
    pub last_name: Option<String>,

    #[serde(default)]
    #[validate(length(max = 255))]
    pub email: Option<String>,

    #[serde(default, alias = "dateOfBirth")]
    pub date_of_birth: Option<String>,
}

impl From<UpdateProfileRequest> for ProfileFields {
    fn from(request: UpdateProfileRequest) -> Self {
        Self {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            date_of_birth: request.date_of_birth,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<UserProfileResponse>,
    pub total: usize,
}

impl From<Vec<User>> for UserListResponse {
    fn from(users: Vec<User>) -> Self {
        let users: Vec<UserProfileResponse> = users.into_iter().map(Into::into).collect();
        Self {
            total: users.len(),
            users,
        }
    }
}
