//! User entity representing a park visitor or staff member.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Date format accepted for birth dates
pub const BIRTH_DATE_FORMAT: &str = "%Y-%m-%d";

/// Role of a user in the system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Parent booking visits
    Customer,
    /// Park staff scanning tickets
    Staff,
    /// Park manager
    Manager,
    /// Platform administrator
    Admin,
    /// Administrator with unrestricted access
    SuperAdmin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Staff => "staff",
            UserRole::Manager => "manager",
            UserRole::Admin => "admin",
            UserRole::SuperAdmin => "super_admin",
        }
    }

    /// Roles allowed on administrator routes
    pub const ADMINS: [UserRole; 2] = [UserRole::Admin, UserRole::SuperAdmin];

    /// Roles allowed on management routes
    pub const MANAGERS: [UserRole; 3] = [UserRole::Manager, UserRole::Admin, UserRole::SuperAdmin];
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(UserRole::Customer),
            "staff" => Ok(UserRole::Staff),
            "manager" => Ok(UserRole::Manager),
            "admin" => Ok(UserRole::Admin),
            "super_admin" => Ok(UserRole::SuperAdmin),
            _ => Err(format!("Unknown role: {}", s)),
        }
    }
}

/// Account status gating login
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
    Pending,
}

/// Loyalty programme tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoyaltyTier {
    Beginner,
    Friend,
    Vip,
}

/// Optional profile fields supplied at registration or on profile update.
///
/// Empty strings are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileFields {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// Birth date as `YYYY-MM-DD`; unparseable values are ignored
    pub date_of_birth: Option<String>,
}

impl ProfileFields {
    fn non_empty(value: &Option<String>) -> Option<String> {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    /// Parsed birth date, if one was supplied in the expected format
    pub fn birth_date(&self) -> Option<NaiveDate> {
        Self::non_empty(&self.date_of_birth)
            .and_then(|raw| NaiveDate::parse_from_str(&raw, BIRTH_DATE_FORMAT).ok())
    }
}

/// User entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Phone number with country code, unique per user
    pub phone: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub role: UserRole,
    pub status: UserStatus,
    pub is_phone_verified: bool,
    pub loyalty_tier: LoyaltyTier,
    pub loyalty_points: i64,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates the record for a phone that just completed its first login.
    ///
    /// The phone is marked verified because the caller has already proven
    /// possession of it with a verification code.
    pub fn new_customer(phone: String, profile: &ProfileFields) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            phone,
            first_name: ProfileFields::non_empty(&profile.first_name),
            last_name: ProfileFields::non_empty(&profile.last_name),
            email: ProfileFields::non_empty(&profile.email),
            date_of_birth: profile.birth_date(),
            role: UserRole::Customer,
            status: UserStatus::Active,
            is_phone_verified: true,
            loyalty_tier: LoyaltyTier::Beginner,
            loyalty_points: 0,
            last_login_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Only active accounts may log in
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    pub fn update_last_login(&mut self, at: DateTime<Utc>) {
        self.last_login_at = Some(at);
    }

    /// Applies the supplied non-empty fields, returning whether anything changed
    pub fn apply_profile(&mut self, profile: &ProfileFields) -> bool {
        let mut changed = false;

        if let Some(first_name) = ProfileFields::non_empty(&profile.first_name) {
            self.first_name = Some(first_name);
            changed = true;
        }
        if let Some(last_name) = ProfileFields::non_empty(&profile.last_name) {
            self.last_name = Some(last_name);
            changed = true;
        }
        if let Some(email) = ProfileFields::non_empty(&profile.email) {
            self.email = Some(email);
            changed = true;
        }
        if let Some(date_of_birth) = profile.birth_date() {
            self.date_of_birth = Some(date_of_birth);
            changed = true;
        }

        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_customer_defaults() {
        let user = User::new_customer("+996700123456".to_string(), &ProfileFields::default());

        assert_eq!(user.role, UserRole::Customer);
        assert_eq!(user.status, UserStatus::Active);
        assert_eq!(user.loyalty_tier, LoyaltyTier::Beginner);
        assert_eq!(user.loyalty_points, 0);
        assert!(user.is_phone_verified);
        assert!(user.is_active());
        assert!(user.last_login_at.is_none());
    }

    #[test]
    fn test_new_customer_with_profile() {
        let profile = ProfileFields {
            first_name: Some("Aida".to_string()),
            last_name: Some("  ".to_string()),
            email: Some("aida@example.kg".to_string()),
            date_of_birth: Some("2015-04-09".to_string()),
        };
        let user = User::new_customer("+996700123456".to_string(), &profile);

        assert_eq!(user.first_name.as_deref(), Some("Aida"));
        assert!(user.last_name.is_none());
        assert_eq!(user.email.as_deref(), Some("aida@example.kg"));
        assert_eq!(user.date_of_birth, NaiveDate::from_ymd_opt(2015, 4, 9));
    }

    #[test]
    fn test_invalid_birth_date_is_ignored() {
        let profile = ProfileFields {
            date_of_birth: Some("09.04.2015".to_string()),
            ..Default::default()
        };
        assert!(profile.birth_date().is_none());
    }

    #[test]
    fn test_apply_profile_skips_empty_fields() {
        let mut user = User::new_customer("+996700123456".to_string(), &ProfileFields::default());
        user.first_name = Some("Old".to_string());

        let changed = user.apply_profile(&ProfileFields {
            first_name: Some(String::new()),
            last_name: Some("Asanova".to_string()),
            ..Default::default()
        });

        assert!(changed);
        assert_eq!(user.first_name.as_deref(), Some("Old"));
        assert_eq!(user.last_name.as_deref(), Some("Asanova"));
        assert!(!user.apply_profile(&ProfileFields::default()));
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&UserRole::SuperAdmin).unwrap(), "\"super_admin\"");
        assert_eq!("manager".parse::<UserRole>(), Ok(UserRole::Manager));
        assert!("root".parse::<UserRole>().is_err());
        assert_eq!(serde_json::to_string(&UserStatus::Suspended).unwrap(), "\"suspended\"");
        assert_eq!(serde_json::to_string(&LoyaltyTier::Vip).unwrap(), "\"vip\"");
    }
}
