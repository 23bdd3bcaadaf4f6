//! User repository trait defining the interface for user data persistence

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// Implementations are external collaborators of the login flow and may be
/// slow or fail. "Not found" is reported as `Ok(None)`, never as an error.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by phone number
    ///
    /// # Arguments
    /// * `phone` - Phone number with country code
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with this phone
    /// * `Err(DomainError)` - Store failure
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Create a new user, rejecting duplicate phone numbers
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Replace an existing user record
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Record the time of a successful login
    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), DomainError>;

    /// All users, oldest first
    async fn list(&self) -> Result<Vec<User>, DomainError>;
}
