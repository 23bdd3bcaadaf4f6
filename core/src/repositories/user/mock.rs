//! Mock implementation of UserRepository for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::trait_::UserRepository;

/// Mock user repository for testing
///
/// Each store operation can be switched to fail so callers can exercise
/// their error paths.
#[derive(Default)]
pub struct MockUserRepository {
    users: Arc<RwLock<Vec<User>>>,
    fail_lookup: AtomicBool,
    fail_create: AtomicBool,
    fail_update: AtomicBool,
    fail_last_login: AtomicBool,
}

impl MockUserRepository {
    /// Create a new mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository seeded with one user
    pub fn with_existing_user(user: User) -> Self {
        Self {
            users: Arc::new(RwLock::new(vec![user])),
            ..Self::default()
        }
    }

    pub fn set_fail_lookup(&self, fail: bool) {
        self.fail_lookup.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_create(&self, fail: bool) {
        self.fail_create.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_update(&self, fail: bool) {
        self.fail_update.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_last_login(&self, fail: bool) {
        self.fail_last_login.store(fail, Ordering::SeqCst);
    }

    /// Number of stored users
    pub async fn count(&self) -> usize {
        self.users.read().await.len()
    }

    fn failure(flag: &AtomicBool, operation: &str) -> Result<(), DomainError> {
        if flag.load(Ordering::SeqCst) {
            return Err(DomainError::Internal {
                message: format!("simulated {} failure", operation),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        Self::failure(&self.fail_lookup, "lookup")?;
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.phone == phone).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Self::failure(&self.fail_lookup, "lookup")?;
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        Self::failure(&self.fail_create, "create")?;
        let mut users = self.users.write().await;

        if users.iter().any(|u| u.phone == user.phone) {
            return Err(DomainError::Validation {
                message: "Phone number already registered".to_string(),
            });
        }

        users.push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        Self::failure(&self.fail_update, "update")?;
        let mut users = self.users.write().await;

        match users.iter_mut().find(|u| u.id == user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user)
            }
            None => Err(DomainError::Internal {
                message: format!("user {} does not exist", user.id),
            }),
        }
    }

    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), DomainError> {
        Self::failure(&self.fail_last_login, "last login")?;
        let mut users = self.users.write().await;
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.update_last_login(at);
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        Self::failure(&self.fail_lookup, "lookup")?;
        Ok(self.users.read().await.clone())
    }
}
