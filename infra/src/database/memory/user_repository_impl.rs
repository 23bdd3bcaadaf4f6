//! In-memory implementation of the UserRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use sp_core::domain::entities::user::User;
use sp_core::errors::DomainError;
use sp_core::repositories::UserRepository;

#[derive(Default)]
struct UserTable {
    by_id: HashMap<Uuid, User>,
    /// Phone number to user id; phones are unique
    phone_index: HashMap<String, Uuid>,
}

/// Process-local user store
///
/// Both maps sit behind one lock so the phone index never disagrees with
/// the rows it points at.
#[derive(Default)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.table.read().await.by_id.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_phone(&self, phone: &str) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table
            .phone_index
            .get(phone)
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.table.read().await.by_id.get(&id).cloned())
    }

    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut table = self.table.write().await;

        if table.phone_index.contains_key(&user.phone) {
            return Err(DomainError::Validation {
                message: "Phone number already registered".to_string(),
            });
        }
        if table.by_id.contains_key(&user.id) {
            return Err(DomainError::Internal {
                message: format!("User {} already exists", user.id),
            });
        }

        table.phone_index.insert(user.phone.clone(), user.id);
        table.by_id.insert(user.id, user.clone());

        tracing::debug!(user_id = %user.id, "User stored");
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, DomainError> {
        let mut table = self.table.write().await;

        let previous_phone = match table.by_id.get(&user.id) {
            Some(existing) => existing.phone.clone(),
            None => {
                return Err(DomainError::Internal {
                    message: format!("User {} not found", user.id),
                })
            }
        };

        if previous_phone != user.phone {
            if table.phone_index.contains_key(&user.phone) {
                return Err(DomainError::Validation {
                    message: "Phone number already registered".to_string(),
                });
            }
            table.phone_index.remove(&previous_phone);
            table.phone_index.insert(user.phone.clone(), user.id);
        }

        table.by_id.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), DomainError> {
        let mut table = self.table.write().await;
        match table.by_id.get_mut(&id) {
            Some(user) => {
                user.update_last_login(at);
                Ok(())
            }
            None => Err(DomainError::Internal {
                message: format!("User {} not found", id),
            }),
        }
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let table = self.table.read().await;
        let mut users: Vec<User> = table.by_id.values().cloned().collect();
        users.sort_by_key(|user| user.created_at);
        Ok(users)
    }
}
