//! Result of a completed phone login.

use serde::{Deserialize, Serialize};

use crate::domain::entities::{TokenPair, User};

/// Outcome of `verify_and_login`: the resolved user and a fresh token pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResult {
    /// The logged in user, with `last_login_at` set when it could be recorded
    pub user: User,

    /// Newly issued access and refresh tokens
    pub tokens: TokenPair,

    /// Whether this login registered the user
    pub is_new_user: bool,
}

impl LoginResult {
    pub fn new(user: User, tokens: TokenPair, is_new_user: bool) -> Self {
        Self {
            user,
            tokens,
            is_new_user,
        }
    }
}
