//! Main authentication service implementation

use chrono::Utc;
use sp_shared::utils::phone::mask_phone_number;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{ProfileFields, TokenPair, User};
use crate::domain::value_objects::LoginResult;
use crate::errors::{AuthError, DomainError, DomainResult, ValidationError};
use crate::repositories::UserRepository;
use crate::services::token::TokenService;
use crate::services::verification::{SendCodeResult, SmsServiceTrait, VerificationService};

/// Authentication service for managing the complete login flow
pub struct AuthService<U, S>
where
    U: UserRepository,
    S: SmsServiceTrait,
{
    /// User repository, the external user store
    user_repository: Arc<U>,
    /// Verification service for SMS code handling
    verification_service: Arc<VerificationService<S>>,
    /// Token service for JWT management
    token_service: Arc<TokenService>,
}

impl<U, S> AuthService<U, S>
where
    U: UserRepository,
    S: SmsServiceTrait,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `verification_service` - Service for SMS verification
    /// * `token_service` - Service for JWT token management
    pub fn new(
        user_repository: Arc<U>,
        verification_service: Arc<VerificationService<S>>,
        token_service: Arc<TokenService>,
    ) -> Self {
        Self {
            user_repository,
            verification_service,
            token_service,
        }
    }

    pub fn token_service(&self) -> Arc<TokenService> {
        Arc::clone(&self.token_service)
    }

    pub fn verification_service(&self) -> Arc<VerificationService<S>> {
        Arc::clone(&self.verification_service)
    }

    /// Send a verification code to a phone number
    ///
    /// # Returns
    ///
    /// * `Ok(SendCodeResult)` - The active code, its expiry and attempt budget
    /// * `Err(DomainError)` - Invalid phone format or delivery failure
    pub async fn send_verification_code(&self, phone: &str) -> DomainResult<SendCodeResult> {
        if phone.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "phone".to_string(),
            }
            .into());
        }

        self.verification_service.send_code(phone).await
    }

    /// Guesses left on the active code for `phone`
    pub async fn remaining_attempts(&self, phone: &str) -> u32 {
        self.verification_service.remaining_attempts(phone).await
    }

    /// Verify a code and log the user in, registering them on first login
    ///
    /// This method:
    /// 1. Verifies and consumes the code; verification errors propagate unchanged
    /// 2. Looks up the user by phone, creating a customer record if absent
    /// 3. Rejects accounts that are not active
    /// 4. Issues an access/refresh token pair
    /// 5. Records the login time, best-effort
    ///
    /// # Arguments
    ///
    /// * `phone` - Phone number the code was sent to
    /// * `code` - Code submitted by the user
    /// * `profile` - Optional fields stored when a new user is created
    pub async fn verify_and_login(
        &self,
        phone: &str,
        code: &str,
        profile: &ProfileFields,
    ) -> DomainResult<LoginResult> {
        if phone.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "phone".to_string(),
            }
            .into());
        }
        if code.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "code".to_string(),
            }
            .into());
        }

        // Step 1: consume the code
        self.verification_service.verify_code(phone, code).await?;

        // Step 2: resolve the user
        let existing = self
            .user_repository
            .find_by_phone(phone)
            .await
            .map_err(|e| store_failure("lookup", e))?;

        let (mut user, is_new_user) = match existing {
            Some(user) => (user, false),
            None => {
                let new_user = User::new_customer(phone.to_string(), profile);
                let created = self.user_repository.create(new_user).await.map_err(|e| {
                    tracing::error!(
                        phone = %mask_phone_number(phone),
                        error = %e,
                        event = "user_creation_failed",
                        "Failed to register user on first login"
                    );
                    AuthError::UserCreationFailed {
                        reason: e.to_string(),
                    }
                })?;

                tracing::info!(
                    user_id = %created.id,
                    phone = %mask_phone_number(phone),
                    event = "user_registered",
                    "New user registered"
                );
                (created, true)
            }
        };

        // Step 3: gate on account status
        if !user.is_active() {
            tracing::warn!(
                user_id = %user.id,
                status = ?user.status,
                event = "login_rejected",
                "Login rejected for inactive account"
            );
            return Err(AuthError::AccountSuspended.into());
        }

        // Step 4: issue tokens
        let tokens = self.token_service.issue_token_pair(&user)?;

        // Step 5: record the login
        let now = Utc::now();
        match self.user_repository.update_last_login(user.id, now).await {
            Ok(()) => user.update_last_login(now),
            Err(e) => tracing::warn!(
                user_id = %user.id,
                error = %e,
                event = "last_login_not_recorded",
                "Failed to record last login"
            ),
        }

        tracing::info!(
            user_id = %user.id,
            phone = %mask_phone_number(phone),
            is_new_user = is_new_user,
            event = "login_succeeded",
            "User logged in"
        );

        Ok(LoginResult::new(user, tokens, is_new_user))
    }

    /// Exchange a refresh token for a new token pair
    pub async fn refresh_tokens(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        if refresh_token.trim().is_empty() {
            return Err(ValidationError::RequiredField {
                field: "refresh_token".to_string(),
            }
            .into());
        }

        self.token_service.refresh_tokens(refresh_token)
    }

    /// Load the profile of `user_id`
    pub async fn get_profile(&self, user_id: Uuid) -> DomainResult<User> {
        self.user_repository
            .find_by_id(user_id)
            .await
            .map_err(|e| store_failure("lookup", e))?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }

    /// Apply the non-empty fields of `profile` to `user_id`
    ///
    /// Nothing is written when no field changes.
    pub async fn update_profile(&self, user_id: Uuid, profile: &ProfileFields) -> DomainResult<User> {
        let mut user = self.get_profile(user_id).await?;

        if !user.apply_profile(profile) {
            return Ok(user);
        }

        let updated = self.user_repository.update(user).await.map_err(|e| {
            tracing::error!(
                user_id = %user_id,
                error = %e,
                event = "profile_update_failed",
                "Failed to update profile"
            );
            AuthError::UpdateFailed {
                reason: e.to_string(),
            }
        })?;

        tracing::info!(user_id = %user_id, event = "profile_updated", "Profile updated");
        Ok(updated)
    }

    /// All registered users, for administrators
    pub async fn list_users(&self) -> DomainResult<Vec<User>> {
        self.user_repository
            .list()
            .await
            .map_err(|e| store_failure("list", e))
    }
}

fn store_failure(operation: &str, error: DomainError) -> DomainError {
    tracing::error!(
        operation = operation,
        error = %error,
        event = "user_store_failure",
        "User store failure"
    );
    AuthError::StoreFailure {
        reason: error.to_string(),
    }
    .into()
}
