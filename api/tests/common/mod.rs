//! Shared setup for the HTTP tests
#![allow(dead_code)]

use actix_web::web;
use std::sync::Arc;

use sp_api::AppState;
use sp_core::domain::entities::{ProfileFields, User, UserRole, UserStatus};
use sp_core::repositories::UserRepository;
use sp_core::services::token::{TokenService, TokenServiceConfig};
use sp_core::services::verification::mock::MockSmsService;
use sp_core::services::{AuthService, VerificationService, VerificationServiceConfig};
use sp_infra::database::InMemoryUserRepository;

pub const PHONE: &str = "+996700123456";
pub const SECRET: &str = "api-test-secret";

pub type TestState = AppState<InMemoryUserRepository, MockSmsService>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub sms: Arc<MockSmsService>,
    pub users: Arc<InMemoryUserRepository>,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_verification(VerificationServiceConfig::default())
    }

    pub fn with_verification(config: VerificationServiceConfig) -> Self {
        Self::build(Arc::new(MockSmsService::new()), config)
    }

    /// Every SMS delivery fails
    pub fn with_failing_sms() -> Self {
        Self::build(
            Arc::new(MockSmsService::failing()),
            VerificationServiceConfig::default(),
        )
    }

    fn build(sms: Arc<MockSmsService>, config: VerificationServiceConfig) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let verification = Arc::new(VerificationService::new(Arc::clone(&sms), config));
        let tokens = Arc::new(TokenService::new(TokenServiceConfig::with_secret(SECRET)));
        let auth = AuthService::new(Arc::clone(&users), verification, tokens);

        Self {
            state: web::Data::new(AppState::new(Arc::new(auth))),
            sms,
            users,
        }
    }

    /// Store a user directly, bypassing the login flow
    pub async fn insert_user(&self, phone: &str, role: UserRole, status: UserStatus) -> User {
        let mut user = User::new_customer(phone.to_string(), &ProfileFields::default());
        user.role = role;
        user.status = status;
        self.users.create(user).await.unwrap()
    }

    pub fn access_token_for(&self, user: &User) -> String {
        self.state.token_service().issue_access_token(user).unwrap().0
    }

    pub fn refresh_token_for(&self, user: &User) -> String {
        self.state.token_service().issue_refresh_token(user).unwrap().0
    }

    /// Access token that expired two minutes ago
    pub fn expired_access_token_for(&self, user: &User) -> String {
        let config = TokenServiceConfig {
            access_token_ttl_seconds: -120,
            ..TokenServiceConfig::with_secret(SECRET)
        };
        TokenService::new(config).issue_access_token(user).unwrap().0
    }

    /// The last code delivered to `phone`
    pub async fn code_for(&self, phone: &str) -> String {
        self.sms.last_code_for(phone).await.unwrap()
    }
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}
