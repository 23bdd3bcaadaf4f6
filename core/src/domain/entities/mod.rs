//! Domain entities representing core business objects.

pub mod token;
pub mod user;
pub mod verification_code;

// Re-export commonly used types
pub use token::{
    Claims, TokenKind, TokenPair, ACCESS_TOKEN_EXPIRY_MINUTES, JWT_AUDIENCE, JWT_ISSUER,
    REFRESH_TOKEN_EXPIRY_DAYS,
};
pub use user::{LoyaltyTier, ProfileFields, User, UserRole, UserStatus};
pub use verification_code::{
    VerificationCode, CODE_LENGTH, DEFAULT_EXPIRATION_MINUTES, MAX_ATTEMPTS,
};
