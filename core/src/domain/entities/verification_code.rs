//! Verification code entity for SMS-based authentication.

use chrono::{DateTime, Duration, Utc};
use constant_time_eq::constant_time_eq;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::clock;

/// Maximum number of verification attempts allowed
pub const MAX_ATTEMPTS: u32 = 3;

/// Length of the verification code
pub const CODE_LENGTH: usize = 6;

/// Default expiration time for verification codes (5 minutes)
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 5;

/// A single-use numeric code bound to one phone number
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationCode {
    /// Phone number this code was sent to (with country code)
    pub phone: String,

    /// The numeric verification code
    pub code: String,

    /// Number of verification attempts made
    pub attempts: u32,

    /// Timestamp when the code was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the code expires
    pub expires_at: DateTime<Utc>,
}

impl VerificationCode {
    /// Creates a new verification code with the default length and lifetime
    pub fn new(phone: String) -> Self {
        Self::with_settings(
            phone,
            CODE_LENGTH,
            Duration::minutes(DEFAULT_EXPIRATION_MINUTES),
        )
    }

    /// Creates a new verification code with a custom length and lifetime
    ///
    /// # Arguments
    ///
    /// * `phone` - The phone number the code belongs to
    /// * `length` - Number of digits to generate
    /// * `ttl` - How long the code stays valid
    pub fn with_settings(phone: String, length: usize, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            phone,
            code: Self::generate_code(length),
            attempts: 0,
            created_at: now,
            expires_at: clock::expiry_after(now, ttl),
        }
    }

    /// Generates a random numeric code of the given length.
    ///
    /// Digits are drawn from the thread-local CSPRNG, so leading zeros are
    /// as likely as any other digit.
    pub fn generate_code(length: usize) -> String {
        let mut rng = rand::thread_rng();
        (0..length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }

    /// Checks if the verification code has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Checks expiry against a fixed instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    /// Whether another guess is still allowed against this code
    pub fn has_attempts_left(&self, max_attempts: u32) -> bool {
        self.attempts < max_attempts
    }

    /// Records a guess and returns the post-increment attempt count
    pub fn record_attempt(&mut self) -> u32 {
        self.attempts = self.attempts.saturating_add(1);
        self.attempts
    }

    /// Exact comparison of a candidate code, in constant time
    pub fn matches(&self, candidate: &str) -> bool {
        constant_time_eq(self.code.as_bytes(), candidate.as_bytes())
    }

    /// Gets the number of remaining attempts
    pub fn remaining_attempts(&self, max_attempts: u32) -> u32 {
        max_attempts.saturating_sub(self.attempts)
    }
}
