//! Types for verification service results

use chrono::{DateTime, Utc};

/// Result of sending a verification code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendCodeResult {
    /// Phone number the code is bound to
    pub phone: String,
    /// The active code
    pub code: String,
    /// When the active code stops being accepted
    pub expires_at: DateTime<Utc>,
    /// Guesses left against the active code
    pub remaining_attempts: u32,
    /// True when an existing code was returned instead of a new one
    pub reused: bool,
    /// Provider message id, present only when a message was dispatched
    pub message_id: Option<String>,
}
