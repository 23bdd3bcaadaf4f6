//! # Infrastructure Layer
//!
//! Concrete implementations of the collaborators the core depends on:
//!
//! - **SMS**: verification code delivery (console mock, failover wrapper)
//!   and the adapter exposing it through the core delivery trait
//! - **Database**: an in-memory user store implementing `UserRepository`

/// SMS service module - delivery providers
pub mod sms;

/// Database module - user storage
pub mod database;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// SMS service error
    #[error("SMS service error: {0}")]
    Sms(String),
}
