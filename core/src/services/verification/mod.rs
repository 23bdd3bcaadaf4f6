//! Verification service module for SMS-based authentication
//!
//! This module owns the phone verification code lifecycle:
//! - Code generation with idempotent resend
//! - Single-use verification with attempt tracking
//! - Lazy expiry on access plus a periodic sweep
//! - Delivery through a pluggable SMS collaborator

mod cleanup;
mod config;
pub mod mock;
mod service;
mod store;
mod traits;
mod types;

#[cfg(test)]
mod tests;

pub use cleanup::VerificationCleanupService;
pub use config::VerificationServiceConfig;
pub use service::VerificationService;
pub use store::{IssuedCode, VerificationCodeStore};
pub use traits::SmsServiceTrait;
pub use types::SendCodeResult;
