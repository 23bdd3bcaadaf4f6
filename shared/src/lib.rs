//! Shared utilities and common types for the SkyPark server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The JSON response envelope
//! - Phone number validation and masking

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, Environment, JwtConfig, LogFormat, LoggingConfig, ServerConfig,
    SmsConfig, VerificationConfig,
};
pub use types::{ApiResponse, ErrorBody};
pub use utils::phone;
