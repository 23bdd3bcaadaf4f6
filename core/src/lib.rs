//! # SkyPark Core
//!
//! Core business logic and domain layer for the SkyPark backend.
//! This crate contains the phone verification code lifecycle, token
//! issuance and validation, the login orchestration, repository interfaces,
//! and the error types shared by the outer layers.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
