//! Token service module for JWT management
//!
//! Stateless issuance and verification of access/refresh token pairs.
//! Nothing is persisted: validity is fully determined by the signature and
//! the embedded claims. Refresh rotation does not revoke the previous
//! refresh token, which stays usable until it expires.

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
