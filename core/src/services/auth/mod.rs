//! Authentication service module
//!
//! Composes the verification code store, the token service and the user
//! store into the phone login flow:
//! code requested, code verified, user resolved, tokens issued.

mod service;


pub use service::AuthService;
