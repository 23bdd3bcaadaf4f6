//! Repository interfaces for the external user store.

pub mod user;

pub use user::{MockUserRepository, UserRepository};
