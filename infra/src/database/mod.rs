//! Database module - user storage implementations
//!
//! The in-memory store keeps users for the lifetime of the process. It
//! implements the same `UserRepository` contract a persistent store would.

pub mod memory;


// Re-export commonly used types
pub use memory::InMemoryUserRepository;
