//! Authentication route handlers
//!
//! - Phone verification (sending codes and logging in with them)
//! - Token refresh

pub mod refresh;
pub mod send_sms;
pub mod verify_login;

pub use refresh::refresh;
pub use send_sms::send_sms;
pub use verify_login::verify_login;
