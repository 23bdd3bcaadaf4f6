pub mod auth;
pub mod cors;

pub use auth::{AuthContext, JwtAuth, OptionalAuth, RequireRole};
pub use cors::create_cors;
