//! Administrator routes, guarded by `RequireRole::admin_only`

pub mod users;

pub use users::list_users;
