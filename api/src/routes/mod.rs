//! HTTP route handlers grouped by audience

pub mod admin;
pub mod auth;
pub mod user;
