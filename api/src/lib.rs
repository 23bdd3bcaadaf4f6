//! # SkyPark API
//!
//! actix-web adapter over the core login flow: request DTOs, route
//! handlers, Bearer token middleware and the mapping of domain errors to
//! stable client error codes.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{configure, AppState, DefaultAppState};
pub use handlers::error::ApiError;
