//! Middleware and extractors for the Web API.

mod auth;
mod cors;

pub use auth::{session_token, OptionalSessionUser, SessionUser};
pub use cors::create_cors_layer;
