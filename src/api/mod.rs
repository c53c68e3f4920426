//! HTTP API layer.
//!
//! - [`dto`] - request/response bodies
//! - [`handlers`] - endpoint handlers
//! - [`middleware`] - auth, CORS, rate limiting, tracing

pub mod dto;
pub mod handlers;
pub mod middleware;
