//! HTTP middleware.
//!
//! - [`auth`] - Bearer token authentication (required and optional)
//! - [`cors`] - CORS policy for browser clients
//! - [`rate_limit`] - process-wide token bucket
//! - [`tracing`] - request/response logging

pub mod auth;
pub mod cors;
pub mod rate_limit;
pub mod tracing;
