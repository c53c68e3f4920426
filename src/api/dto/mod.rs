//! Request and response DTOs for the HTTP surface.

pub mod auth;
pub mod create;
pub mod health;
pub mod urls;
