//! Application layer containing the service implementations.
//!
//! Orchestrates domain logic over the repository and cache abstractions.

pub mod services;
