//! Infrastructure layer for external integrations.
//!
//! Implements the interfaces defined by the domain layer:
//!
//! - [`cache`] - Guest store abstractions (Redis and in-memory)
//! - [`persistence`] - PostgreSQL repository implementations

pub mod cache;
pub mod persistence;
