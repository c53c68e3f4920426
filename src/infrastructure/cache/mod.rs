//! Expiring key/value store holding guest mappings and visit counters.
//!
//! Provides a [`GuestStore`] trait with two implementations:
//! - [`RedisGuestStore`] - Production Redis-backed store
//! - [`MemoryGuestStore`] - In-process fallback for development and tests

mod memory_store;
mod redis_store;
mod service;

pub use memory_store::MemoryGuestStore;
pub use redis_store::RedisGuestStore;
pub use service::{CacheError, CacheResult, GuestStore};

#[cfg(test)]
pub use service::MockGuestStore;
