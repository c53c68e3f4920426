//! Guest store trait and cache error types.

use async_trait::async_trait;
use std::time::Duration;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),

    #[error("Cache operation error: {0}")]
    Operation(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// TTL-capable key/value store holding guest URL mappings and their
/// visit counters.
///
/// Three logical namespaces, mirrored by every implementation:
/// a forward entry (code to URL), a reverse entry (URL to code, used to
/// dedup repeat submissions of the same URL), and a visit counter per code.
/// Forward and reverse entries expire together after the configured TTL;
/// counters do not expire.
///
/// Unlike a read-through cache, failures here are real failures: guest
/// mappings exist nowhere else, so errors propagate instead of degrading.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisGuestStore`] - Redis-backed store
/// - [`crate::infrastructure::cache::MemoryGuestStore`] - In-process fallback
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuestStore: Send + Sync {
    /// Looks up the short code previously issued for an original URL via the
    /// reverse entry. `Ok(None)` when absent or expired.
    async fn code_for_url(&self, original_url: &str) -> CacheResult<Option<String>>;

    /// Stores the forward and reverse entries for a new guest mapping, both
    /// with the same TTL, as one atomic write.
    async fn store_mapping(
        &self,
        short_code: &str,
        original_url: &str,
        ttl: Duration,
    ) -> CacheResult<()>;

    /// Resolves a short code to its original URL via the forward entry.
    /// `Ok(None)` when absent or expired.
    async fn original_url(&self, short_code: &str) -> CacheResult<Option<String>>;

    /// Atomically increments the visit counter for a code and returns the
    /// new value.
    async fn increment_visit_count(&self, short_code: &str) -> CacheResult<i64>;

    /// Reads the visit counter for a code; 0 when the counter is absent.
    async fn visit_count(&self, short_code: &str) -> CacheResult<i64>;

    /// Checks whether the store backend is reachable.
    async fn health_check(&self) -> bool;
}
