//! Redis-backed guest store implementation.

use super::service::{CacheError, CacheResult, GuestStore};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use std::time::Duration;
use tracing::{debug, info};

/// Key prefix for reverse (URL to code) entries.
const REVERSE_PREFIX: &str = "reverse:";

/// Key prefix for guest visit counters.
const VISITS_PREFIX: &str = "visits:";

/// Redis guest store.
///
/// Forward entries use the bare short code as key; the `reverse:` and
/// `visits:` namespaces never collide with codes, which are alphanumeric
/// and contain no colon.
/// Uses `ConnectionManager` for connection reuse and automatic reconnects.
pub struct RedisGuestStore {
    client: ConnectionManager,
}

impl RedisGuestStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the
    /// connection cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        let client = Client::open(redis_url)
            .map_err(|e| CacheError::Connection(format!("Failed to create Redis client: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self { client: manager })
    }
}

#[async_trait]
impl GuestStore for RedisGuestStore {
    async fn code_for_url(&self, original_url: &str) -> CacheResult<Option<String>> {
        let key = format!("{}{}", REVERSE_PREFIX, original_url);
        let mut conn = self.client.clone();

        conn.get::<_, Option<String>>(&key)
            .await
            .map_err(|e| CacheError::Operation(format!("GET {}: {}", key, e)))
    }

    async fn store_mapping(
        &self,
        short_code: &str,
        original_url: &str,
        ttl: Duration,
    ) -> CacheResult<()> {
        let reverse_key = format!("{}{}", REVERSE_PREFIX, original_url);
        let ttl_seconds = ttl.as_secs();
        let mut conn = self.client.clone();

        // MULTI/EXEC so the forward and reverse entries land together: a
        // partial write would leave a forward entry no later submission of
        // the same URL could find.
        redis::pipe()
            .atomic()
            .set_ex(short_code, original_url, ttl_seconds)
            .set_ex(&reverse_key, short_code, ttl_seconds)
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| CacheError::Operation(format!("SETEX {}: {}", short_code, e)))?;

        debug!(
            "Stored guest mapping {} -> {} (TTL: {}s)",
            short_code, original_url, ttl_seconds
        );
        Ok(())
    }

    async fn original_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        let mut conn = self.client.clone();

        conn.get::<_, Option<String>>(short_code)
            .await
            .map_err(|e| CacheError::Operation(format!("GET {}: {}", short_code, e)))
    }

    async fn increment_visit_count(&self, short_code: &str) -> CacheResult<i64> {
        let key = format!("{}{}", VISITS_PREFIX, short_code);
        let mut conn = self.client.clone();

        conn.incr::<_, _, i64>(&key, 1)
            .await
            .map_err(|e| CacheError::Operation(format!("INCR {}: {}", key, e)))
    }

    async fn visit_count(&self, short_code: &str) -> CacheResult<i64> {
        let key = format!("{}{}", VISITS_PREFIX, short_code);
        let mut conn = self.client.clone();

        let count: Option<i64> = conn
            .get(&key)
            .await
            .map_err(|e| CacheError::Operation(format!("GET {}: {}", key, e)))?;

        Ok(count.unwrap_or(0))
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
