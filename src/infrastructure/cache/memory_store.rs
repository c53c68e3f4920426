//! In-process guest store used when Redis is not configured.

use super::service::{CacheResult, GuestStore};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn live(&self) -> Option<&str> {
        (Instant::now() < self.expires_at).then_some(self.value.as_str())
    }
}

/// Process-local guest store with per-entry TTLs.
///
/// Development and test fallback: guest mappings are lost on restart and
/// not shared across instances. Expired entries are dropped lazily on read.
#[derive(Default)]
pub struct MemoryGuestStore {
    forward: Mutex<HashMap<String, Entry>>,
    reverse: Mutex<HashMap<String, Entry>>,
    visits: Mutex<HashMap<String, i64>>,
}

impl MemoryGuestStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GuestStore for MemoryGuestStore {
    async fn code_for_url(&self, original_url: &str) -> CacheResult<Option<String>> {
        let mut map = self.reverse.lock().expect("guest store lock poisoned");

        match map.get(original_url).and_then(Entry::live) {
            Some(code) => Ok(Some(code.to_string())),
            None => {
                map.remove(original_url);
                Ok(None)
            }
        }
    }

    async fn store_mapping(
        &self,
        short_code: &str,
        original_url: &str,
        ttl: Duration,
    ) -> CacheResult<()> {
        let expires_at = Instant::now() + ttl;

        self.forward.lock().expect("guest store lock poisoned").insert(
            short_code.to_string(),
            Entry {
                value: original_url.to_string(),
                expires_at,
            },
        );
        self.reverse.lock().expect("guest store lock poisoned").insert(
            original_url.to_string(),
            Entry {
                value: short_code.to_string(),
                expires_at,
            },
        );

        Ok(())
    }

    async fn original_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        let mut map = self.forward.lock().expect("guest store lock poisoned");

        match map.get(short_code).and_then(Entry::live) {
            Some(url) => Ok(Some(url.to_string())),
            None => {
                map.remove(short_code);
                Ok(None)
            }
        }
    }

    async fn increment_visit_count(&self, short_code: &str) -> CacheResult<i64> {
        let mut visits = self.visits.lock().expect("guest store lock poisoned");
        let count = visits.entry(short_code.to_string()).or_insert(0);
        *count += 1;
        Ok(*count)
    }

    async fn visit_count(&self, short_code: &str) -> CacheResult<i64> {
        let visits = self.visits.lock().expect("guest store lock poisoned");
        Ok(visits.get(short_code).copied().unwrap_or(0))
    }

    async fn health_check(&self) -> bool {
        true
    }
}
