//! Dual-store mapping resolver and redirect path.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheError, GuestStore};
use crate::utils::code_generator::generate_code;
use crate::utils::url_sanitizer::sanitize_url;

/// Result of shortening a URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenOutcome {
    pub original_url: String,
    pub short_code: String,
    /// False when an existing mapping's code was reused.
    pub is_new: bool,
}

/// Tagged result of a dual-store code lookup.
///
/// Keeps the lookup precedence explicit: the durable store always answers
/// first, so a code that exists in both stores resolves to the durable
/// entry and the cache entry is silently shadowed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    FoundDurable(UrlMapping),
    FoundCache { original_url: String },
    NotFound,
}

/// Service implementing the short-code assignment and dual-store lookup
/// policy.
///
/// Identified users get durable, owner-scoped mappings in PostgreSQL;
/// guests get mappings in the expiring cache, deduplicated globally by
/// original URL. Two concurrent creates for the same (owner, URL) pair can
/// both miss the reuse check and mint two codes; that race is accepted.
pub struct ShortenerService {
    urls: Arc<dyn UrlRepository>,
    guest_store: Arc<dyn GuestStore>,
    guest_ttl: Duration,
}

impl ShortenerService {
    /// Creates a new shortener service.
    ///
    /// `guest_ttl` bounds the lifetime of guest mappings (24 hours in
    /// production).
    pub fn new(
        urls: Arc<dyn UrlRepository>,
        guest_store: Arc<dyn GuestStore>,
        guest_ttl: Duration,
    ) -> Self {
        Self {
            urls,
            guest_store,
            guest_ttl,
        }
    }

    /// Shortens a URL for an optionally identified caller.
    ///
    /// # Policy
    ///
    /// - Authenticated: reuse the owner's existing mapping for the sanitized
    ///   URL, else mint a code and persist (owner, code, url) durably.
    /// - Guest: reuse the globally shared reverse entry for the URL, else
    ///   mint a code and store forward + reverse entries with the guest TTL.
    ///
    /// No collision retry in either path.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] on sanitizer rejection and
    /// [`AppError::Internal`] when a store is unavailable.
    pub async fn shorten(
        &self,
        raw_url: &str,
        owner: Option<i64>,
    ) -> Result<ShortenOutcome, AppError> {
        let original_url = sanitize_url(raw_url)
            .map_err(|e| AppError::invalid_url("Invalid URL", json!({ "reason": e.to_string() })))?;

        match owner {
            Some(user_id) => self.shorten_owned(original_url, user_id).await,
            None => self.shorten_guest(original_url).await,
        }
    }

    async fn shorten_owned(
        &self,
        original_url: String,
        user_id: i64,
    ) -> Result<ShortenOutcome, AppError> {
        if let Some(existing) = self
            .urls
            .find_by_owner_and_url(user_id, &original_url)
            .await?
        {
            return Ok(ShortenOutcome {
                original_url,
                short_code: existing.short_code,
                is_new: false,
            });
        }

        let short_code = generate_code();
        let mapping = self
            .urls
            .insert(NewUrlMapping {
                user_id,
                short_code,
                original_url,
            })
            .await?;

        Ok(ShortenOutcome {
            original_url: mapping.original_url,
            short_code: mapping.short_code,
            is_new: true,
        })
    }

    async fn shorten_guest(&self, original_url: String) -> Result<ShortenOutcome, AppError> {
        if let Some(short_code) = self
            .guest_store
            .code_for_url(&original_url)
            .await
            .map_err(cache_unavailable)?
        {
            return Ok(ShortenOutcome {
                original_url,
                short_code,
                is_new: false,
            });
        }

        let short_code = generate_code();
        self.guest_store
            .store_mapping(&short_code, &original_url, self.guest_ttl)
            .await
            .map_err(cache_unavailable)?;

        Ok(ShortenOutcome {
            original_url,
            short_code,
            is_new: true,
        })
    }

    /// Resolves a short code against both stores, durable store first.
    pub async fn resolve(&self, short_code: &str) -> Result<Resolution, AppError> {
        if let Some(mapping) = self.urls.find_by_code(short_code).await? {
            return Ok(Resolution::FoundDurable(mapping));
        }

        match self
            .guest_store
            .original_url(short_code)
            .await
            .map_err(cache_unavailable)?
        {
            Some(original_url) => Ok(Resolution::FoundCache { original_url }),
            None => Ok(Resolution::NotFound),
        }
    }

    /// Resolves a short code and records the visit, returning the redirect
    /// target.
    ///
    /// Exactly one counter in exactly one store is incremented per
    /// successful resolution; the two counters are never aggregated.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when neither store holds the code.
    pub async fn follow(&self, short_code: &str) -> Result<String, AppError> {
        match self.resolve(short_code).await? {
            Resolution::FoundDurable(mapping) => {
                self.urls.increment_visit_count(short_code).await?;
                Ok(mapping.original_url)
            }
            Resolution::FoundCache { original_url } => {
                self.guest_store
                    .increment_visit_count(short_code)
                    .await
                    .map_err(cache_unavailable)?;
                Ok(original_url)
            }
            Resolution::NotFound => Err(AppError::not_found(
                "Short URL not found",
                json!({ "shortCode": short_code }),
            )),
        }
    }

    /// Lists all mappings owned by a user.
    pub async fn list_for_user(&self, user_id: i64) -> Result<Vec<UrlMapping>, AppError> {
        self.urls.list_by_owner(user_id).await
    }

    /// Deletes an owned mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] when the caller owns no mapping with
    /// this code.
    pub async fn delete(&self, user_id: i64, short_code: &str) -> Result<(), AppError> {
        if self.urls.delete(user_id, short_code).await? {
            Ok(())
        } else {
            Err(AppError::not_found(
                "Short URL not found",
                json!({ "shortCode": short_code }),
            ))
        }
    }

    /// Records a manual visit against an owned mapping.
    pub async fn record_owned_visit(
        &self,
        user_id: i64,
        short_code: &str,
    ) -> Result<(), AppError> {
        if self
            .urls
            .increment_owned_visit_count(user_id, short_code)
            .await?
        {
            Ok(())
        } else {
            Err(AppError::not_found(
                "Short URL not found",
                json!({ "shortCode": short_code }),
            ))
        }
    }

    /// Reads the durable visit counter for an owned mapping.
    pub async fn owned_visit_count(
        &self,
        user_id: i64,
        short_code: &str,
    ) -> Result<i64, AppError> {
        self.urls
            .visit_count(user_id, short_code)
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short URL not found", json!({ "shortCode": short_code }))
            })
    }

    /// Reads the cache-backed visit counter for a code (guest analytics).
    ///
    /// 0 when no guest visit was ever recorded, even if the code exists
    /// durably; the two counters are independent.
    pub async fn guest_visit_count(&self, short_code: &str) -> Result<i64, AppError> {
        self.guest_store
            .visit_count(short_code)
            .await
            .map_err(cache_unavailable)
    }
}

fn cache_unavailable(e: CacheError) -> AppError {
    tracing::error!("Guest store error: {}", e);
    AppError::internal("Cache error", json!({}))
}
