//! Repository trait for durable URL mapping data access.

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for owner-scoped URL mappings in the durable store.
///
/// Lookups by code are global (short codes are unique per store); every
/// mutation of an owned mapping is scoped by `(user_id, short_code)` so a
/// caller can only touch their own rows.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Persists a new owned mapping.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code already exists
    /// (accepted collision outcome, no retry).
    /// Returns [`AppError::Internal`] on other database errors.
    async fn insert(&self, new: NewUrlMapping) -> Result<UrlMapping, AppError>;

    /// Finds a mapping by short code, regardless of owner.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError>;

    /// Finds an owner's mapping for an already-sanitized original URL.
    ///
    /// Used by the create path to reuse an existing short code.
    async fn find_by_owner_and_url(
        &self,
        user_id: i64,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, AppError>;

    /// Lists all mappings owned by a user, newest first.
    async fn list_by_owner(&self, user_id: i64) -> Result<Vec<UrlMapping>, AppError>;

    /// Atomically increments the visit counter for a code.
    ///
    /// Single UPDATE statement, so concurrent increments do not lose updates.
    /// A no-op when the row vanished between lookup and increment.
    async fn increment_visit_count(&self, short_code: &str) -> Result<(), AppError>;

    /// Atomically increments the visit counter for an owned mapping.
    ///
    /// Returns `Ok(false)` when no row matches `(user_id, short_code)`.
    async fn increment_owned_visit_count(
        &self,
        user_id: i64,
        short_code: &str,
    ) -> Result<bool, AppError>;

    /// Reads the visit counter for an owned mapping.
    ///
    /// Returns `Ok(None)` when no row matches `(user_id, short_code)`.
    async fn visit_count(&self, user_id: i64, short_code: &str)
    -> Result<Option<i64>, AppError>;

    /// Deletes an owned mapping.
    ///
    /// Returns `Ok(false)` when no row matches `(user_id, short_code)`.
    async fn delete(&self, user_id: i64, short_code: &str) -> Result<bool, AppError>;
}
