//! PostgreSQL implementation of the URL mapping repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrlMapping, UrlMapping};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;

/// PostgreSQL repository for owner-scoped URL mappings.
///
/// Uses SQLx prepared statements for SQL injection protection. Visit
/// counters are incremented with a single UPDATE so concurrent redirects
/// never lose updates.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert(&self, new: NewUrlMapping) -> Result<UrlMapping, AppError> {
        let mapping = sqlx::query_as::<_, UrlMapping>(
            r#"
            INSERT INTO urls (user_id, short_code, original_url)
            VALUES ($1, $2, $3)
            RETURNING user_id, short_code, original_url, visit_count
            "#,
        )
        .bind(new.user_id)
        .bind(&new.short_code)
        .bind(&new.original_url)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(mapping)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlMapping>, AppError> {
        let mapping = sqlx::query_as::<_, UrlMapping>(
            r#"
            SELECT user_id, short_code, original_url, visit_count
            FROM urls
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(mapping)
    }

    async fn find_by_owner_and_url(
        &self,
        user_id: i64,
        original_url: &str,
    ) -> Result<Option<UrlMapping>, AppError> {
        let mapping = sqlx::query_as::<_, UrlMapping>(
            r#"
            SELECT user_id, short_code, original_url, visit_count
            FROM urls
            WHERE user_id = $1 AND original_url = $2
            "#,
        )
        .bind(user_id)
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(mapping)
    }

    async fn list_by_owner(&self, user_id: i64) -> Result<Vec<UrlMapping>, AppError> {
        let mappings = sqlx::query_as::<_, UrlMapping>(
            r#"
            SELECT user_id, short_code, original_url, visit_count
            FROM urls
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(mappings)
    }

    async fn increment_visit_count(&self, short_code: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE urls SET visit_count = visit_count + 1 WHERE short_code = $1")
            .bind(short_code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn increment_owned_visit_count(
        &self,
        user_id: i64,
        short_code: &str,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE urls SET visit_count = visit_count + 1 WHERE user_id = $1 AND short_code = $2",
        )
        .bind(user_id)
        .bind(short_code)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn visit_count(
        &self,
        user_id: i64,
        short_code: &str,
    ) -> Result<Option<i64>, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT visit_count FROM urls WHERE user_id = $1 AND short_code = $2",
        )
        .bind(user_id)
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(count)
    }

    async fn delete(&self, user_id: i64, short_code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM urls WHERE user_id = $1 AND short_code = $2")
            .bind(user_id)
            .bind(short_code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
