//! Handlers for owned URL management and analytics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::urls::{DeleteResponse, UrlMappingRecord, VisitCountResponse};
use crate::api::middleware::auth::CurrentUser;
use crate::error::AppError;
use crate::state::AppState;

/// Lists every mapping owned by the caller.
///
/// # Endpoint
///
/// `GET /user/urls` (Bearer token required)
pub async fn list_urls_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<UrlMappingRecord>>, AppError> {
    let mappings = state.shortener.list_for_user(user.user_id).await?;

    Ok(Json(mappings.into_iter().map(Into::into).collect()))
}

/// Deletes one of the caller's mappings.
///
/// # Endpoint
///
/// `DELETE /delete/{short_code}` (Bearer token required)
///
/// # Errors
///
/// Returns 404 when the caller owns no mapping with this code, including
/// codes that exist but belong to someone else.
pub async fn delete_url_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(short_code): Path<String>,
) -> Result<Json<DeleteResponse>, AppError> {
    state.shortener.delete(user.user_id, &short_code).await?;

    Ok(Json(DeleteResponse {
        message: "Short URL deleted".to_string(),
    }))
}

/// Manually bumps the durable visit counter for an owned mapping.
///
/// # Endpoint
///
/// `POST /urls/{short_code}/visit` (Bearer token required)
///
/// Lets owners account for visits that bypass the redirect endpoint, such
/// as copies of the target URL shared directly.
pub async fn record_visit_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(short_code): Path<String>,
) -> Result<&'static str, AppError> {
    state
        .shortener
        .record_owned_visit(user.user_id, &short_code)
        .await?;

    Ok("Visit count incremented")
}

/// Returns the durable visit counter for an owned mapping.
///
/// # Endpoint
///
/// `GET /user/urls/{short_code}/visitcount` (Bearer token required)
///
/// # Errors
///
/// Returns 404 when the caller owns no mapping with this code.
pub async fn visit_count_handler(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(short_code): Path<String>,
) -> Result<Json<VisitCountResponse>, AppError> {
    let visit_count = state
        .shortener
        .owned_visit_count(user.user_id, &short_code)
        .await?;

    Ok(Json(VisitCountResponse {
        short_code,
        visit_count,
    }))
}
