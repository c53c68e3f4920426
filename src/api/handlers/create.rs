//! Handler for the URL shortening endpoint.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde_json::json;
use validator::Validate;

use crate::api::dto::create::{CreateUrlRequest, CreateUrlResponse};
use crate::api::middleware::auth::MaybeUser;
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a URL for an anonymous or authenticated caller.
///
/// # Endpoint
///
/// `POST /create`
///
/// # Request Body
///
/// ```json
/// { "originalUrl": "https://example.com/some/page" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "originalUrl": "https://example.com/some/page",
///   "shortCode": "aZ3kB9xQ",
///   "isNew": true
/// }
/// ```
///
/// `isNew` is `false` when an existing mapping's code was reused.
///
/// # Errors
///
/// Returns 400 Bad Request on malformed JSON or an empty `originalUrl`,
/// and 400 with code `invalid_url` when the URL fails sanitization.
pub async fn create_handler(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
    payload: Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<Json<CreateUrlResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| {
        AppError::bad_request("Invalid request body", json!({"reason": e.body_text()}))
    })?;
    payload.validate()?;

    let outcome = state
        .shortener
        .shorten(&payload.original_url, user.map(|u| u.user_id))
        .await?;

    Ok(Json(CreateUrlResponse {
        original_url: outcome.original_url,
        short_code: outcome.short_code,
        is_new: outcome.is_new,
    }))
}
