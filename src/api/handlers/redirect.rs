//! Handler for short code redirects.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{short_code}`
///
/// Checks the durable store first, then the guest cache, and bumps the
/// visit counter of whichever store answered. Responds `302 Found` so
/// clients keep re-resolving codes whose target may change or expire.
///
/// # Errors
///
/// Returns 404 Not Found when neither store knows the code.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let target = state.shortener.follow(&short_code).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, target)]))
}
