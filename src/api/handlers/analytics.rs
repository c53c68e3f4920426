//! Handler for public guest analytics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::urls::VisitCountResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the cache-backed visit counter for a short code.
///
/// # Endpoint
///
/// `GET /analytics/{short_code}`
///
/// Public and unauthenticated. Reads only the guest store counter, so a
/// code served from the durable store reports 0 here; owned counters live
/// behind `GET /user/urls/{short_code}/visitcount`. Unknown codes also
/// report 0 rather than 404.
pub async fn analytics_handler(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> Result<Json<VisitCountResponse>, AppError> {
    let visit_count = state.shortener.guest_visit_count(&short_code).await?;

    Ok(Json(VisitCountResponse {
        short_code,
        visit_count,
    }))
}
