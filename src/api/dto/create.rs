//! DTOs for the URL shortening endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request body for `POST /create`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlRequest {
    #[validate(length(min = 1, message = "originalUrl must not be empty"))]
    pub original_url: String,
}

/// Response body for `POST /create`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlResponse {
    pub original_url: String,
    pub short_code: String,
    /// False when an existing code was reused for this URL.
    pub is_new: bool,
}
