//! DTOs for owned URL listing and analytics.

use serde::Serialize;

use crate::domain::entities::UrlMapping;

/// One owned mapping in a `GET /user/urls` listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlMappingRecord {
    pub short_code: String,
    pub original_url: String,
    pub visit_count: i64,
}

impl From<UrlMapping> for UrlMappingRecord {
    fn from(mapping: UrlMapping) -> Self {
        Self {
            short_code: mapping.short_code,
            original_url: mapping.original_url,
            visit_count: mapping.visit_count,
        }
    }
}

/// Visit counter response for both guest analytics and owned lookups.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisitCountResponse {
    pub short_code: String,
    pub visit_count: i64,
}

/// Confirmation body for `DELETE /delete/{short_code}`.
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: String,
}
