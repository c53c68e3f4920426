//! Bearer token authentication middleware and extractors.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use serde_json::json;

use crate::application::services::AuthContext;
use crate::error::AppError;
use crate::state::AppState;

/// Requires a valid Bearer token and records the caller's identity.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// On success the resolved [`AuthContext`] is inserted as a request
/// extension for the [`CurrentUser`] extractor.
///
/// # Errors
///
/// Returns `401 Unauthorized` (with `WWW-Authenticate: Bearer`) if the
/// header is missing, malformed, or the token does not verify.
pub async fn require(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let ctx = st.auth.authenticate(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}

/// Accepts requests with or without a Bearer token.
///
/// A present token must still verify; only its absence is tolerated. When
/// verification succeeds the [`AuthContext`] extension is inserted for the
/// [`MaybeUser`] extractor.
pub async fn optional(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let token = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .ok()
        .map(|AuthBearer(token)| token);

    let mut req = Request::from_parts(parts, body);

    if let Some(token) = token {
        let ctx = st.auth.authenticate(&token).await?;
        req.extensions_mut().insert(ctx);
    }

    Ok(next.run(req).await)
}

/// Extracts the identity recorded by [`require`].
///
/// Only usable on routes behind that middleware; elsewhere the missing
/// extension is a routing bug and surfaces as a 500.
pub struct CurrentUser(pub AuthContext);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .map(CurrentUser)
            .ok_or_else(|| {
                AppError::internal(
                    "Authentication context missing",
                    json!({"reason": "route is not behind the auth middleware"}),
                )
            })
    }
}

/// Extracts the identity recorded by [`optional`], if any.
pub struct MaybeUser(pub Option<AuthContext>);

impl FromRequestParts<AppState> for MaybeUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(MaybeUser(parts.extensions.get::<AuthContext>().cloned()))
    }
}
