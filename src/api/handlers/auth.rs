//! Handlers for signup and login.

use axum::{Json, extract::State, extract::rejection::JsonRejection, http::StatusCode};
use serde_json::json;
use validator::Validate;

use crate::api::dto::auth::{AuthRequest, TokenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account.
///
/// # Endpoint
///
/// `POST /signup`
///
/// Responds `201 Created` with a bearer token for the new account, so
/// clients need no follow-up login.
///
/// # Errors
///
/// - 400 on malformed JSON or an invalid email
/// - 409 when the email is already registered
pub async fn signup_handler(
    State(state): State<AppState>,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TokenResponse>), AppError> {
    let payload = parse(payload)?;

    let token = state.auth.signup(&payload.email, &payload.password).await?;

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

/// Exchanges credentials for a bearer token.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Errors
///
/// Returns 401 on unknown email or wrong password, without revealing
/// which.
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<AuthRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, AppError> {
    let payload = parse(payload)?;

    let token = state.auth.login(&payload.email, &payload.password).await?;

    Ok(Json(TokenResponse { token }))
}

fn parse(payload: Result<Json<AuthRequest>, JsonRejection>) -> Result<AuthRequest, AppError> {
    let Json(payload) = payload.map_err(|e| {
        AppError::bad_request("Invalid request body", json!({"reason": e.body_text()}))
    })?;
    payload.validate()?;
    Ok(payload)
}
