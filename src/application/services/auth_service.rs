//! Account registration, login, and bearer token verification.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::entities::NewUser;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Claims carried in a signed bearer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject email, used to look the account back up on each request.
    pub email: String,
    /// Expiry as a unix timestamp.
    pub exp: i64,
    /// Issued-at as a unix timestamp.
    pub iat: i64,
}

/// Identity established by a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub email: String,
}

/// Service for account lifecycle and token handling.
///
/// Passwords are stored as bcrypt hashes. Tokens are HS256 JWTs carrying
/// the account email and a fixed expiry window (24 hours in production).
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserRepository>, secret: &str, token_ttl: Duration) -> Self {
        Self {
            users,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl,
        }
    }

    /// Registers a new account and returns a fresh token for it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when the email is already registered
    /// (via the unique constraint) and [`AppError::Internal`] on hashing
    /// failure.
    pub async fn signup(&self, email: &str, password: &str) -> Result<String, AppError> {
        let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST).map_err(|e| {
            tracing::error!("Password hashing failed: {}", e);
            AppError::internal("Failed to create user", json!({}))
        })?;

        let user = self
            .users
            .create(NewUser {
                email: email.to_string(),
                password_hash,
            })
            .await?;

        self.issue_token(&user.email)
    }

    /// Verifies credentials and returns a fresh token.
    ///
    /// Unknown email and wrong password are indistinguishable to the
    /// caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or_else(invalid_credentials)?;

        let valid = bcrypt::verify(password, &user.password_hash).map_err(|e| {
            tracing::error!("Password verification failed: {}", e);
            AppError::internal("Failed to verify credentials", json!({}))
        })?;

        if !valid {
            return Err(invalid_credentials());
        }

        self.issue_token(&user.email)
    }

    /// Verifies a bearer token and resolves it to an account.
    ///
    /// # Errors
    ///
    /// Any defect (bad signature, expired, malformed, account since
    /// deleted) collapses to [`AppError::Unauthorized`].
    pub async fn authenticate(&self, token: &str) -> Result<AuthContext, AppError> {
        let claims = self.verify_token(token)?;

        let user = self
            .users
            .find_by_email(&claims.email)
            .await?
            .ok_or_else(invalid_token)?;

        Ok(AuthContext {
            user_id: user.id,
            email: user.email,
        })
    }

    pub(crate) fn issue_token(&self, email: &str) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            email: email.to_string(),
            exp: now + self.token_ttl.as_secs() as i64,
            iat: now,
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(
            |e| {
                tracing::error!("Token signing failed: {}", e);
                AppError::internal("Failed to issue token", json!({}))
            },
        )
    }

    pub(crate) fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        jsonwebtoken::decode::<Claims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|_| invalid_token())
    }
}

fn invalid_credentials() -> AppError {
    AppError::unauthorized("Invalid email or password", json!({}))
}

fn invalid_token() -> AppError {
    AppError::unauthorized("Invalid or expired token", json!({}))
}
