//! Repository trait for user account data access.

use crate::domain::entities::{NewUser, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for user accounts.
///
/// Accounts are created at signup and read at login and on every
/// authenticated request (resolving the token's email claim to a user row).
/// There is no update operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] when the email is already registered
    /// (store-level uniqueness failure).
    /// Returns [`AppError::Internal`] on other database errors.
    async fn create(&self, new: NewUser) -> Result<User, AppError>;

    /// Finds an account by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
}
