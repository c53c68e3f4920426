//! User account entity.

/// A registered account.
///
/// `password_hash` is a bcrypt hash; the plaintext never leaves the signup
/// and login handlers. Users are created once and never mutated.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
}

/// Input data for creating a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}
