//! Service implementations.
//!
//! - [`ShortenerService`] - short-code assignment and dual-store lookup
//! - [`AuthService`] - accounts, passwords, and bearer tokens

pub mod auth_service;
pub mod shortener_service;

pub use auth_service::{AuthContext, AuthService};
pub use shortener_service::{Resolution, ShortenOutcome, ShortenerService};
