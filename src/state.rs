//! Shared application state injected into handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::application::services::{AuthService, ShortenerService};
use crate::infrastructure::cache::GuestStore;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<PgPool>,
    pub cache: Arc<dyn GuestStore>,
    pub shortener: Arc<ShortenerService>,
    pub auth: Arc<AuthService>,
}
