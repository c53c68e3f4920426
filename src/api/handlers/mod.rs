//! HTTP request handlers.

pub mod analytics;
pub mod auth;
pub mod create;
pub mod health;
pub mod redirect;
pub mod user_urls;

pub use analytics::analytics_handler;
pub use auth::{login_handler, signup_handler};
pub use create::create_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use user_urls::{
    delete_url_handler, list_urls_handler, record_visit_handler, visit_count_handler,
};
