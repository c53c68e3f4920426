//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /create`                              - shorten a URL (token optional)
//! - `GET  /{short_code}`                        - redirect (public)
//! - `GET  /analytics/{short_code}`              - guest visit counter (public)
//! - `POST /signup`, `POST /login`               - account endpoints (public)
//! - `GET  /health`                              - component health (public)
//! - `GET  /user/urls`                           - owned listing (Bearer token)
//! - `GET  /user/urls/{short_code}/visitcount`   - owned counter (Bearer token)
//! - `POST /urls/{short_code}/visit`             - manual counter bump (Bearer token)
//! - `DELETE /delete/{short_code}`               - delete owned mapping (Bearer token)
//! - `/static/*`                                 - static assets
//!
//! # Middleware
//!
//! - **Tracing** - structured request/response logging
//! - **Rate limiting** - process-wide token bucket
//! - **CORS** - open policy for browser clients
//! - **Authentication** - Bearer token, required or optional per route
//! - **Path normalization** - trailing slash handling

use axum::routing::{delete, get, post};
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

use crate::api::handlers::{
    analytics_handler, create_handler, delete_url_handler, health_handler, list_urls_handler,
    login_handler, record_visit_handler, redirect_handler, signup_handler, visit_count_handler,
};
use crate::api::middleware::{auth, cors, rate_limit, tracing};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_per_second` / `rate_burst` - shared token bucket parameters
pub fn app_router(state: AppState, rate_per_second: u64, rate_burst: u32) -> NormalizePath<Router> {
    let protected = Router::new()
        .route("/user/urls", get(list_urls_handler))
        .route(
            "/user/urls/{short_code}/visitcount",
            get(visit_count_handler),
        )
        .route("/urls/{short_code}/visit", post(record_visit_handler))
        .route("/delete/{short_code}", delete(delete_url_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require,
        ));

    // Shortening works for guests but attributes ownership when a valid
    // token is presented.
    let optional_auth = Router::new()
        .route("/create", post(create_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::optional,
        ));

    let router = Router::new()
        .route("/signup", post(signup_handler))
        .route("/login", post(login_handler))
        .route("/health", get(health_handler))
        .route("/analytics/{short_code}", get(analytics_handler))
        .route("/{short_code}", get(redirect_handler))
        .merge(protected)
        .merge(optional_auth)
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(rate_limit::layer(rate_per_second, rate_burst))
        .layer(cors::layer())
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::ServiceExt;
    use axum::extract::Request;
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use sqlx::PgPool;

    use crate::application::services::{AuthService, ShortenerService};
    use crate::domain::entities::User;
    use crate::domain::repositories::{MockUrlRepository, MockUserRepository};
    use crate::infrastructure::cache::{GuestStore, MemoryGuestStore};

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);
    const SECRET: &str = "router-test-secret";

    fn server_with(
        urls: MockUrlRepository,
        users: MockUserRepository,
        store: Arc<dyn GuestStore>,
        guest_ttl: Duration,
    ) -> TestServer {
        let urls: Arc<dyn crate::domain::repositories::UrlRepository> = Arc::new(urls);
        let users: Arc<dyn crate::domain::repositories::UserRepository> = Arc::new(users);

        let state = AppState {
            // Lazy pool, never actually connected by these tests.
            db: Arc::new(PgPool::connect_lazy("postgres://localhost/test").unwrap()),
            cache: store.clone(),
            shortener: Arc::new(ShortenerService::new(urls, store, guest_ttl)),
            auth: Arc::new(AuthService::new(users, SECRET, DAY)),
        };

        let app = app_router(state, 1_000, 1_000);
        TestServer::new(ServiceExt::<Request>::into_make_service(app)).unwrap()
    }

    fn guest_server(urls: MockUrlRepository) -> TestServer {
        server_with(
            urls,
            MockUserRepository::new(),
            Arc::new(MemoryGuestStore::new()),
            DAY,
        )
    }

    fn stored_user(id: i64, email: &str, password: &str) -> User {
        User {
            id,
            email: email.to_string(),
            password_hash: bcrypt::hash(password, 4).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_guest_create_then_redirect_roundtrip() {
        let mut urls = MockUrlRepository::new();
        urls.expect_find_by_code().returning(|_| Ok(None));
        let server = guest_server(urls);

        let response = server
            .post("/create")
            .json(&json!({"originalUrl": "https://example.com"}))
            .await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["originalUrl"], "https://example.com");
        assert_eq!(body["isNew"], true);
        let code = body["shortCode"].as_str().unwrap().to_string();
        assert_eq!(code.len(), 8);

        let response = server.get(&format!("/{}", code)).await;
        assert_eq!(response.status_code(), StatusCode::FOUND);
        assert_eq!(response.header("location"), "https://example.com");
    }

    #[tokio::test]
    async fn test_guest_create_deduplicates_by_url() {
        let server = guest_server(MockUrlRepository::new());

        let first: Value = server
            .post("/create")
            .json(&json!({"originalUrl": "https://example.com/page"}))
            .await
            .json();
        let second: Value = server
            .post("/create")
            .json(&json!({"originalUrl": "https://example.com/page"}))
            .await
            .json();

        assert_eq!(first["shortCode"], second["shortCode"]);
        assert_eq!(first["isNew"], true);
        assert_eq!(second["isNew"], false);
    }

    #[tokio::test]
    async fn test_create_rejects_unsupported_scheme() {
        let server = guest_server(MockUrlRepository::new());

        let response = server
            .post("/create")
            .json(&json!({"originalUrl": "ftp://example.com/file"}))
            .await;

        response.assert_status_bad_request();
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "invalid_url");
    }

    #[tokio::test]
    async fn test_create_rejects_malformed_body() {
        let server = guest_server(MockUrlRepository::new());

        let response = server.post("/create").text("not json").await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_redirect_unknown_code_is_not_found() {
        let mut urls = MockUrlRepository::new();
        urls.expect_find_by_code().returning(|_| Ok(None));
        let server = guest_server(urls);

        let response = server.get("/missing1").await;

        response.assert_status_not_found();
        let body: Value = response.json();
        assert_eq!(body["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn test_guest_redirects_accumulate_analytics() {
        let mut urls = MockUrlRepository::new();
        urls.expect_find_by_code().returning(|_| Ok(None));
        let server = guest_server(urls);

        let body: Value = server
            .post("/create")
            .json(&json!({"originalUrl": "https://example.com"}))
            .await
            .json();
        let code = body["shortCode"].as_str().unwrap().to_string();

        server.get(&format!("/{}", code)).await.assert_status(StatusCode::FOUND);
        server.get(&format!("/{}", code)).await.assert_status(StatusCode::FOUND);

        let analytics: Value = server.get(&format!("/analytics/{}", code)).await.json();
        assert_eq!(analytics["visitCount"], 2);
    }

    #[tokio::test]
    async fn test_analytics_unknown_code_reports_zero() {
        let server = guest_server(MockUrlRepository::new());

        let response = server.get("/analytics/unknown1").await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["visitCount"], 0);
    }

    #[tokio::test]
    async fn test_expired_guest_mapping_is_gone() {
        let mut urls = MockUrlRepository::new();
        urls.expect_find_by_code().returning(|_| Ok(None));
        let server = server_with(
            urls,
            MockUserRepository::new(),
            Arc::new(MemoryGuestStore::new()),
            Duration::ZERO,
        );

        let body: Value = server
            .post("/create")
            .json(&json!({"originalUrl": "https://example.com"}))
            .await
            .json();
        let code = body["shortCode"].as_str().unwrap().to_string();

        let response = server.get(&format!("/{}", code)).await;
        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_protected_routes_require_bearer_token() {
        let server = guest_server(MockUrlRepository::new());

        let response = server.get("/user/urls").await;

        response.assert_status_unauthorized();
        assert_eq!(response.header("www-authenticate"), "Bearer");
    }

    #[tokio::test]
    async fn test_signup_returns_created_with_token() {
        let mut users = MockUserRepository::new();
        users.expect_create().times(1).returning(|new| {
            Ok(User {
                id: 1,
                email: new.email,
                password_hash: new.password_hash,
            })
        });

        let server = server_with(
            MockUrlRepository::new(),
            users,
            Arc::new(MemoryGuestStore::new()),
            DAY,
        );

        let response = server
            .post("/signup")
            .json(&json!({"email": "alice@example.com", "password": "hunter22"}))
            .await;

        assert_eq!(response.status_code(), StatusCode::CREATED);
        let body: Value = response.json();
        assert!(!body["token"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_signup_rejects_invalid_email() {
        let server = guest_server(MockUrlRepository::new());

        let response = server
            .post("/signup")
            .json(&json!({"email": "not-an-email", "password": "hunter22"}))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_login_rejects_bad_credentials() {
        let mut users = MockUserRepository::new();
        users.expect_find_by_email().returning(|_| Ok(None));

        let server = server_with(
            MockUrlRepository::new(),
            users,
            Arc::new(MemoryGuestStore::new()),
            DAY,
        );

        let response = server
            .post("/login")
            .json(&json!({"email": "alice@example.com", "password": "wrong"}))
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_authenticated_create_persists_durably() {
        let mut urls = MockUrlRepository::new();
        let mut users = MockUserRepository::new();

        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_user(7, "alice@example.com", "hunter22"))));

        urls.expect_find_by_owner_and_url()
            .withf(|uid, _| *uid == 7)
            .times(1)
            .returning(|_, _| Ok(None));
        urls.expect_insert().times(1).returning(|new| {
            Ok(crate::domain::entities::UrlMapping {
                user_id: Some(new.user_id),
                short_code: new.short_code,
                original_url: new.original_url,
                visit_count: 0,
            })
        });

        let server = server_with(urls, users, Arc::new(MemoryGuestStore::new()), DAY);

        let token: Value = server
            .post("/login")
            .json(&json!({"email": "alice@example.com", "password": "hunter22"}))
            .await
            .json();

        let response = server
            .post("/create")
            .authorization_bearer(token["token"].as_str().unwrap())
            .json(&json!({"originalUrl": "https://example.com"}))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["isNew"], true);
    }

    #[tokio::test]
    async fn test_create_with_invalid_token_is_rejected() {
        let server = guest_server(MockUrlRepository::new());

        let response = server
            .post("/create")
            .authorization_bearer("garbage")
            .json(&json!({"originalUrl": "https://example.com"}))
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_delete_owned_mapping() {
        let mut urls = MockUrlRepository::new();
        let mut users = MockUserRepository::new();

        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_user(7, "alice@example.com", "hunter22"))));
        urls.expect_delete()
            .withf(|uid, code| *uid == 7 && code == "abcd1234")
            .times(1)
            .returning(|_, _| Ok(true));

        let server = server_with(urls, users, Arc::new(MemoryGuestStore::new()), DAY);

        let token: Value = server
            .post("/login")
            .json(&json!({"email": "alice@example.com", "password": "hunter22"}))
            .await
            .json();

        let response = server
            .delete("/delete/abcd1234")
            .authorization_bearer(token["token"].as_str().unwrap())
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_delete_foreign_mapping_is_not_found() {
        let mut urls = MockUrlRepository::new();
        let mut users = MockUserRepository::new();

        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_user(7, "alice@example.com", "hunter22"))));
        urls.expect_delete().times(1).returning(|_, _| Ok(false));

        let server = server_with(urls, users, Arc::new(MemoryGuestStore::new()), DAY);

        let token: Value = server
            .post("/login")
            .json(&json!({"email": "alice@example.com", "password": "hunter22"}))
            .await
            .json();

        let response = server
            .delete("/delete/notmine1")
            .authorization_bearer(token["token"].as_str().unwrap())
            .await;

        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_owned_visit_count_and_manual_bump() {
        let mut urls = MockUrlRepository::new();
        let mut users = MockUserRepository::new();

        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_user(7, "alice@example.com", "hunter22"))));
        urls.expect_increment_owned_visit_count()
            .withf(|uid, code| *uid == 7 && code == "abcd1234")
            .times(1)
            .returning(|_, _| Ok(true));
        urls.expect_visit_count()
            .withf(|uid, code| *uid == 7 && code == "abcd1234")
            .times(1)
            .returning(|_, _| Ok(Some(4)));

        let server = server_with(urls, users, Arc::new(MemoryGuestStore::new()), DAY);

        let token: Value = server
            .post("/login")
            .json(&json!({"email": "alice@example.com", "password": "hunter22"}))
            .await
            .json();
        let token = token["token"].as_str().unwrap().to_string();

        let response = server
            .post("/urls/abcd1234/visit")
            .authorization_bearer(&token)
            .await;
        response.assert_status_ok();
        assert_eq!(response.text(), "Visit count incremented");

        let counts: Value = server
            .get("/user/urls/abcd1234/visitcount")
            .authorization_bearer(&token)
            .await
            .json();
        assert_eq!(counts["visitCount"], 4);
    }

    #[tokio::test]
    async fn test_list_owned_urls() {
        let mut urls = MockUrlRepository::new();
        let mut users = MockUserRepository::new();

        users
            .expect_find_by_email()
            .returning(|_| Ok(Some(stored_user(7, "alice@example.com", "hunter22"))));
        urls.expect_list_by_owner()
            .withf(|uid| *uid == 7)
            .times(1)
            .returning(|_| {
                Ok(vec![crate::domain::entities::UrlMapping {
                    user_id: Some(7),
                    short_code: "abcd1234".to_string(),
                    original_url: "https://example.com".to_string(),
                    visit_count: 2,
                }])
            });

        let server = server_with(urls, users, Arc::new(MemoryGuestStore::new()), DAY);

        let token: Value = server
            .post("/login")
            .json(&json!({"email": "alice@example.com", "password": "hunter22"}))
            .await
            .json();

        let body: Value = server
            .get("/user/urls")
            .authorization_bearer(token["token"].as_str().unwrap())
            .await
            .json();

        assert_eq!(body[0]["shortCode"], "abcd1234");
        assert_eq!(body[0]["visitCount"], 2);
    }
}
