pub mod config;
pub mod decode;
pub mod error;
pub mod extract;
pub mod routes;
pub mod types;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use todo_feature::PhotoStore;
use tower_http::{services::ServeDir, trace::TraceLayer};
use user_feature::SessionKeys;

use config::Config;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub sessions: SessionKeys,
    pub photos: PhotoStore,
    /// Prefix joined with stored photo paths to build public URLs
    pub media_url: String,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(pool: PgPool, config: &Config) -> Self {
        Self {
            pool,
            sessions: SessionKeys::new(config.session_secret.as_bytes(), config.session_ttl),
            photos: PhotoStore::new(&config.upload_dir),
            media_url: config.media_url.clone(),
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}

/// Health check handler
async fn health() -> &'static str {
    "OK"
}

/// Build the HTTP router with every route mounted
pub fn build_router(state: AppState) -> Router {
    use routes::{auth, todos};

    let mut router = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/todos", get(todos::list).post(todos::create))
        .route("/todos/", get(todos::list).post(todos::create))
        .route(
            "/todos/{id}",
            get(todos::get).patch(todos::update).delete(todos::delete),
        )
        .route(
            "/todos/{id}/",
            get(todos::get).patch(todos::update).delete(todos::delete),
        )
        .route("/health", get(health));

    // Only a local path prefix can be served from here; anything else is a CDN
    let media_prefix = state.media_url.trim_end_matches('/');
    if media_prefix.starts_with('/') && media_prefix.len() > 1 {
        router = router.nest_service(media_prefix, ServeDir::new(state.photos.root()));
    }

    router
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
