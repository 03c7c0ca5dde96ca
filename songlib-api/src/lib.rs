//! songlib-api library - song library REST service
//!
//! Stores songs grouped by performer, enriches new songs from an external
//! song info service, and serves filtered, paginated listings.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod error;
pub mod models;
pub mod services;

use services::SongInfoClient;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Song info lookup client
    pub lookup: SongInfoClient,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, lookup: SongInfoClient) -> Self {
        Self { db, lookup }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let songs = Router::new()
        .route("/songs", get(api::list_songs).post(api::create_song))
        .route("/songs/:id", axum::routing::put(api::update_song).delete(api::delete_song))
        .route("/songs/:id/text", get(api::get_song_text));

    Router::new()
        .merge(songs)
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
