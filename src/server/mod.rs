use axum::{Router, routing::get};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::storage::DataStore;

pub mod dto;
pub mod error;
pub mod routes;

pub use error::{ApiError, ApiResult};

/// Server state, shared read-only across handlers
pub struct AppState {
    pub store: Arc<DataStore>,
}

impl AppState {
    pub fn new(store: DataStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

/// Build the API router without binding a socket
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/api/prices", get(routes::get_prices))
        .route("/api/events", get(routes::get_events))
        .route("/api/statistics", get(routes::get_statistics))
        .route("/api/event-impact", get(routes::get_event_impact))
        .route("/api/categories", get(routes::get_categories))
        .route("/api/date-range", get(routes::get_date_range))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(port: u16, store: DataStore) -> anyhow::Result<()> {
    let stats = store.stats();
    let state = Arc::new(AppState::new(store));
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(
        "Starting server on {} with {} prices and {} events",
        addr,
        stats.prices,
        stats.events
    );
    if !crate::output::is_quiet() {
        println!("🌍 Server running at http://{}", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
