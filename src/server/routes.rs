/// API Routes definition

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::handlers;

pub fn create_router(enable_cors: bool) -> Router {
    let mut app = Router::new()
        .route("/api/graph", get(handlers::get_sample))
        .route("/api/metrics", get(handlers::get_nodes))
        .route("/api/health", get(handlers::health_check))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        app = app.layer(CorsLayer::permissive());
    }

    app
}
