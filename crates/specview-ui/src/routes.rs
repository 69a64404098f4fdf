//! Documentation Routes

use crate::handler::AppState;
use crate::handlers;
use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
};

/// Create the documentation router
pub(crate) fn create_router(state: AppState) -> Router {
    // the document may be fetched by viewers hosted elsewhere
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);

    Router::new()
        .route("/openapi.yml", get(handlers::spec))
        // Viewer
        .route("/swagger-ui", get(handlers::viewer_redirect))
        .route("/swagger-ui/", get(handlers::index))
        .route("/swagger-ui/*path", get(handlers::viewer_file))
        .route("/swaggerui", get(handlers::legacy_redirect))
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
