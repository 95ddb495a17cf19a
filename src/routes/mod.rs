//! Router assembly.

mod common;
mod restaurants;

pub use common::common_routes;
pub use restaurants::restaurant_routes;

use crate::config::ServerConfig;
use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub const API_PREFIX: &str = "/api/v1";

/// Full application: common routes at the root, restaurant API under `/api/v1`,
/// with request tracing and permissive CORS. The body limit is enforced by the `Json`
/// extractor, so an oversized body is answered with the error envelope and CORS headers.
pub fn app(state: AppState, config: &ServerConfig) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest(API_PREFIX, restaurant_routes(state))
        .layer(DefaultBodyLimit::max(config.body_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}
