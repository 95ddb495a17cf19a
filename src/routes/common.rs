//! Liveness, readiness and build info. Mounted at the root, outside `/api/v1`.

use crate::error::AppError;
use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HealthStatus {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    database: Option<&'static str>,
}

#[derive(Serialize)]
struct BuildInfo {
    name: &'static str,
    version: &'static str,
}

async fn liveness() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        database: None,
    })
}

/// Fails through `AppError` (503 `database_unavailable`) when the pool cannot run `SELECT 1`.
async fn readiness(State(state): State<AppState>) -> Result<Json<HealthStatus>, AppError> {
    state.store.ping().await?;
    Ok(Json(HealthStatus {
        status: "ok",
        database: Some("ok"),
    }))
}

async fn build_info() -> Json<BuildInfo> {
    Json(BuildInfo {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(liveness))
        .route("/ready", get(readiness))
        .route("/version", get(build_info))
        .with_state(state)
}
