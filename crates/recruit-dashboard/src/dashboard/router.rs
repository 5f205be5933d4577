use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tracing::error;

use super::snapshot::{DashboardError, SnapshotAssembler};
use crate::error::AppError;

pub const DASHBOARD_PATH: &str = "/api/dashboard";

struct DashboardRoutes {
    assembler: SnapshotAssembler,
    cache_control: String,
}

/// `GET` serves a fresh snapshot with a revalidation window; `POST` forces the
/// same recomputation for on-demand refresh and is never cached.
pub fn dashboard_router(assembler: SnapshotAssembler, revalidate_secs: u64) -> Router {
    let routes = Arc::new(DashboardRoutes {
        assembler,
        cache_control: format!("public, max-age={revalidate_secs}"),
    });

    Router::new()
        .route(DASHBOARD_PATH, get(read_handler).post(refresh_handler))
        .with_state(routes)
}

async fn read_handler(State(routes): State<Arc<DashboardRoutes>>) -> Result<Response, AppError> {
    render(&routes.assembler, routes.cache_control.clone()).await
}

async fn refresh_handler(State(routes): State<Arc<DashboardRoutes>>) -> Result<Response, AppError> {
    render(&routes.assembler, "no-store".to_string()).await
}

async fn render(
    assembler: &SnapshotAssembler,
    cache_control: String,
) -> Result<Response, AppError> {
    let snapshot = assembler.assemble().await.map_err(|err| {
        error!(error = %err, "failed to assemble dashboard snapshot");
        AppError::from(err)
    })?;

    Ok((
        StatusCode::OK,
        [(header::CACHE_CONTROL, cache_control)],
        Json(snapshot),
    )
        .into_response())
}

/// Body and headers for a snapshot that could not be assembled.
pub(crate) fn failure_response(err: &DashboardError) -> Response {
    let payload = json!({
        "error": "Failed to load dashboard data",
        "details": err.to_string(),
    });
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        [(header::CACHE_CONTROL, "no-store".to_string())],
        Json(payload),
    )
        .into_response()
}
