use crate::infra::AppState;
use crate::view::dashboard_page;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use recruit_dashboard::config::DashboardConfig;
use recruit_dashboard::dashboard::{dashboard_router, SnapshotAssembler};
use serde_json::json;

/// Dashboard API plus the page and operational endpoints. The caller layers
/// `Extension<AppState>` on top.
pub(crate) fn build_router(assembler: SnapshotAssembler, dashboard: &DashboardConfig) -> Router {
    dashboard_router(assembler, dashboard.revalidate_secs)
        .route("/", get(dashboard_page))
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
