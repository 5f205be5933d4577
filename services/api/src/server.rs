use crate::cli::ServeArgs;
use crate::infra::{build_assembler, AppState};
use crate::routes::build_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use recruit_dashboard::config::AppConfig;
use recruit_dashboard::error::AppError;
use recruit_dashboard::telemetry;
use std::sync::atomic::Ordering;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(config.environment, &config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let app_state = AppState::new(prometheus_handle, config.dashboard.poll_secs);
    let readiness_flag = app_state.readiness.clone();

    let assembler = build_assembler(&config)?;
    let app = build_router(assembler, &config.dashboard)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        backend = config.sheets.backend.name(),
        "recruiting dashboard ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
