use metrics_exporter_prometheus::PrometheusHandle;
use recruit_dashboard::config::AppConfig;
use recruit_dashboard::dashboard::SnapshotAssembler;
use recruit_dashboard::error::AppError;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) poll_secs: u64,
}

impl AppState {
    pub(crate) fn new(metrics: PrometheusHandle, poll_secs: u64) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(metrics),
            poll_secs,
        }
    }
}

/// Builds the snapshot assembler for the configured backend and sources.
pub(crate) fn build_assembler(config: &AppConfig) -> Result<SnapshotAssembler, AppError> {
    let assembler = SnapshotAssembler::from_config(&config.sheets, &config.dashboard)?;
    debug!(
        backend = config.sheets.backend.name(),
        jobs = %config.sheets.jobs.spreadsheet_id,
        resumes = %config.sheets.resumes.spreadsheet_id,
        "row source configured"
    );
    Ok(assembler)
}
