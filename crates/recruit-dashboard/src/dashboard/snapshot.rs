use super::aggregate::{aggregate, DashboardSummary, PipelineCounts};
use super::normalizer::{normalize_jobs, normalize_resumes};
use super::records::{JobRecord, ResumeRecord};
use super::source::{fetch_rows_or_empty, from_backend, RowSource, RowSourceError, Rows};
use crate::config::{DashboardConfig, SheetSource, SheetsConfig};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::fmt::Debug;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::debug;

pub trait Clock: Send + Sync + Debug {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Always reports the same instant. Used to make snapshots reproducible.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotLimits {
    pub jobs: usize,
    pub candidates: usize,
}

impl Default for SnapshotLimits {
    fn default() -> Self {
        Self {
            jobs: 10,
            candidates: 5,
        }
    }
}

impl From<&DashboardConfig> for SnapshotLimits {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            jobs: config.job_limit,
            candidates: config.candidate_limit,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub summary: DashboardSummary,
    pub pipeline: PipelineCounts,
    pub jobs: Vec<JobRecord>,
    pub recent_candidates: Vec<ResumeRecord>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub timestamp: DateTime<Utc>,
}

impl DashboardSnapshot {
    /// Aggregates over the full record lists, then keeps only the leading
    /// records for display.
    pub fn compose(
        mut jobs: Vec<JobRecord>,
        mut resumes: Vec<ResumeRecord>,
        limits: SnapshotLimits,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let aggregates = aggregate(&jobs, &resumes);
        jobs.truncate(limits.jobs);
        resumes.truncate(limits.candidates);

        Self {
            summary: aggregates.summary,
            pipeline: aggregates.pipeline,
            jobs,
            recent_candidates: resumes,
            timestamp,
        }
    }

    pub fn timestamp_iso(&self) -> String {
        format_timestamp(&self.timestamp)
    }
}

fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_timestamp<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(timestamp))
}

#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("{source_name} fetch did not complete: {detail}")]
    Fetch {
        source_name: &'static str,
        detail: String,
    },
}

/// Builds a fresh [`DashboardSnapshot`] per call. Holds no state between
/// calls, so it can be cloned freely across handlers.
#[derive(Debug, Clone)]
pub struct SnapshotAssembler {
    rows: Arc<dyn RowSource>,
    jobs: SheetSource,
    resumes: SheetSource,
    limits: SnapshotLimits,
    clock: Arc<dyn Clock>,
}

impl SnapshotAssembler {
    pub fn new(rows: Arc<dyn RowSource>, jobs: SheetSource, resumes: SheetSource) -> Self {
        Self {
            rows,
            jobs,
            resumes,
            limits: SnapshotLimits::default(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Wires the configured backend, sources and limits together.
    pub fn from_config(
        sheets: &SheetsConfig,
        dashboard: &DashboardConfig,
    ) -> Result<Self, RowSourceError> {
        let rows = from_backend(&sheets.backend)?;
        Ok(Self::new(rows, sheets.jobs.clone(), sheets.resumes.clone())
            .with_limits(SnapshotLimits::from(dashboard)))
    }

    pub fn with_limits(mut self, limits: SnapshotLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn row_source(&self) -> &Arc<dyn RowSource> {
        &self.rows
    }

    pub fn jobs_source(&self) -> &SheetSource {
        &self.jobs
    }

    pub fn resumes_source(&self) -> &SheetSource {
        &self.resumes
    }

    /// Fetches both grids concurrently. Each side degrades to no rows on its
    /// own; only a fetch task that dies outright fails the whole call.
    pub async fn fetch_rows(&self) -> Result<(Rows, Rows), DashboardError> {
        let jobs = self.spawn_fetch(self.jobs.clone());
        let resumes = self.spawn_fetch(self.resumes.clone());
        let (jobs, resumes) = tokio::join!(jobs, resumes);

        let jobs = jobs.map_err(|err| DashboardError::Fetch {
            source_name: "jobs",
            detail: err.to_string(),
        })?;
        let resumes = resumes.map_err(|err| DashboardError::Fetch {
            source_name: "resumes",
            detail: err.to_string(),
        })?;
        Ok((jobs, resumes))
    }

    pub async fn assemble(&self) -> Result<DashboardSnapshot, DashboardError> {
        let (job_rows, resume_rows) = self.fetch_rows().await?;

        let now = self.clock.now();
        let today = now.date_naive();
        let jobs = normalize_jobs(&job_rows, today);
        let resumes = normalize_resumes(&resume_rows, today);
        debug!(
            job_rows = job_rows.len(),
            resume_rows = resume_rows.len(),
            jobs = jobs.len(),
            resumes = resumes.len(),
            "normalized dashboard records"
        );

        Ok(DashboardSnapshot::compose(jobs, resumes, self.limits, now))
    }

    fn spawn_fetch(&self, source: SheetSource) -> JoinHandle<Rows> {
        let rows = Arc::clone(&self.rows);
        tokio::spawn(async move {
            fetch_rows_or_empty(rows.as_ref(), &source.spreadsheet_id, &source.range).await
        })
    }
}
