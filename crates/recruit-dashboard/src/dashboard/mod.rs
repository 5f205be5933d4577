//! Recruiting dashboard: spreadsheet rows in, summary snapshot out.

mod aggregate;
mod normalizer;
mod records;
pub mod router;
pub mod schema;
mod snapshot;
pub mod source;
pub mod status;

pub use aggregate::{aggregate, placement_rate, Aggregates, DashboardSummary, PipelineCounts};
pub use normalizer::{normalize_jobs, normalize_resumes};
pub use records::{JobRecord, ResumeRecord};
pub use router::dashboard_router;
pub use snapshot::{
    Clock, DashboardError, DashboardSnapshot, FixedClock, SnapshotAssembler, SnapshotLimits,
    SystemClock,
};
pub use source::{fetch_rows_or_empty, RowSource, RowSourceError, Rows, SheetRange};
pub use status::PipelineStage;
