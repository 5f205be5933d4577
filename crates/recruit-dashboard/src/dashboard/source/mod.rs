//! Row sources: the boundary between the dashboard and whatever spreadsheet
//! store holds the jobs and resumes.
//!
//! Every backend answers the same question (the cell grid for one range of one
//! spreadsheet) and reports failures as [`RowSourceError`]. The dashboard does
//! not consume those errors directly; it goes through [`fetch_rows_or_empty`],
//! which logs the failure and carries on with no rows.

mod api;
mod command;
mod csv_file;
mod payload;
pub mod range;

pub use self::api::SheetsApiRowSource;
pub use self::command::CommandRowSource;
pub use self::csv_file::CsvRowSource;
pub use range::{CellBounds, RangeParseError, SheetRange};

use crate::config::SheetsBackend;
use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

/// Ordered rows of ordered string cells. Rows may be ragged.
pub type Rows = Vec<Vec<String>>;

#[derive(Debug, thiserror::Error)]
pub enum RowSourceError {
    #[error("sheets request failed: {0}")]
    Http(reqwest::Error),
    #[error("sheets authorization failed: {0}")]
    Auth(String),
    #[error("sheets api answered {status}: {body}")]
    Status { status: u16, body: String },
    #[error("invalid sheets endpoint '{0}'")]
    Endpoint(String),
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("'{program}' exited with {status}: {stderr}")]
    Command {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("malformed sheet payload: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid csv data: {0}")]
    Csv(#[from] csv::Error),
    #[error("no rows registered for spreadsheet '{0}'")]
    UnknownSpreadsheet(String),
}

#[async_trait]
pub trait RowSource: Send + Sync + Debug {
    async fn fetch_range(
        &self,
        spreadsheet_id: &str,
        range: &SheetRange,
    ) -> Result<Rows, RowSourceError>;
}

/// Fail-soft fetch: any transport error is logged and becomes an empty grid,
/// so callers cannot tell "no data" apart from "fetch failed".
pub async fn fetch_rows_or_empty(
    source: &dyn RowSource,
    spreadsheet_id: &str,
    range: &SheetRange,
) -> Rows {
    match source.fetch_range(spreadsheet_id, range).await {
        Ok(rows) => rows,
        Err(error) => {
            warn!(
                spreadsheet_id,
                range = %range,
                %error,
                "row source unavailable, continuing with no rows"
            );
            Vec::new()
        }
    }
}

/// Builds the row source selected by configuration.
pub fn from_backend(backend: &SheetsBackend) -> Result<Arc<dyn RowSource>, RowSourceError> {
    let source: Arc<dyn RowSource> = match backend {
        SheetsBackend::Api(config) => Arc::new(SheetsApiRowSource::new(config)?),
        SheetsBackend::Command(config) => Arc::new(CommandRowSource::new(config)),
        SheetsBackend::Csv(config) => Arc::new(CsvRowSource::new(&config.directory)),
    };
    Ok(source)
}

/// In-memory grids keyed by spreadsheet id. Ranges are applied with
/// [`SheetRange::clip`], the same way the CSV backend does.
#[derive(Debug, Default, Clone)]
pub struct StaticRowSource {
    sheets: HashMap<String, Rows>,
}

impl StaticRowSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, spreadsheet_id: impl Into<String>, rows: Rows) -> Self {
        self.sheets.insert(spreadsheet_id.into(), rows);
        self
    }
}

#[async_trait]
impl RowSource for StaticRowSource {
    async fn fetch_range(
        &self,
        spreadsheet_id: &str,
        range: &SheetRange,
    ) -> Result<Rows, RowSourceError> {
        let rows = self
            .sheets
            .get(spreadsheet_id)
            .cloned()
            .ok_or_else(|| RowSourceError::UnknownSpreadsheet(spreadsheet_id.to_string()))?;
        Ok(range.clip(rows))
    }
}
