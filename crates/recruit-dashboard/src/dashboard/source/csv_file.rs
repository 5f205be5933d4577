use super::{RowSource, RowSourceError, Rows, SheetRange};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Serves exported sheets from `<directory>/<spreadsheet id>.csv`.
///
/// Files are read without a header so row 0 stays the sheet's header row, and
/// the requested range is applied afterwards. The sheet name part of the range
/// is ignored; one file holds one sheet.
#[derive(Debug, Clone)]
pub struct CsvRowSource {
    directory: PathBuf,
}

impl CsvRowSource {
    pub fn new(directory: impl AsRef<Path>) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, spreadsheet_id: &str) -> PathBuf {
        self.directory.join(format!("{spreadsheet_id}.csv"))
    }
}

pub(crate) fn parse_grid(bytes: &[u8]) -> Result<Rows, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

#[async_trait]
impl RowSource for CsvRowSource {
    async fn fetch_range(
        &self,
        spreadsheet_id: &str,
        range: &SheetRange,
    ) -> Result<Rows, RowSourceError> {
        let path = self.path_for(spreadsheet_id);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| RowSourceError::Io { path, source })?;
        let rows = parse_grid(&bytes)?;
        Ok(range.clip(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_grid_keeps_ragged_rows_and_header() {
        let rows = parse_grid("職位,部門,人數\n後端工程師,研發\n\"PM, Growth\",產品,2\n".as_bytes())
            .expect("csv parses");

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec!["職位", "部門", "人數"]);
        assert_eq!(rows[1], vec!["後端工程師", "研發"]);
        assert_eq!(rows[2][0], "PM, Growth");
    }
}
