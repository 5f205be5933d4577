use super::payload::ValueRange;
use super::{RowSource, RowSourceError, Rows, SheetRange};
use crate::config::SheetsCommandConfig;
use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

/// Shells out to a Sheets CLI (`gog` by default):
/// `<program> sheets get <id> <range> [--account <account>] --json`.
#[derive(Debug, Clone)]
pub struct CommandRowSource {
    program: String,
    account: Option<String>,
}

impl CommandRowSource {
    pub fn new(config: &SheetsCommandConfig) -> Self {
        Self {
            program: config.program.clone(),
            account: config.account.clone(),
        }
    }

    fn arguments<'a>(&'a self, spreadsheet_id: &'a str, range: &'a SheetRange) -> Vec<&'a str> {
        let mut args = vec!["sheets", "get", spreadsheet_id, range.as_str()];
        if let Some(account) = &self.account {
            args.extend(["--account", account.as_str()]);
        }
        args.push("--json");
        args
    }
}

#[async_trait]
impl RowSource for CommandRowSource {
    async fn fetch_range(
        &self,
        spreadsheet_id: &str,
        range: &SheetRange,
    ) -> Result<Rows, RowSourceError> {
        let args = self.arguments(spreadsheet_id, range);
        debug!(program = %self.program, ?args, "invoking sheets cli");

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .map_err(|source| RowSourceError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(RowSourceError::Command {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let payload: ValueRange = serde_json::from_slice(&output.stdout)?;
        Ok(payload.into_rows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arguments_follow_cli_contract() {
        let range = SheetRange::parse("工作表1!A1:H100").expect("range");
        let with_account = CommandRowSource::new(&SheetsCommandConfig {
            program: "gog".to_string(),
            account: Some("recruiting@example.com".to_string()),
        });
        assert_eq!(
            with_account.arguments("sheet-id", &range),
            vec![
                "sheets",
                "get",
                "sheet-id",
                "工作表1!A1:H100",
                "--account",
                "recruiting@example.com",
                "--json"
            ]
        );

        let without_account = CommandRowSource::new(&SheetsCommandConfig {
            program: "gog".to_string(),
            account: None,
        });
        assert_eq!(
            without_account.arguments("sheet-id", &range),
            vec!["sheets", "get", "sheet-id", "工作表1!A1:H100", "--json"]
        );
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let source = CommandRowSource::new(&SheetsCommandConfig {
            program: "definitely-not-a-sheets-cli".to_string(),
            account: None,
        });
        let range = SheetRange::parse("A1:B2").expect("range");

        let error = source
            .fetch_range("sheet-id", &range)
            .await
            .expect_err("program does not exist");
        assert!(matches!(error, RowSourceError::Spawn { .. }));
    }
}
