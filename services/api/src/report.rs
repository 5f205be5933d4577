use crate::infra::build_assembler;
use clap::{Args, ValueEnum};
use recruit_dashboard::config::{AppConfig, SheetSource};
use recruit_dashboard::dashboard::{DashboardSnapshot, PipelineStage, RowSource, RowSourceError};
use recruit_dashboard::error::AppError;
use recruit_dashboard::telemetry;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum SnapshotFormat {
    #[default]
    Json,
    Text,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SnapshotArgs {
    /// Output format for the snapshot
    #[arg(long, value_enum, default_value_t = SnapshotFormat::Json)]
    pub(crate) format: SnapshotFormat,
}

pub(crate) async fn run_snapshot(args: SnapshotArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(config.environment, &config.telemetry)?;

    let snapshot = build_assembler(&config)?.assemble().await?;
    match args.format {
        SnapshotFormat::Json => match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Snapshot payload unavailable: {err}"),
        },
        SnapshotFormat::Text => print!("{}", render_text(&snapshot)),
    }
    Ok(())
}

pub(crate) fn render_text(snapshot: &DashboardSnapshot) -> String {
    let summary = &snapshot.summary;
    let mut out = String::new();
    let _ = writeln!(out, "Recruiting dashboard ({})", snapshot.timestamp_iso());
    let _ = writeln!(
        out,
        "- {} open jobs | {} candidates ({} active) | {}% placement rate",
        summary.open_jobs,
        summary.total_candidates,
        summary.active_candidates,
        summary.placement_rate
    );

    let _ = writeln!(out, "\nPipeline");
    for stage in PipelineStage::ordered() {
        let _ = writeln!(
            out,
            "  - {}: {}",
            stage.label(),
            snapshot.pipeline.get(stage)
        );
    }

    let _ = writeln!(out, "\nJobs");
    if snapshot.jobs.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for job in &snapshot.jobs {
        let _ = writeln!(
            out,
            "  - {} {} | {} | {} | x{} | {}",
            job.id, job.title, job.department, job.location, job.headcount, job.status
        );
    }

    let _ = writeln!(out, "\nRecent candidates");
    if snapshot.recent_candidates.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for candidate in &snapshot.recent_candidates {
        let _ = writeln!(
            out,
            "  - {} {} -> {} | {}",
            candidate.id, candidate.name, candidate.position, candidate.status
        );
    }
    out
}

/// Reads each configured source directly, without the fail-soft wrapper, so
/// connectivity problems surface. Returns the last failure after printing
/// both sources.
pub(crate) async fn run_sources_check() -> Result<(), AppError> {
    let config = AppConfig::load()?;
    telemetry::init(config.environment, &config.telemetry)?;

    let assembler = build_assembler(&config)?;
    println!("Sheets backend: {}", config.sheets.backend.name());

    let mut failure = None;
    for (label, source) in [
        ("jobs", assembler.jobs_source()),
        ("resumes", assembler.resumes_source()),
    ] {
        let outcome = check_source(assembler.row_source().as_ref(), source).await;
        print!("{}", render_check(label, source, &outcome));
        if let Err(err) = outcome {
            failure = Some(err);
        }
    }

    match failure {
        Some(err) => Err(AppError::from(err)),
        None => Ok(()),
    }
}

async fn check_source(
    rows: &dyn RowSource,
    source: &SheetSource,
) -> Result<Vec<Vec<String>>, RowSourceError> {
    rows.fetch_range(&source.spreadsheet_id, &source.range).await
}

fn render_check(
    label: &str,
    source: &SheetSource,
    outcome: &Result<Vec<Vec<String>>, RowSourceError>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{label}: {} {}", source.spreadsheet_id, source.range);
    match outcome {
        Ok(rows) => {
            let _ = writeln!(out, "  rows: {}", rows.len());
            match rows.first() {
                Some(header) => {
                    let _ = writeln!(out, "  header: {}", header.join(" | "));
                }
                None => {
                    let _ = writeln!(out, "  header: (empty)");
                }
            }
        }
        Err(err) => {
            let _ = writeln!(out, "  unavailable: {err}");
        }
    }
    out
}
