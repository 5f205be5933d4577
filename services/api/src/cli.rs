use crate::report::{run_snapshot, run_sources_check, SnapshotArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use recruit_dashboard::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Recruiting Dashboard",
    about = "Serve or print the recruiting dashboard built from the jobs and resumes sheets",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Assemble one dashboard snapshot and print it
    Snapshot(SnapshotArgs),
    /// Inspect the configured spreadsheet sources
    Sources {
        #[command(subcommand)]
        command: SourcesCommand,
    },
}

#[derive(Subcommand, Debug)]
enum SourcesCommand {
    /// Read both sources and print row counts and header rows
    Check,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Snapshot(args) => run_snapshot(args).await,
        Command::Sources {
            command: SourcesCommand::Check,
        } => run_sources_check().await,
    }
}
