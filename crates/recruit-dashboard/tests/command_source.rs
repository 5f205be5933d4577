#![cfg(unix)]

use recruit_dashboard::config::SheetsCommandConfig;
use recruit_dashboard::dashboard::source::CommandRowSource;
use recruit_dashboard::dashboard::{RowSource, RowSourceError, SheetRange};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).expect("write script");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).expect("chmod script");
    path
}

// One test per binary: executing a freshly written script races with other
// threads forking while the file is still open.
#[tokio::test]
async fn command_backend_runs_the_sheets_cli() {
    let dir = tempfile::tempdir().expect("tempdir");
    let args_file = dir.path().join("args.txt");
    let ok = write_script(
        dir.path(),
        "gog-ok",
        &format!(
            "printf '%s\\n' \"$@\" > '{}'\n\
             echo '{{\"range\":\"x\",\"values\":[[\"職位名稱\",\"部門\"],[\"後端工程師\",\"研發\",3]]}}'",
            args_file.display()
        ),
    );
    let failing = write_script(dir.path(), "gog-fail", "echo 'token expired' >&2\nexit 3");

    let range = SheetRange::parse("工作表1!A1:K100").expect("range");
    let source = CommandRowSource::new(&SheetsCommandConfig {
        program: ok.display().to_string(),
        account: Some("recruiting@example.com".to_string()),
    });

    let rows = source.fetch_range("sheet-id", &range).await.expect("rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1], vec!["後端工程師", "研發", "3"]);

    let recorded = fs::read_to_string(&args_file).expect("args recorded");
    assert_eq!(
        recorded.lines().collect::<Vec<_>>(),
        vec![
            "sheets",
            "get",
            "sheet-id",
            "工作表1!A1:K100",
            "--account",
            "recruiting@example.com",
            "--json"
        ]
    );

    let source = CommandRowSource::new(&SheetsCommandConfig {
        program: failing.display().to_string(),
        account: None,
    });
    match source.fetch_range("sheet-id", &range).await {
        Err(RowSourceError::Command { stderr, .. }) => assert_eq!(stderr, "token expired"),
        other => panic!("expected command failure, got {other:?}"),
    }
}
