//! `issue-sheet-sync` entry point.
//!
//! Composition root: validates configuration, wires observability, builds the
//! GitHub and Sheets adapters, runs one [`stages::SyncJob`], and maps the
//! outcome onto the exit code contract.
//!
//! - Success: exit 0 and a single line on stdout,
//!   `Synced <N> GitHub issues into '<tab>'.`
//! - Failure: exit 1 and one line on stderr. API status failures name the
//!   service and status; a missing tab gets its own hint; anything else is
//!   prefixed with `Sync failed:`.
//!
//! Logs are JSON on stderr so stdout carries only the summary.

mod config;
mod telemetry;

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::Parser;
use github::GithubIssueClient;
use pipeline::{SyncError, SyncReport, SyncRunId};
use sheets::{ServiceAccountAuth, SheetsClient};
use stages::{SyncJob, SyncRequest};
use tracing::{error, info};

use crate::config::{Cli, SyncConfig};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => match error.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                let _ = error.print();
                return ExitCode::SUCCESS;
            }
            _ => {
                eprintln!("Sync failed: {error}");
                return ExitCode::FAILURE;
            }
        },
    };

    let telemetry = match telemetry::init() {
        Ok(telemetry) => telemetry,
        Err(error) => {
            eprintln!("Sync failed: {error:#}");
            return ExitCode::FAILURE;
        }
    };

    let code = match run(cli).await {
        Ok(report) => {
            println!("{}", summary_line(&report));
            ExitCode::SUCCESS
        }
        Err(failure) => {
            error!(error = %failure, status = ?failure.status(), "Sync failed");
            eprintln!("{}", failure_message(&failure));
            ExitCode::FAILURE
        }
    };

    telemetry.shutdown().await;
    code
}

async fn run(cli: Cli) -> Result<SyncReport, SyncError> {
    let config = SyncConfig::try_from(cli)?;
    info!(
        repository = %config.repository,
        spreadsheet = %config.spreadsheet_id,
        tab = %config.tab_name,
        gid = ?config.sheet_gid,
        "Configuration loaded"
    );

    let issues = GithubIssueClient::new(
        &config.github_api_url,
        &config.github_token,
        config.request_timeout,
    )?;
    let auth = ServiceAccountAuth::new(config.service_account, config.request_timeout)?;
    let sheet = SheetsClient::with_service_account(
        &config.sheets_api_url,
        config.spreadsheet_id,
        auth,
        config.request_timeout,
    )?;

    let request = SyncRequest {
        run_id: SyncRunId::new_random(),
        repository: config.repository,
        tab_name: config.tab_name,
        sheet_id: config.sheet_gid,
    };
    SyncJob::new(&issues, &sheet).run(&request).await
}

fn summary_line(report: &SyncReport) -> String {
    format!(
        "Synced {} GitHub issues into '{}'.",
        report.issues_synced, report.tab.name
    )
}

/// The stderr line for a failed run.
fn failure_message(error: &SyncError) -> String {
    match error {
        SyncError::ApiStatus { .. } | SyncError::TabNotFound { .. } => error.to_string(),
        other => format!("Sync failed: {other}"),
    }
}
