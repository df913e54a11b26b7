//! Command line and environment configuration.
//!
//! Every option is optional at the clap layer so that a missing value is
//! reported through [`SyncError::MissingConfiguration`] rather than a clap usage
//! error with a different exit code.

use std::time::Duration;

use clap::Parser;
use pipeline::{RepositoryId, SheetId, SpreadsheetId, SyncError, TabName};
use sheets::ServiceAccountKey;

pub(crate) const DEFAULT_TAB: &str = "Bug Tracker";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Default, Parser)]
#[command(
    name = "issue-sheet-sync",
    about = "Mirror a repository's GitHub issues into a Google Sheets tab",
    version
)]
pub(crate) struct Cli {
    #[arg(
        long = "github-token",
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        help = "Token used to list repository issues"
    )]
    pub(crate) github_token: Option<String>,

    #[arg(
        long = "github-repository",
        env = "GITHUB_REPOSITORY",
        help = "Repository in owner/name form"
    )]
    pub(crate) github_repository: Option<String>,

    #[arg(long = "sheet-id", env = "GOOGLE_SHEET_ID", help = "Spreadsheet id")]
    pub(crate) sheet_id: Option<String>,

    #[arg(
        long = "sheet-tab",
        env = "GOOGLE_SHEET_TAB",
        help = "Tab name used when no gid is given or the gid is not found [default: Bug Tracker]"
    )]
    pub(crate) sheet_tab: Option<String>,

    #[arg(
        long = "sheet-gid",
        env = "GOOGLE_SHEET_GID",
        help = "Numeric tab id preferred over the tab name"
    )]
    pub(crate) sheet_gid: Option<String>,

    #[arg(
        long = "service-account-json",
        env = "GOOGLE_SERVICE_ACCOUNT_JSON",
        hide_env_values = true,
        help = "Service account key JSON with access to the spreadsheet"
    )]
    pub(crate) service_account_json: Option<String>,

    #[arg(
        long = "github-api-url",
        env = "GITHUB_API_URL",
        help = "GitHub REST base URL [default: https://api.github.com]"
    )]
    pub(crate) github_api_url: Option<String>,

    #[arg(
        long = "sheets-api-url",
        env = "GOOGLE_SHEETS_API_URL",
        help = "Sheets REST base URL [default: https://sheets.googleapis.com/v4]"
    )]
    pub(crate) sheets_api_url: Option<String>,

    #[arg(
        long = "request-timeout-secs",
        env = "SYNC_REQUEST_TIMEOUT_SECS",
        help = "Per-request timeout in seconds [default: 30]"
    )]
    pub(crate) request_timeout_secs: Option<String>,
}

/// Validated settings for one run.
pub(crate) struct SyncConfig {
    pub(crate) github_token: String,
    pub(crate) repository: RepositoryId,
    pub(crate) spreadsheet_id: SpreadsheetId,
    pub(crate) tab_name: TabName,
    pub(crate) sheet_gid: Option<SheetId>,
    pub(crate) service_account: ServiceAccountKey,
    pub(crate) github_api_url: String,
    pub(crate) sheets_api_url: String,
    pub(crate) request_timeout: Duration,
}

impl std::fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncConfig")
            .field("github_token", &"<redacted>")
            .field("repository", &self.repository)
            .field("spreadsheet_id", &self.spreadsheet_id)
            .field("tab_name", &self.tab_name)
            .field("sheet_gid", &self.sheet_gid)
            .field("service_account", &self.service_account)
            .field("github_api_url", &self.github_api_url)
            .field("sheets_api_url", &self.sheets_api_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

fn missing(name: &str) -> SyncError {
    SyncError::MissingConfiguration {
        name: name.to_string(),
    }
}

fn required(value: Option<String>, name: &str) -> Result<String, SyncError> {
    present(value).ok_or_else(|| missing(name))
}

impl TryFrom<Cli> for SyncConfig {
    type Error = SyncError;

    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let github_token = required(cli.github_token, "GITHUB_TOKEN")?;

        let slug = required(cli.github_repository, "GITHUB_REPOSITORY")?;
        let repository =
            RepositoryId::parse(&slug).ok_or_else(|| SyncError::InvalidConfiguration {
                message: format!("GITHUB_REPOSITORY must look like owner/name, got '{slug}'"),
            })?;

        let spreadsheet_id = SpreadsheetId::new(required(cli.sheet_id, "GOOGLE_SHEET_ID")?)
            .ok_or_else(|| missing("GOOGLE_SHEET_ID"))?;

        let tab_name = present(cli.sheet_tab)
            .and_then(TabName::new)
            .or_else(|| TabName::new(DEFAULT_TAB))
            .ok_or_else(|| missing("GOOGLE_SHEET_TAB"))?;

        let sheet_gid = present(cli.sheet_gid)
            .map(|gid| {
                gid.parse::<i64>()
                    .map(SheetId::new)
                    .map_err(|_| SyncError::InvalidConfiguration {
                        message: format!("GOOGLE_SHEET_GID must be an integer, got '{gid}'"),
                    })
            })
            .transpose()?;

        let service_account = ServiceAccountKey::from_json(&required(
            cli.service_account_json,
            "GOOGLE_SERVICE_ACCOUNT_JSON",
        )?)?;

        let request_timeout = match present(cli.request_timeout_secs) {
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(SyncError::InvalidConfiguration {
                        message: format!(
                            "SYNC_REQUEST_TIMEOUT_SECS must be a positive integer, got '{raw}'"
                        ),
                    })
                }
            },
        };

        Ok(Self {
            github_token,
            repository,
            spreadsheet_id,
            tab_name,
            sheet_gid,
            service_account,
            github_api_url: present(cli.github_api_url)
                .unwrap_or_else(|| github::DEFAULT_API_BASE.to_string()),
            sheets_api_url: present(cli.sheets_api_url)
                .unwrap_or_else(|| sheets::DEFAULT_API_BASE.to_string()),
            request_timeout,
        })
    }
}
