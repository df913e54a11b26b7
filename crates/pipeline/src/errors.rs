//! Error type for the sync pipeline.
//!
//! [`SyncError`] is shared by every layer: the adapters produce the
//! `ApiStatus`, `Transport` and `InvalidResponse` variants, the domain produces
//! `TabNotFound`, and the binary produces the configuration variants. Nothing in
//! the pipeline recovers locally; every error reaches the entry point, which
//! chooses the presentation from the variant.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::SheetId;

/// The remote system an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ApiService {
    /// The issue tracker's REST API.
    GitHub,
    /// The spreadsheet REST API.
    GoogleSheets,
    /// The OAuth token endpoint used to authorise spreadsheet calls.
    GoogleAuth,
}

impl std::fmt::Display for ApiService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::GitHub => "GitHub",
            Self::GoogleSheets => "Google Sheets",
            Self::GoogleAuth => "Google OAuth",
        };
        f.write_str(label)
    }
}

/// Errors that abort a synchronisation run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncError {
    /// A required setting is absent or blank.
    ///
    /// Produced before any network call.
    #[error("Missing required environment variable: {name}")]
    MissingConfiguration {
        /// Environment variable name of the missing setting.
        name: String,
    },

    /// A setting is present but unusable (malformed repository slug,
    /// non-numeric tab id, unreadable credential blob).
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration {
        /// Description of the problem.
        message: String,
    },

    /// A remote API answered with a non-success HTTP status.
    #[error("{service} API request failed (status={status}): {message}")]
    ApiStatus {
        /// Which remote system answered.
        service: ApiService,
        /// HTTP status code.
        status: u16,
        /// Operation name and a bounded excerpt of the response body.
        message: String,
    },

    /// A request could not be completed (connection, TLS, or timeout failure).
    #[error("{service} request could not be completed: {message}")]
    Transport {
        /// Which remote system was being called.
        service: ApiService,
        /// Transport error description.
        message: String,
    },

    /// A remote API answered successfully but the body could not be decoded.
    #[error("{service} returned an unexpected response: {message}")]
    InvalidResponse {
        /// Which remote system answered.
        service: ApiService,
        /// Decoding error description.
        message: String,
    },

    /// Neither the configured tab id nor the configured tab name exists.
    #[error(
        "Sheet tab not found (name='{preferred}', gid={}); set GOOGLE_SHEET_TAB or GOOGLE_SHEET_GID to an existing tab",
        display_gid(.sheet_id)
    )]
    TabNotFound {
        /// The configured tab name.
        preferred: String,
        /// The configured tab id, if any.
        sheet_id: Option<SheetId>,
    },
}

fn display_gid(sheet_id: &Option<SheetId>) -> String {
    sheet_id.map_or_else(|| "unset".to_string(), |id| id.to_string())
}

impl SyncError {
    /// Returns the HTTP status code when the error came from a remote response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Trims a response body and bounds it to `limit` characters for error
/// messages.
pub fn truncate_for_error(body: &str, limit: usize) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= limit {
        return trimmed.to_string();
    }
    let mut truncated: String = trimmed.chars().take(limit).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_status_message_carries_service_and_code() {
        let error = SyncError::ApiStatus {
            service: ApiService::GitHub,
            status: 404,
            message: "list issues: Not Found".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "GitHub API request failed (status=404): list issues: Not Found"
        );
        assert_eq!(error.status(), Some(404));
    }

    #[test]
    fn tab_not_found_names_both_lookup_keys() {
        let error = SyncError::TabNotFound {
            preferred: "Bug Tracker".to_string(),
            sheet_id: Some(SheetId::new(17)),
        };
        let message = error.to_string();
        assert!(message.contains("name='Bug Tracker'"));
        assert!(message.contains("gid=17"));
        assert_eq!(error.status(), None);
    }

    #[test]
    fn truncate_for_error_bounds_long_bodies() {
        assert_eq!(truncate_for_error("  short  ", 10), "short");
        assert_eq!(truncate_for_error("abcdef", 3), "abc...");
    }
}
