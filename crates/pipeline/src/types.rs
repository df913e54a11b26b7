//! Shared value types for the sync domain.
//!
//! Unlike the newtype identifiers in [`crate::identifiers`], these types carry
//! the data that flows between stages: issues read from the tracker, tab
//! metadata read from the spreadsheet, and the rows written back.

use serde::{Deserialize, Serialize};

use crate::{BandingId, IssueNumber, SheetId, SyncRunId, TabName};

/// One row of cells, in header-column order.
pub type Row = Vec<String>;

// ---------------------------------------------------------------------------
// Issues
// ---------------------------------------------------------------------------

/// A tracker issue as read from the source platform.
///
/// Pull requests never reach this type; the issue source drops them while
/// paginating. Timestamps are kept in the platform's own string format and
/// are passed through to the sheet unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number, unique within the repository.
    pub number: IssueNumber,
    /// Issue title. Empty when the platform omits it.
    pub title: String,
    /// `open` or `closed`, exactly as reported.
    pub state: String,
    /// Label names in the order reported.
    pub labels: Vec<String>,
    /// Assignee logins in the order reported.
    pub assignees: Vec<String>,
    /// Login of the user who opened the issue, when known.
    pub reporter: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
    /// Last-update timestamp.
    pub updated_at: String,
    /// Canonical web URL.
    pub url: String,
}

// ---------------------------------------------------------------------------
// Tabs
// ---------------------------------------------------------------------------

/// Metadata for one tab of a spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabMetadata {
    /// Stable numeric identifier.
    pub sheet_id: SheetId,
    /// Current display name.
    pub title: String,
    /// Number of rows in the tab's grid.
    pub row_count: u32,
    /// Number of columns in the tab's grid.
    pub column_count: u32,
    /// Alternating-colour bands currently installed on the tab.
    pub banded_ranges: Vec<BandingId>,
}

/// The authoritative identity of the tab a run targets.
///
/// Both halves refer to the same tab: the name addresses value ranges, the
/// identifier addresses structural operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabRef {
    /// Display name used in A1 ranges.
    pub name: TabName,
    /// Numeric identifier used by formatting requests.
    pub sheet_id: SheetId,
}

impl std::fmt::Display for TabRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (gid {})", self.name, self.sheet_id)
    }
}

// ---------------------------------------------------------------------------
// Run outcome
// ---------------------------------------------------------------------------

/// Summary of a completed synchronisation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Correlation id of the run.
    pub run_id: SyncRunId,
    /// The tab that was rewritten.
    pub tab: TabRef,
    /// Issues fetched from the tracker (pull requests excluded).
    pub issues_synced: usize,
    /// Data rows written (fetched issues plus orphans).
    pub rows_written: usize,
    /// Rows kept for issues absent from this fetch.
    pub orphaned_rows: usize,
    /// Required columns appended to an existing header this run.
    pub columns_added: usize,
}
