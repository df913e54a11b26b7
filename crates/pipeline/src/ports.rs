//! Port traits implemented by the infrastructure crates.
//!
//! The stages depend only on these traits. `github` implements
//! [`IssueSource`]; `sheets` implements [`SpreadsheetStore`]. Tests substitute
//! in-memory implementations.

use async_trait::async_trait;

use crate::formatting::FormatOperation;
use crate::{Issue, RepositoryId, Row, SyncError, TabMetadata, TabName};

/// Reads issues from the tracker.
#[async_trait]
pub trait IssueSource: Send + Sync {
    /// Returns every issue of `repository` that is not a pull request, most
    /// recently updated first.
    ///
    /// Any failed page aborts the listing; no partial result is returned.
    async fn list_issues(&self, repository: &RepositoryId) -> Result<Vec<Issue>, SyncError>;
}

/// Reads and rewrites one spreadsheet document.
#[async_trait]
pub trait SpreadsheetStore: Send + Sync {
    /// Metadata of every tab in the document.
    async fn list_tabs(&self) -> Result<Vec<TabMetadata>, SyncError>;

    /// The tab's cell grid, header row first. Trailing empty cells and rows may
    /// be omitted, so rows can be ragged.
    async fn read_grid(&self, tab: &TabName) -> Result<Vec<Row>, SyncError>;

    /// Clears the tab's addressed range and writes `values` from the top-left
    /// cell in a single bulk write.
    async fn replace_grid(&self, tab: &TabName, values: &[Row]) -> Result<(), SyncError>;

    /// Applies `operations` as one batch, in order.
    async fn apply_operations(&self, operations: &[FormatOperation]) -> Result<(), SyncError>;
}
