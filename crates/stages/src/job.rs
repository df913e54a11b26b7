//! The sync job: one pass of reader → locator → reconciler → writer.

use pipeline::{
    IssueSource, RepositoryId, SheetId, SpreadsheetStore, SyncError, SyncReport, SyncRunId,
    TabName,
};
use tracing::{info, instrument};

use crate::{locator, reader, reconciler, writer};

/// What a run synchronises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    /// Correlation id recorded on the run span.
    pub run_id: SyncRunId,
    /// Repository whose issues are mirrored.
    pub repository: RepositoryId,
    /// Tab name used when `sheet_id` is unset or not found.
    pub tab_name: TabName,
    /// Preferred tab id.
    pub sheet_id: Option<SheetId>,
}

/// Drives one synchronisation run against an issue source and a spreadsheet.
pub struct SyncJob<'a> {
    source: &'a dyn IssueSource,
    store: &'a dyn SpreadsheetStore,
}

impl<'a> SyncJob<'a> {
    pub fn new(source: &'a dyn IssueSource, store: &'a dyn SpreadsheetStore) -> Self {
        Self { source, store }
    }

    /// Runs every stage once, in order.
    ///
    /// # Errors
    ///
    /// Returns the first stage error unchanged. Failures before the bulk write
    /// leave the tab untouched.
    #[instrument(
        name = "sync_run",
        skip_all,
        fields(run_id = %request.run_id, repository = %request.repository)
    )]
    pub async fn run(&self, request: &SyncRequest) -> Result<SyncReport, SyncError> {
        let issues = reader::read_issues(self.source, &request.repository).await?;
        let target = locator::locate_tab(self.store, &request.tab_name, request.sheet_id).await?;
        let table = reconciler::reconcile_tab(self.store, &target.tab, &issues).await?;
        writer::write_table(self.store, &target, &table).await?;
        writer::format_table(self.store, &target, &table).await?;

        let report = SyncReport {
            run_id: request.run_id,
            tab: target.tab,
            issues_synced: issues.len(),
            rows_written: table.rows.len(),
            orphaned_rows: table.orphaned,
            columns_added: table.header.appended(),
        };
        info!(
            issues = report.issues_synced,
            rows = report.rows_written,
            orphaned = report.orphaned_rows,
            "Sync complete"
        );
        Ok(report)
    }
}
