//! Row Reconciler stage.

use pipeline::reconcile::split_grid;
use pipeline::{reconcile, Header, Issue, Row, SpreadsheetStore, SyncError, TabRef};
use tracing::{info, instrument, warn};

/// The full replacement content of a tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconciledTable {
    /// Derived header, including any appended required columns.
    pub header: Header,
    /// Data rows: fetched issues first, then orphans.
    pub rows: Vec<Row>,
    /// Count of orphan rows at the end of `rows`.
    pub orphaned: usize,
}

impl ReconciledTable {
    /// The grid to write: header row followed by the data rows.
    pub fn values(&self) -> Vec<Row> {
        let mut values = Vec::with_capacity(self.rows.len() + 1);
        values.push(self.header.to_row());
        values.extend(self.rows.iter().cloned());
        values
    }
}

/// Reads the tab's current grid and merges `issues` into it.
#[instrument(name = "reconcile_rows", skip_all, fields(tab = %tab.name))]
pub async fn reconcile_tab(
    store: &dyn SpreadsheetStore,
    tab: &TabRef,
    issues: &[Issue],
) -> Result<ReconciledTable, SyncError> {
    let grid = store.read_grid(&tab.name).await?;
    let (existing_header, existing_rows) = split_grid(grid);

    let header = Header::derive(&existing_header);
    if existing_header.is_empty() {
        info!("Tab has no header row; writing canonical header");
    } else if header.appended() > 0 {
        warn!(
            added = header.appended(),
            "Appending missing required columns to existing header"
        );
    }

    let merged = reconcile(&header, &existing_rows, issues);
    if merged.orphaned > 0 {
        warn!(
            orphaned = merged.orphaned,
            "Keeping rows for issues absent from this fetch"
        );
    }
    info!(
        existing = existing_rows.len(),
        rows = merged.rows.len(),
        "Reconciled rows"
    );

    Ok(ReconciledTable {
        header,
        rows: merged.rows,
        orphaned: merged.orphaned,
    })
}
