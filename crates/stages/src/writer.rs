//! Sheet Writer / Formatter stage.
//!
//! Writing and formatting are separate remote batches. A formatting failure
//! leaves correct data behind with partial formatting; the next run replays the
//! whole plan.

use pipeline::formatting::{format_plan, grid_expansion};
use pipeline::{ResolvedTab, SpreadsheetStore, SyncError};
use tracing::{debug, info, instrument};

use crate::ReconciledTable;

/// Grows the grid if needed, then replaces the tab's content with `table`.
#[instrument(name = "write_table", skip_all, fields(tab = %target.tab.name))]
pub async fn write_table(
    store: &dyn SpreadsheetStore,
    target: &ResolvedTab,
    table: &ReconciledTable,
) -> Result<(), SyncError> {
    let expansion = grid_expansion(&target.metadata, &table.header, table.rows.len());
    if !expansion.is_empty() {
        debug!(operations = expansion.len(), "Expanding tab grid");
        store.apply_operations(&expansion).await?;
    }

    let values = table.values();
    store.replace_grid(&target.tab.name, &values).await?;
    info!(rows = table.rows.len(), columns = table.header.width(), "Wrote table");
    Ok(())
}

/// Applies the presentation plan for `table` to the tab.
#[instrument(name = "format_table", skip_all, fields(gid = %target.tab.sheet_id))]
pub async fn format_table(
    store: &dyn SpreadsheetStore,
    target: &ResolvedTab,
    table: &ReconciledTable,
) -> Result<(), SyncError> {
    let plan = format_plan(&target.metadata, &table.header, table.rows.len());
    store.apply_operations(&plan).await?;
    info!(operations = plan.len(), "Applied formatting");
    Ok(())
}
