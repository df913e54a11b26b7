//! Sheet Locator stage.

use pipeline::{resolve_tab, ResolvedTab, SheetId, SpreadsheetStore, SyncError, TabName};
use tracing::{info, instrument};

/// Reads the spreadsheet's tab list and resolves the target tab.
///
/// # Errors
///
/// Propagates store failures, and returns [`SyncError::TabNotFound`] when no
/// tab matches. A missing tab is never created.
#[instrument(name = "locate_tab", skip_all, fields(preferred = %preferred))]
pub async fn locate_tab(
    store: &dyn SpreadsheetStore,
    preferred: &TabName,
    sheet_id: Option<SheetId>,
) -> Result<ResolvedTab, SyncError> {
    let tabs = store.list_tabs().await?;
    let resolved = resolve_tab(&tabs, preferred, sheet_id)?;
    info!(
        tab = %resolved.tab.name,
        gid = %resolved.tab.sheet_id,
        bands = resolved.metadata.banded_ranges.len(),
        "Resolved target tab"
    );
    Ok(resolved)
}
