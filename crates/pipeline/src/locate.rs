//! Tab resolution.
//!
//! A tab id, when configured, is the stable key: humans rename tabs, and the
//! tab's current title then wins over the configured name. The configured name
//! is only a fallback, matched exactly.

use tracing::debug;

use crate::{SheetId, SyncError, TabMetadata, TabName, TabRef};

/// A resolved target tab together with the metadata it was resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTab {
    /// Authoritative (name, id) pair.
    pub tab: TabRef,
    /// The tab's metadata at resolution time (grid size, existing bands).
    pub metadata: TabMetadata,
}

/// Resolves the target tab from a spreadsheet's tab list.
///
/// # Errors
///
/// Returns [`SyncError::TabNotFound`] when neither the id nor the name matches.
/// No tab is ever created.
pub fn resolve_tab(
    tabs: &[TabMetadata],
    preferred: &TabName,
    sheet_id: Option<SheetId>,
) -> Result<ResolvedTab, SyncError> {
    let by_id = sheet_id.and_then(|id| tabs.iter().find(|tab| tab.sheet_id == id));
    if by_id.is_none() {
        if let Some(id) = sheet_id {
            debug!(gid = %id, "Configured tab id not present; falling back to tab name");
        }
    }

    let found = by_id.or_else(|| tabs.iter().find(|tab| tab.title == preferred.as_str()));
    let Some(metadata) = found else {
        return Err(SyncError::TabNotFound {
            preferred: preferred.to_string(),
            sheet_id,
        });
    };

    // The pair must address one tab, so the title is used verbatim.
    let Some(name) = TabName::from_title(&metadata.title) else {
        return Err(SyncError::TabNotFound {
            preferred: preferred.to_string(),
            sheet_id,
        });
    };
    Ok(ResolvedTab {
        tab: TabRef {
            name,
            sheet_id: metadata.sheet_id,
        },
        metadata: metadata.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tab(id: i64, title: &str) -> TabMetadata {
        TabMetadata {
            sheet_id: SheetId::new(id),
            title: title.to_string(),
            row_count: 1000,
            column_count: 26,
            banded_ranges: Vec::new(),
        }
    }

    fn name(value: &str) -> TabName {
        TabName::new(value).unwrap()
    }

    #[test]
    fn id_match_wins_over_preferred_name() {
        let tabs = vec![tab(0, "Bug Tracker"), tab(1234, "Bugs (renamed)")];
        let resolved = resolve_tab(&tabs, &name("Bug Tracker"), Some(SheetId::new(1234))).unwrap();
        assert_eq!(resolved.tab.name.as_str(), "Bugs (renamed)");
        assert_eq!(resolved.tab.sheet_id, SheetId::new(1234));
    }

    #[test]
    fn id_match_keeps_a_padded_title_verbatim() {
        let tabs = vec![tab(0, "Bug Tracker"), tab(7, " Bugs ")];
        let resolved = resolve_tab(&tabs, &name("Bug Tracker"), Some(SheetId::new(7))).unwrap();
        assert_eq!(resolved.tab.name.as_str(), " Bugs ");
        assert_eq!(resolved.tab.sheet_id, SheetId::new(7));
    }

    #[test]
    fn id_match_never_pairs_with_another_tabs_name() {
        let tabs = vec![tab(0, "Bug Tracker"), tab(7, "   ")];
        let resolved = resolve_tab(&tabs, &name("Bug Tracker"), Some(SheetId::new(7))).unwrap();
        assert_eq!(resolved.tab.name.as_str(), "   ");
        assert_eq!(resolved.tab.sheet_id, SheetId::new(7));

        let tabs = vec![tab(0, "Bug Tracker"), tab(7, "")];
        let error = resolve_tab(&tabs, &name("Bug Tracker"), Some(SheetId::new(7))).unwrap_err();
        assert_eq!(
            error,
            SyncError::TabNotFound {
                preferred: "Bug Tracker".to_string(),
                sheet_id: Some(SheetId::new(7)),
            }
        );
    }

    #[test]
    fn unknown_id_falls_back_to_name() {
        let tabs = vec![tab(0, "Sheet1"), tab(5, "Bug Tracker")];
        let resolved = resolve_tab(&tabs, &name("Bug Tracker"), Some(SheetId::new(99))).unwrap();
        assert_eq!(resolved.tab.sheet_id, SheetId::new(5));
    }

    #[test]
    fn name_match_is_exact() {
        let tabs = vec![tab(0, "bug tracker"), tab(1, "Bug Tracker ")];
        let error = resolve_tab(&tabs, &name("Bug Tracker"), None).unwrap_err();
        assert_eq!(
            error,
            SyncError::TabNotFound {
                preferred: "Bug Tracker".to_string(),
                sheet_id: None,
            }
        );
    }

    #[test]
    fn resolution_returns_the_tabs_metadata() {
        let mut target = tab(3, "Bug Tracker");
        target.banded_ranges = vec![crate::BandingId::new(41)];
        let resolved = resolve_tab(&[target.clone()], &name("Bug Tracker"), None).unwrap();
        assert_eq!(resolved.metadata, target);
    }
}
