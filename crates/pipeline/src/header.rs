//! Column vocabulary and header-row derivation.
//!
//! The header is the only place column positions come from. A column's index
//! is looked up by name on every run and never assumed; humans may have
//! reordered, inserted, or added columns since the last sync, and those
//! positions must survive untouched.

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const ISSUE_NUMBER: &str = "Issue #";
pub const TITLE: &str = "Title";
pub const STATE: &str = "State";
pub const LABELS: &str = "Labels";
pub const GITHUB_ASSIGNEES: &str = "GitHub Assignees";
pub const TEAM_ASSIGNEE: &str = "Team Assignee";
pub const PRIORITY: &str = "Priority";
pub const TRIAGE_STATUS: &str = "Triage Status";
pub const REPORTER: &str = "Reporter";
pub const CREATED_AT: &str = "Created At";
pub const UPDATED_AT: &str = "Updated At";
pub const ISSUE_URL: &str = "Issue URL";
pub const SPRINT: &str = "Sprint";
pub const NOTES: &str = "Notes";

/// Every column a synced tab must have, in canonical order.
///
/// An empty tab receives exactly this header. An existing header missing some
/// of these gets them appended at the end, in this order.
pub const REQUIRED_COLUMNS: [&str; 14] = [
    ISSUE_NUMBER,
    TITLE,
    STATE,
    LABELS,
    GITHUB_ASSIGNEES,
    TEAM_ASSIGNEE,
    PRIORITY,
    TRIAGE_STATUS,
    REPORTER,
    CREATED_AT,
    UPDATED_AT,
    ISSUE_URL,
    SPRINT,
    NOTES,
];

/// Columns whose cells are rewritten from tracker data on every run.
///
/// Every other column, required or custom, belongs to humans.
pub const MANAGED_COLUMNS: [&str; 9] = [
    ISSUE_NUMBER,
    TITLE,
    STATE,
    LABELS,
    GITHUB_ASSIGNEES,
    REPORTER,
    CREATED_AT,
    UPDATED_AT,
    ISSUE_URL,
];

/// Returns `true` if `column` is owned by the sync rather than by humans.
#[cfg(test)]
pub(crate) fn is_managed(column: &str) -> bool {
    MANAGED_COLUMNS.contains(&column)
}

// ---------------------------------------------------------------------------
// Header
// ---------------------------------------------------------------------------

/// The header row of a synced tab.
///
/// Always contains every entry of [`REQUIRED_COLUMNS`]. Matching is exact and
/// case-sensitive; cells are trimmed once when the header is derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
    appended: usize,
}

impl Header {
    /// The canonical header used for a tab with no header row.
    pub fn canonical() -> Self {
        Self {
            columns: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
            appended: 0,
        }
    }

    /// Derives the header from a tab's existing first row.
    ///
    /// An empty row yields [`Header::canonical`]. Otherwise existing cells
    /// keep their positions (trimmed) and missing required columns are
    /// appended after them. A renamed required column is therefore appended
    /// again under its canonical name rather than matched loosely.
    pub fn derive(existing: &[String]) -> Self {
        if existing.is_empty() {
            return Self::canonical();
        }

        let mut columns: Vec<String> = existing.iter().map(|c| c.trim().to_string()).collect();
        let mut appended = 0;
        for required in REQUIRED_COLUMNS {
            if !columns.iter().any(|c| c == required) {
                columns.push(required.to_string());
                appended += 1;
            }
        }
        Self { columns, appended }
    }

    /// Column names in sheet order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of columns; every row is normalised to this width.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Index of the first column named `name`, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Number of required columns [`Header::derive`] had to append.
    pub fn appended(&self) -> usize {
        self.appended
    }

    /// The header as a sheet row.
    pub fn to_row(&self) -> Vec<String> {
        self.columns.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn empty_tab_gets_canonical_header() {
        let header = Header::derive(&[]);
        assert_eq!(header.columns(), Header::canonical().columns());
        assert_eq!(header.width(), 14);
        assert_eq!(header.appended(), 0);
    }

    #[test]
    fn existing_columns_keep_their_positions() {
        let existing = cells(&["Notes", "Custom Estimate", "Issue #", "Title"]);
        let header = Header::derive(&existing);

        assert_eq!(&header.columns()[..4], existing.as_slice());
        assert_eq!(header.position(NOTES), Some(0));
        assert_eq!(header.position("Custom Estimate"), Some(1));
        assert_eq!(header.position(ISSUE_NUMBER), Some(2));
    }

    #[test]
    fn missing_required_columns_are_appended_in_canonical_order() {
        let header = Header::derive(&cells(&["Issue #", "Title", "Team Assignee"]));

        let expected_tail: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|c| ![ISSUE_NUMBER, TITLE, TEAM_ASSIGNEE].contains(c))
            .collect();
        let tail: Vec<&str> = header.columns()[3..].iter().map(String::as_str).collect();
        assert_eq!(tail, expected_tail);
        assert_eq!(header.appended(), 11);
    }

    #[test]
    fn header_cells_are_trimmed_once() {
        let header = Header::derive(&cells(&[" Issue # ", "Title  "]));
        assert_eq!(header.position(ISSUE_NUMBER), Some(0));
        assert_eq!(header.position(TITLE), Some(1));
        assert_eq!(header.width(), 14);
    }

    #[test]
    fn renamed_required_column_is_appended_again() {
        let header = Header::derive(&cells(&["Issue #", "Issue Title"]));
        assert_eq!(header.position("Issue Title"), Some(1));
        assert_eq!(header.position(TITLE), Some(2));
    }

    #[test]
    fn complete_header_is_unchanged() {
        let existing = Header::canonical().to_row();
        let header = Header::derive(&existing);
        assert_eq!(header.columns(), existing.as_slice());
        assert_eq!(header.appended(), 0);
    }

    #[test]
    fn managed_columns_exclude_planning_fields() {
        for human in [TEAM_ASSIGNEE, PRIORITY, TRIAGE_STATUS, SPRINT, NOTES] {
            assert!(!is_managed(human), "{human} must be human-owned");
        }
        assert!(MANAGED_COLUMNS.iter().all(|c| REQUIRED_COLUMNS.contains(c)));
    }
}
