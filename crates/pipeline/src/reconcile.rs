//! Row reconciliation: merge freshly fetched issues into a tab's rows.
//!
//! Only cells under [`MANAGED_COLUMNS`](crate::header::MANAGED_COLUMNS) are
//! written. Every other cell is carried over byte-for-byte; the only change a
//! human-owned cell can see is width normalisation (padding with empty strings
//! or truncation past the header width).

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::header::{
    self, Header, CREATED_AT, GITHUB_ASSIGNEES, ISSUE_NUMBER, ISSUE_URL, LABELS, REPORTER, STATE,
    TITLE, UPDATED_AT,
};
use crate::{Issue, Row};

/// Output of [`reconcile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    /// Replacement data rows: fetched issues in fetch order, then orphans.
    pub rows: Vec<Row>,
    /// How many of `rows` are orphans kept from the previous table.
    pub orphaned: usize,
}

/// Splits a tab's grid into its header cells and data rows.
pub fn split_grid(mut grid: Vec<Row>) -> (Vec<String>, Vec<Row>) {
    if grid.is_empty() {
        return (Vec::new(), Vec::new());
    }
    let rows = grid.split_off(1);
    let header = grid.pop().unwrap_or_default();
    (header, rows)
}

/// Pads `row` with empty cells, or truncates it, to exactly `width` cells.
pub fn normalize_row(row: &[String], width: usize) -> Row {
    let mut normalized: Row = row.iter().take(width).cloned().collect();
    normalized.resize(width, String::new());
    normalized
}

/// The managed-column cells derived from one issue, keyed by column name.
pub fn managed_values(issue: &Issue) -> [(&'static str, String); 9] {
    [
        (ISSUE_NUMBER, issue.number.to_string()),
        (TITLE, issue.title.clone()),
        (STATE, issue.state.clone()),
        (LABELS, issue.labels.join(", ")),
        (GITHUB_ASSIGNEES, issue.assignees.join(", ")),
        (REPORTER, issue.reporter.clone().unwrap_or_default()),
        (CREATED_AT, issue.created_at.clone()),
        (UPDATED_AT, issue.updated_at.clone()),
        (ISSUE_URL, issue.url.clone()),
    ]
}

/// Builds the complete replacement row set for a tab.
///
/// 1. Existing rows are indexed by their trimmed "Issue #" cell; rows with an
///    empty issue cell are dropped. When an issue number repeats, the last row
///    wins but the key keeps the position of its first occurrence.
/// 2. Each fetched issue, in fetch order, updates its existing row (or a blank
///    row) in the managed columns only. An issue number fetched twice is
///    emitted once, from its first occurrence.
/// 3. Existing rows whose issue was not fetched follow, in original order.
pub fn reconcile(header: &Header, existing_rows: &[Row], issues: &[Issue]) -> Reconciliation {
    let width = header.width();
    let issue_column = header.position(ISSUE_NUMBER);

    let mut order: Vec<String> = Vec::new();
    let mut by_issue: HashMap<String, Row> = HashMap::new();
    if let Some(issue_column) = issue_column {
        for raw in existing_rows {
            let row = normalize_row(raw, width);
            let key = row[issue_column].trim().to_string();
            if key.is_empty() {
                continue;
            }
            if by_issue.insert(key.clone(), row).is_none() {
                order.push(key);
            }
        }
    }

    let managed_positions: Vec<(&'static str, usize)> = header::MANAGED_COLUMNS
        .iter()
        .filter_map(|name| header.position(name).map(|index| (*name, index)))
        .collect();

    let mut rows = Vec::with_capacity(issues.len() + order.len());
    let mut seen: HashSet<String> = HashSet::new();
    for issue in issues {
        let key = issue.number.to_string();
        if !seen.insert(key.clone()) {
            debug!(issue = %issue.number, "Skipping repeated issue in fetch");
            continue;
        }

        let mut row = by_issue
            .remove(&key)
            .unwrap_or_else(|| vec![String::new(); width]);
        for (name, value) in managed_values(issue) {
            if let Some((_, index)) = managed_positions.iter().find(|(n, _)| *n == name) {
                row[*index] = value;
            }
        }
        rows.push(row);
    }

    let mut orphaned = 0;
    for key in order {
        if let Some(row) = by_issue.remove(&key) {
            rows.push(row);
            orphaned += 1;
        }
    }

    Reconciliation { rows, orphaned }
}
