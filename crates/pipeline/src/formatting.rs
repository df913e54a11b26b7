//! Presentation plan for a rewritten tab.
//!
//! The plan is a plain list of typed [`FormatOperation`]s; the spreadsheet
//! adapter turns it into wire requests. Building it here keeps the layout
//! rules (which rows, which columns, which colours) independent of the remote
//! API and testable without one.
//!
//! Every operation is idempotent when replayed on the next run: existing bands
//! are deleted before the fresh band is added, and the filter, freeze, and
//! validation requests replace whatever was there.

use serde::{Deserialize, Serialize};

use crate::header::{Header, PRIORITY, TRIAGE_STATUS};
use crate::{BandingId, SheetId, TabMetadata};

/// Rows (header included) covered by dropdown validation even when the table
/// is shorter, so rows humans add later inherit the dropdowns.
pub const VALIDATION_ROW_LIMIT: u32 = 2000;

/// Allowed values of the "Priority" column.
pub const PRIORITY_OPTIONS: [&str; 4] = ["Critical", "High", "Medium", "Low"];

/// Allowed values of the "Triage Status" column.
pub const TRIAGE_STATUS_OPTIONS: [&str; 5] = ["New", "Confirmed", "In Progress", "Blocked", "Done"];

// ---------------------------------------------------------------------------
// Colours
// ---------------------------------------------------------------------------

/// An RGB colour with components in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Rgb {
    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }
}

pub const HEADER_BACKGROUND: Rgb = Rgb::new(0.15, 0.23, 0.37);
pub const HEADER_TEXT: Rgb = Rgb::new(1.0, 1.0, 1.0);
pub const BAND_FIRST: Rgb = Rgb::new(1.0, 1.0, 1.0);
pub const BAND_SECOND: Rgb = Rgb::new(0.94, 0.96, 0.98);

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// A half-open rectangle of cells on one tab (zero-based, end-exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRange {
    pub sheet_id: SheetId,
    pub start_row: u32,
    pub end_row: u32,
    pub start_column: u32,
    pub end_column: u32,
}

/// One structural or presentation change to a tab.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FormatOperation {
    /// Grow the grid by `count` rows at the bottom.
    AppendRows { sheet_id: SheetId, count: u32 },
    /// Grow the grid by `count` columns at the right.
    AppendColumns { sheet_id: SheetId, count: u32 },
    /// Freeze the first row.
    FreezeHeaderRow { sheet_id: SheetId },
    /// Bold, coloured, centred header cells.
    StyleHeader {
        range: GridRange,
        background: Rgb,
        text: Rgb,
    },
    /// Top-aligned, wrapped data cells.
    StyleDataRows { range: GridRange },
    /// Remove an existing alternating-colour band.
    DeleteBanding { banding_id: BandingId },
    /// Install an alternating-colour band; the header row takes `header`.
    AddBanding {
        range: GridRange,
        header: Rgb,
        first: Rgb,
        second: Rgb,
    },
    /// Replace the tab's basic filter.
    SetBasicFilter { range: GridRange },
    /// Fit column widths to content.
    AutoResizeColumns {
        sheet_id: SheetId,
        start_column: u32,
        end_column: u32,
    },
    /// Strict dropdown: only `values` are accepted.
    DropdownValidation { range: GridRange, values: Vec<String> },
}

/// Last row index (exclusive) covered by dropdown validation.
pub fn validated_row_extent(data_rows: usize) -> u32 {
    table_height(data_rows).max(VALIDATION_ROW_LIMIT)
}

fn table_height(data_rows: usize) -> u32 {
    u32::try_from(data_rows.saturating_add(1)).unwrap_or(u32::MAX)
}

fn header_width(header: &Header) -> u32 {
    u32::try_from(header.width()).unwrap_or(u32::MAX)
}

/// Grid growth needed before writing `data_rows` rows under `header`.
///
/// Returns no operations when the tab is already large enough for both the
/// data and the over-provisioned validation range.
pub fn grid_expansion(
    metadata: &TabMetadata,
    header: &Header,
    data_rows: usize,
) -> Vec<FormatOperation> {
    let mut operations = Vec::new();
    let rows_needed = validated_row_extent(data_rows);
    if metadata.row_count < rows_needed {
        operations.push(FormatOperation::AppendRows {
            sheet_id: metadata.sheet_id,
            count: rows_needed - metadata.row_count,
        });
    }
    let columns_needed = header_width(header);
    if metadata.column_count < columns_needed {
        operations.push(FormatOperation::AppendColumns {
            sheet_id: metadata.sheet_id,
            count: columns_needed - metadata.column_count,
        });
    }
    operations
}

/// Builds the ordered formatting plan for a tab holding `header` plus
/// `data_rows` rows.
///
/// `metadata.banded_ranges` lists the bands present before the rewrite; each is
/// deleted ahead of the single replacement band.
pub fn format_plan(metadata: &TabMetadata, header: &Header, data_rows: usize) -> Vec<FormatOperation> {
    let sheet_id = metadata.sheet_id;
    let width = header_width(header);
    let height = table_height(data_rows);
    let full = GridRange {
        sheet_id,
        start_row: 0,
        end_row: height,
        start_column: 0,
        end_column: width,
    };

    let mut operations = vec![
        FormatOperation::FreezeHeaderRow { sheet_id },
        FormatOperation::StyleHeader {
            range: GridRange { end_row: 1, ..full },
            background: HEADER_BACKGROUND,
            text: HEADER_TEXT,
        },
    ];

    if data_rows > 0 {
        operations.push(FormatOperation::StyleDataRows {
            range: GridRange { start_row: 1, ..full },
        });
    }

    operations.extend(
        metadata
            .banded_ranges
            .iter()
            .map(|banding_id| FormatOperation::DeleteBanding { banding_id: *banding_id }),
    );
    operations.push(FormatOperation::AddBanding {
        range: full,
        header: HEADER_BACKGROUND,
        first: BAND_FIRST,
        second: BAND_SECOND,
    });
    operations.push(FormatOperation::SetBasicFilter { range: full });
    operations.push(FormatOperation::AutoResizeColumns {
        sheet_id,
        start_column: 0,
        end_column: width,
    });

    let validated_end = validated_row_extent(data_rows);
    for (column, options) in [
        (PRIORITY, PRIORITY_OPTIONS.as_slice()),
        (TRIAGE_STATUS, TRIAGE_STATUS_OPTIONS.as_slice()),
    ] {
        let Some(index) = header.position(column) else {
            continue;
        };
        let index = u32::try_from(index).unwrap_or(u32::MAX);
        operations.push(FormatOperation::DropdownValidation {
            range: GridRange {
                sheet_id,
                start_row: 1,
                end_row: validated_end,
                start_column: index,
                end_column: index.saturating_add(1),
            },
            values: options.iter().map(|v| v.to_string()).collect(),
        });
    }

    operations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(bands: &[i64]) -> TabMetadata {
        TabMetadata {
            sheet_id: SheetId::new(77),
            title: "Bug Tracker".to_string(),
            row_count: 1000,
            column_count: 26,
            banded_ranges: bands.iter().copied().map(BandingId::new).collect(),
        }
    }

    #[test]
    fn stale_bands_are_deleted_before_the_new_band() {
        let plan = format_plan(&metadata(&[5, 6]), &Header::canonical(), 3);

        let delete_positions: Vec<usize> = plan
            .iter()
            .enumerate()
            .filter(|(_, op)| matches!(op, FormatOperation::DeleteBanding { .. }))
            .map(|(i, _)| i)
            .collect();
        let add_position = plan
            .iter()
            .position(|op| matches!(op, FormatOperation::AddBanding { .. }))
            .unwrap();

        assert_eq!(delete_positions.len(), 2);
        assert!(delete_positions.iter().all(|i| *i < add_position));
        assert_eq!(
            plan.iter()
                .filter(|op| matches!(op, FormatOperation::AddBanding { .. }))
                .count(),
            1
        );
    }

    #[test]
    fn band_and_filter_cover_header_and_data() {
        let plan = format_plan(&metadata(&[]), &Header::canonical(), 41);
        let expected = GridRange {
            sheet_id: SheetId::new(77),
            start_row: 0,
            end_row: 42,
            start_column: 0,
            end_column: 14,
        };
        assert!(plan.contains(&FormatOperation::SetBasicFilter { range: expected }));
        assert!(plan.iter().any(
            |op| matches!(op, FormatOperation::AddBanding { range, .. } if *range == expected)
        ));
        assert_eq!(plan[0], FormatOperation::FreezeHeaderRow { sheet_id: SheetId::new(77) });
    }

    #[test]
    fn dropdowns_target_their_columns_wherever_they_sit() {
        let existing: Vec<String> = ["Triage Status", "Issue #", "Notes", "Priority"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        let header = Header::derive(&existing);
        let plan = format_plan(&metadata(&[]), &header, 10);

        let dropdowns: Vec<(u32, u32, usize)> = plan
            .iter()
            .filter_map(|op| match op {
                FormatOperation::DropdownValidation { range, values } => {
                    Some((range.start_column, range.end_row, values.len()))
                }
                _ => None,
            })
            .collect();
        assert_eq!(dropdowns, vec![(3, VALIDATION_ROW_LIMIT, 4), (0, VALIDATION_ROW_LIMIT, 5)]);
    }

    #[test]
    fn validation_extends_past_large_tables() {
        assert_eq!(validated_row_extent(0), VALIDATION_ROW_LIMIT);
        assert_eq!(validated_row_extent(4999), 5000);
    }

    #[test]
    fn header_only_table_skips_data_row_styling() {
        let plan = format_plan(&metadata(&[]), &Header::canonical(), 0);
        assert!(!plan
            .iter()
            .any(|op| matches!(op, FormatOperation::StyleDataRows { .. })));
    }

    #[test]
    fn grid_expansion_grows_rows_and_columns_only_when_short() {
        let header = Header::canonical();
        let mut tab = metadata(&[]);
        assert_eq!(
            grid_expansion(&tab, &header, 10),
            vec![FormatOperation::AppendRows {
                sheet_id: SheetId::new(77),
                count: 1000,
            }]
        );

        tab.row_count = 2500;
        tab.column_count = 10;
        assert_eq!(
            grid_expansion(&tab, &header, 10),
            vec![FormatOperation::AppendColumns {
                sheet_id: SheetId::new(77),
                count: 4,
            }]
        );

        tab.column_count = 14;
        assert!(grid_expansion(&tab, &header, 10).is_empty());
    }
}
