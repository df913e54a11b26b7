//! Response shapes of the Sheets API calls the client makes.

use pipeline::{BandingId, SheetId, TabMetadata};
use serde::Deserialize;
use serde_json::Value;

/// Field mask for the metadata request; keeps the response to what
/// [`TabMetadata`] needs.
pub(crate) const METADATA_FIELDS: &str =
    "sheets(properties(sheetId,title,gridProperties(rowCount,columnCount)),bandedRanges(bandedRangeId))";

#[derive(Debug, Deserialize)]
pub(crate) struct SpreadsheetMetadata {
    #[serde(default)]
    pub(crate) sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SheetEntry {
    #[serde(default)]
    pub(crate) properties: SheetProperties,
    #[serde(default)]
    pub(crate) banded_ranges: Vec<BandedRange>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SheetProperties {
    // The API omits zero-valued fields, so the first tab's id 0 may be absent.
    #[serde(default)]
    pub(crate) sheet_id: i64,
    #[serde(default)]
    pub(crate) title: String,
    #[serde(default)]
    pub(crate) grid_properties: GridProperties,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GridProperties {
    #[serde(default)]
    pub(crate) row_count: u32,
    #[serde(default)]
    pub(crate) column_count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BandedRange {
    #[serde(default)]
    pub(crate) banded_range_id: i64,
}

impl From<SheetEntry> for TabMetadata {
    fn from(entry: SheetEntry) -> Self {
        TabMetadata {
            sheet_id: SheetId::new(entry.properties.sheet_id),
            title: entry.properties.title,
            row_count: entry.properties.grid_properties.row_count,
            column_count: entry.properties.grid_properties.column_count,
            banded_ranges: entry
                .banded_ranges
                .into_iter()
                .map(|band| BandingId::new(band.banded_range_id))
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ValueRange {
    #[serde(default)]
    pub(crate) values: Vec<Vec<Value>>,
}

/// Renders a cell as text. Formatted reads return strings already; other JSON
/// scalars are converted so a row never fails to load.
pub(crate) fn cell_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn metadata_defaults_missing_zero_fields() {
        let metadata: SpreadsheetMetadata = serde_json::from_value(json!({
            "sheets": [
                {"properties": {"title": "Sheet1", "gridProperties": {"rowCount": 1000, "columnCount": 26}}},
                {
                    "properties": {"sheetId": 512, "title": "Bug Tracker"},
                    "bandedRanges": [{"bandedRangeId": 7}, {"bandedRangeId": 8}]
                }
            ]
        }))
        .unwrap();

        let tabs: Vec<TabMetadata> = metadata.sheets.into_iter().map(TabMetadata::from).collect();
        assert_eq!(tabs[0].sheet_id, SheetId::new(0));
        assert_eq!(tabs[0].row_count, 1000);
        assert_eq!(tabs[1].column_count, 0);
        assert_eq!(tabs[1].banded_ranges, vec![BandingId::new(7), BandingId::new(8)]);
    }

    #[test]
    fn non_string_cells_become_text() {
        assert_eq!(cell_text(json!("42")), "42");
        assert_eq!(cell_text(json!(42)), "42");
        assert_eq!(cell_text(json!(true)), "true");
        assert_eq!(cell_text(Value::Null), "");
    }
}
