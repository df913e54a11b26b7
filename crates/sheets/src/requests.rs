//! Translation of [`FormatOperation`]s into `spreadsheets.batchUpdate` requests.

use pipeline::{FormatOperation, GridRange, Rgb};
use serde_json::{json, Value};

/// Builds the `batchUpdate` request body for `operations`, preserving order.
pub fn batch_update_body(operations: &[FormatOperation]) -> Value {
    json!({
        "requests": operations.iter().map(request).collect::<Vec<_>>()
    })
}

fn grid_range(range: &GridRange) -> Value {
    json!({
        "sheetId": range.sheet_id.as_i64(),
        "startRowIndex": range.start_row,
        "endRowIndex": range.end_row,
        "startColumnIndex": range.start_column,
        "endColumnIndex": range.end_column,
    })
}

fn color(rgb: &Rgb) -> Value {
    json!({ "red": rgb.red, "green": rgb.green, "blue": rgb.blue })
}

fn request(operation: &FormatOperation) -> Value {
    match operation {
        FormatOperation::AppendRows { sheet_id, count } => json!({
            "appendDimension": {
                "sheetId": sheet_id.as_i64(),
                "dimension": "ROWS",
                "length": count,
            }
        }),
        FormatOperation::AppendColumns { sheet_id, count } => json!({
            "appendDimension": {
                "sheetId": sheet_id.as_i64(),
                "dimension": "COLUMNS",
                "length": count,
            }
        }),
        FormatOperation::FreezeHeaderRow { sheet_id } => json!({
            "updateSheetProperties": {
                "properties": {
                    "sheetId": sheet_id.as_i64(),
                    "gridProperties": { "frozenRowCount": 1 },
                },
                "fields": "gridProperties.frozenRowCount",
            }
        }),
        FormatOperation::StyleHeader {
            range,
            background,
            text,
        } => json!({
            "repeatCell": {
                "range": grid_range(range),
                "cell": {
                    "userEnteredFormat": {
                        "backgroundColor": color(background),
                        "textFormat": { "foregroundColor": color(text), "bold": true },
                        "horizontalAlignment": "CENTER",
                        "verticalAlignment": "MIDDLE",
                    }
                },
                "fields": "userEnteredFormat(backgroundColor,textFormat,horizontalAlignment,verticalAlignment)",
            }
        }),
        FormatOperation::StyleDataRows { range } => json!({
            "repeatCell": {
                "range": grid_range(range),
                "cell": {
                    "userEnteredFormat": {
                        "verticalAlignment": "TOP",
                        "wrapStrategy": "WRAP",
                    }
                },
                "fields": "userEnteredFormat(verticalAlignment,wrapStrategy)",
            }
        }),
        FormatOperation::DeleteBanding { banding_id } => json!({
            "deleteBanding": { "bandedRangeId": banding_id.as_i64() }
        }),
        FormatOperation::AddBanding {
            range,
            header,
            first,
            second,
        } => json!({
            "addBanding": {
                "bandedRange": {
                    "range": grid_range(range),
                    "rowProperties": {
                        "headerColor": color(header),
                        "firstBandColor": color(first),
                        "secondBandColor": color(second),
                    }
                }
            }
        }),
        FormatOperation::SetBasicFilter { range } => json!({
            "setBasicFilter": { "filter": { "range": grid_range(range) } }
        }),
        FormatOperation::AutoResizeColumns {
            sheet_id,
            start_column,
            end_column,
        } => json!({
            "autoResizeDimensions": {
                "dimensions": {
                    "sheetId": sheet_id.as_i64(),
                    "dimension": "COLUMNS",
                    "startIndex": start_column,
                    "endIndex": end_column,
                }
            }
        }),
        FormatOperation::DropdownValidation { range, values } => json!({
            "setDataValidation": {
                "range": grid_range(range),
                "rule": {
                    "condition": {
                        "type": "ONE_OF_LIST",
                        "values": values
                            .iter()
                            .map(|value| json!({ "userEnteredValue": value }))
                            .collect::<Vec<_>>(),
                    },
                    "strict": true,
                    "showCustomUi": true,
                }
            }
        }),
    }
}
