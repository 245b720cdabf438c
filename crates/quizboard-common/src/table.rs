//! Record construction from spreadsheet rows
//!
//! The first row is the header row. Every following row becomes a [`Record`]
//! keyed by the normalized headers.

use serde_json::{Map, Value};

use crate::headers::normalize_headers;

/// One data row keyed by column name, in column order.
pub type Record = Map<String, Value>;

/// Convert a header cell into a column name.
///
/// Strings are taken verbatim, numbers and booleans use their display form,
/// and anything else counts as blank.
pub fn header_text(cell: &Value) -> String {
    match cell {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

/// Build records from raw rows, treating the first row as the header.
///
/// Short rows are padded with empty strings since trailing blank cells are
/// not transmitted. Cells past the last header column are ignored.
pub fn records_from_rows(rows: &[Vec<Value>]) -> Vec<Record> {
    let Some((header_row, data_rows)) = rows.split_first() else {
        return Vec::new();
    };

    let raw: Vec<String> = header_row.iter().map(header_text).collect();
    let headers = normalize_headers(&raw);

    data_rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .map(|(i, header)| {
                    let cell = row
                        .get(i)
                        .cloned()
                        .unwrap_or_else(|| Value::String(String::new()));
                    (header.clone(), cell)
                })
                .collect()
        })
        .collect()
}
