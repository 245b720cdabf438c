//! Header row normalization
//!
//! Spreadsheet header rows are edited by hand, so they routinely contain blank
//! cells and repeated titles. Records are keyed by header, which requires every
//! column name to be present and unique. [`normalize_headers`] produces such a
//! row while keeping positions aligned with the original columns.
//!
//! Suffixed names are not checked against the rest of the row: a sheet that
//! already has a literal `Score_1` column next to two `Score` columns ends up
//! with two `Score_1` keys.

use std::collections::HashMap;

/// Name substituted for blank header cells.
pub const UNNAMED_COLUMN: &str = "Unnamed_Column";

/// Normalize a raw header row into unique, non-empty column names.
///
/// Blank cells become [`UNNAMED_COLUMN`]. The first occurrence of a name is
/// kept as is; later repeats get `_1`, `_2`, ... appended in order of
/// appearance.
///
/// ```
/// use quizboard_common::headers::normalize_headers;
///
/// assert_eq!(
///     normalize_headers(&["", "Score", ""]),
///     vec!["Unnamed_Column", "Score", "Unnamed_Column_1"],
/// );
/// ```
pub fn normalize_headers<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(raw.len());

    raw.iter()
        .map(|header| {
            let name = match header.as_ref() {
                "" => UNNAMED_COLUMN,
                name => name,
            };

            let repeats = seen.entry(name).or_insert(0);
            let normalized = if *repeats == 0 {
                name.to_string()
            } else {
                format!("{}_{}", name, repeats)
            };
            *repeats += 1;

            normalized
        })
        .collect()
}
