pub mod get_sheet_records;
pub mod list_sheets;

pub use get_sheet_records::{GetSheetRecordsError, GetSheetRecordsQuery, SheetRecordsResponse};
pub use list_sheets::{ListSheetsResponse, SheetSummary};
