pub mod queries;
pub mod routes;

pub use queries::{
    GetSheetRecordsError, GetSheetRecordsQuery, ListSheetsResponse, SheetRecordsResponse,
    SheetSummary,
};

pub use routes::sheets_routes;
