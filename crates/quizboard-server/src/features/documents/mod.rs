pub mod queries;
pub mod routes;

pub use queries::{
    DocumentSummary, DocumentTextResponse, GetDocumentTextError, GetDocumentTextQuery,
    ListDocumentsResponse,
};

pub use routes::documents_routes;
