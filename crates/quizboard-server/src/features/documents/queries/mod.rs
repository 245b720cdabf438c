pub mod get_document_text;
pub mod list_documents;

pub use get_document_text::{DocumentTextResponse, GetDocumentTextError, GetDocumentTextQuery};
pub use list_documents::{DocumentSummary, ListDocumentsResponse};
