//! Google Docs v1 endpoints

use serde::Deserialize;

use super::{GoogleApiError, GoogleClient};

/// The subset of a Docs document needed for text extraction
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: Body,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Body {
    #[serde(default)]
    pub content: Vec<StructuralElement>,
}

/// Tables, section breaks and tables of contents carry no `paragraph`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StructuralElement {
    #[serde(default)]
    pub paragraph: Option<Paragraph>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    pub elements: Vec<ParagraphElement>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphElement {
    #[serde(default)]
    pub text_run: Option<TextRun>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextRun {
    #[serde(default)]
    pub content: String,
}

impl Document {
    /// Text of every paragraph element, in document order, joined by newlines.
    ///
    /// Elements without a text run (inline images, page breaks, ...) contribute
    /// an empty piece so the join keeps one separator per element.
    pub fn plain_text(&self) -> String {
        self.body
            .content
            .iter()
            .filter_map(|element| element.paragraph.as_ref())
            .flat_map(|paragraph| paragraph.elements.iter())
            .map(|element| {
                element
                    .text_run
                    .as_ref()
                    .map(|run| run.content.as_str())
                    .unwrap_or("")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl GoogleClient {
    /// Fetch a document
    pub async fn document(&self, document_id: &str) -> Result<Document, GoogleApiError> {
        let url = self.docs_url(&["documents", document_id]);
        self.get_json(url, &[]).await
    }

    /// Fetch a document and extract its text
    #[tracing::instrument(skip(self))]
    pub async fn document_text(&self, document_id: &str) -> Result<String, GoogleApiError> {
        let document = self.document(document_id).await?;
        let text = document.plain_text();

        tracing::debug!(title = %document.title, chars = text.len(), "Fetched document");

        Ok(text)
    }
}
