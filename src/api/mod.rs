pub mod http;

#[cfg(test)]
pub(crate) mod fake;

pub use http::HttpDocumentApi;

use async_trait::async_trait;

use crate::model::{DeleteAck, DocumentRef, UploadAck};
use crate::upload::PdfUpload;

/// Everything the client asks of the document-assistant backend.
///
/// Each call is a single attempt: no retry, no caching, no timeout beyond
/// the transport default. Views hold this as `Arc<dyn DocumentApi>`.
#[async_trait]
pub trait DocumentApi: Send + Sync {
    async fn upload_document(&self, upload: &PdfUpload) -> Result<UploadAck, ApiError>;

    async fn list_documents(&self) -> Result<Vec<DocumentRef>, ApiError>;

    async fn delete_document(&self, name: &DocumentRef) -> Result<DeleteAck, ApiError>;

    /// `document = None` asks across the whole registry.
    async fn send_chat_message(
        &self,
        text: &str,
        document: Option<&DocumentRef>,
    ) -> Result<String, ApiError>;

    async fn request_summary(&self, name: &DocumentRef) -> Result<String, ApiError>;

    async fn request_comparison(&self, pair: &[DocumentRef; 2]) -> Result<String, ApiError>;

    async fn request_classification(&self, name: &DocumentRef) -> Result<Vec<String>, ApiError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("Invalid endpoint: {0}")]
    Endpoint(String),
}
