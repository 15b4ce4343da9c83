use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{ApiError, DocumentApi};
use crate::config::ClientConfig;
use crate::model::{DeleteAck, DocumentRef, UploadAck};
use crate::upload::{PdfUpload, PDF_MIME};

/// Multipart field the backend reads the uploaded file from.
const UPLOAD_FIELD: &str = "file";

#[derive(Deserialize)]
struct ListResponse {
    pdfs: Vec<DocumentRef>,
}

#[derive(Serialize)]
struct ChatBody<'a> {
    message: &'a str,
    pdf_name: Option<&'a str>,
}

#[derive(Deserialize)]
struct ChatResponse {
    bot_response: String,
}

#[derive(Deserialize)]
struct SummaryResponse {
    summary: String,
}

#[derive(Serialize)]
struct CompareBody<'a> {
    pdfs: [&'a str; 2],
}

#[derive(Deserialize)]
struct CompareResponse {
    comparison: String,
}

#[derive(Deserialize)]
struct ClassifyResponse {
    topics: Vec<String>,
}

/// `DocumentApi` over HTTP. One `reqwest::Client` is shared by every call.
#[derive(Debug, Clone)]
pub struct HttpDocumentApi {
    client: Client,
    config: ClientConfig,
}

impl HttpDocumentApi {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Append path segments to the base location. Each segment is
    /// percent-encoded on its own, so a document name never splits the path.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.config.base_url().clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Endpoint(self.config.base_url().to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let text = resp.text().await.unwrap_or_default();
        return Err(ApiError::Api {
            status,
            message: text,
        });
    }
    Ok(resp.json().await?)
}

#[async_trait]
impl DocumentApi for HttpDocumentApi {
    async fn upload_document(&self, upload: &PdfUpload) -> Result<UploadAck, ApiError> {
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(PDF_MIME)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        tracing::debug!(file = %upload.file_name, bytes = upload.bytes.len(), "uploading document");
        let resp = self
            .client
            .post(self.endpoint(&["ingest"])?)
            .multipart(form)
            .send()
            .await?;
        read_json(resp).await
    }

    async fn list_documents(&self) -> Result<Vec<DocumentRef>, ApiError> {
        let resp = self.client.get(self.endpoint(&["pdfs"])?).send().await?;
        let data: ListResponse = read_json(resp).await?;
        Ok(data.pdfs)
    }

    async fn delete_document(&self, name: &DocumentRef) -> Result<DeleteAck, ApiError> {
        let resp = self
            .client
            .delete(self.endpoint(&["delete_pdf", name.as_str()])?)
            .send()
            .await?;
        read_json(resp).await
    }

    async fn send_chat_message(
        &self,
        text: &str,
        document: Option<&DocumentRef>,
    ) -> Result<String, ApiError> {
        let body = ChatBody {
            message: text,
            pdf_name: document.map(DocumentRef::as_str),
        };
        let resp = self
            .client
            .post(self.endpoint(&["chat"])?)
            .json(&body)
            .send()
            .await?;
        let data: ChatResponse = read_json(resp).await?;
        Ok(data.bot_response)
    }

    async fn request_summary(&self, name: &DocumentRef) -> Result<String, ApiError> {
        let resp = self
            .client
            .get(self.endpoint(&["summary", name.as_str()])?)
            .send()
            .await?;
        let data: SummaryResponse = read_json(resp).await?;
        Ok(data.summary)
    }

    async fn request_comparison(&self, pair: &[DocumentRef; 2]) -> Result<String, ApiError> {
        let body = CompareBody {
            pdfs: [pair[0].as_str(), pair[1].as_str()],
        };
        let resp = self
            .client
            .post(self.endpoint(&["compare"])?)
            .json(&body)
            .send()
            .await?;
        let data: CompareResponse = read_json(resp).await?;
        Ok(data.comparison)
    }

    async fn request_classification(&self, name: &DocumentRef) -> Result<Vec<String>, ApiError> {
        let resp = self
            .client
            .get(self.endpoint(&["classify", name.as_str()])?)
            .send()
            .await?;
        let data: ClassifyResponse = read_json(resp).await?;
        Ok(data.topics)
    }
}
