//! In-memory `DocumentApi` for view tests: scripted failures, call counting
//! and an optional gate that holds every response until released.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use super::{ApiError, DocumentApi};
use crate::model::{DeleteAck, DocumentRef, UploadAck};
use crate::upload::PdfUpload;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Op {
    Upload,
    List,
    Delete,
    Chat,
    Summary,
    Compare,
    Classify,
}

#[derive(Default)]
pub(crate) struct FakeApi {
    documents: Mutex<Vec<DocumentRef>>,
    topics: Mutex<Vec<String>>,
    failing: Mutex<HashSet<Op>>,
    calls: Mutex<Vec<Op>>,
    chat_scopes: Mutex<Vec<Option<DocumentRef>>>,
    gate: Mutex<Option<Arc<Notify>>>,
}

impl FakeApi {
    pub(crate) fn with_documents(names: &[&str]) -> Self {
        let api = Self::default();
        *api.documents.lock().unwrap() = names.iter().map(|n| DocumentRef::from(*n)).collect();
        api
    }

    pub(crate) fn set_topics(&self, topics: &[&str]) {
        *self.topics.lock().unwrap() = topics.iter().map(|t| t.to_string()).collect();
    }

    pub(crate) fn fail(&self, op: Op) {
        self.failing.lock().unwrap().insert(op);
    }

    pub(crate) fn recover(&self, op: Op) {
        self.failing.lock().unwrap().remove(&op);
    }

    /// Make every later call wait until the returned `Notify` is signalled.
    pub(crate) fn hold_responses(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(Arc::clone(&notify));
        notify
    }

    pub(crate) fn calls(&self, op: Op) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == op).count()
    }

    pub(crate) fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn chat_scopes(&self) -> Vec<Option<DocumentRef>> {
        self.chat_scopes.lock().unwrap().clone()
    }

    async fn record(&self, op: Op) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(op);
        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        if self.failing.lock().unwrap().contains(&op) {
            return Err(ApiError::Api {
                status: 500,
                message: format!("scripted {op:?} failure"),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentApi for FakeApi {
    async fn upload_document(&self, upload: &PdfUpload) -> Result<UploadAck, ApiError> {
        self.record(Op::Upload).await?;
        self.documents
            .lock()
            .unwrap()
            .push(DocumentRef::from(upload.file_name.as_str()));
        Ok(UploadAck {
            filename: Some(upload.file_name.clone()),
            num_chunks: Some(1),
            message: Some("stored".into()),
        })
    }

    async fn list_documents(&self) -> Result<Vec<DocumentRef>, ApiError> {
        self.record(Op::List).await?;
        Ok(self.documents.lock().unwrap().clone())
    }

    async fn delete_document(&self, name: &DocumentRef) -> Result<DeleteAck, ApiError> {
        self.record(Op::Delete).await?;
        let mut docs = self.documents.lock().unwrap();
        let before = docs.len();
        docs.retain(|d| d != name);
        if docs.len() == before {
            return Err(ApiError::Api {
                status: 404,
                message: format!("PDF '{name}' no encontrado"),
            });
        }
        Ok(DeleteAck {
            message: Some(format!("PDF '{name}' eliminado correctamente")),
        })
    }

    async fn send_chat_message(
        &self,
        text: &str,
        document: Option<&DocumentRef>,
    ) -> Result<String, ApiError> {
        self.chat_scopes.lock().unwrap().push(document.cloned());
        self.record(Op::Chat).await?;
        Ok(format!("echo: {text}"))
    }

    async fn request_summary(&self, name: &DocumentRef) -> Result<String, ApiError> {
        self.record(Op::Summary).await?;
        Ok(format!("summary #{} of {name}", self.calls(Op::Summary)))
    }

    async fn request_comparison(&self, pair: &[DocumentRef; 2]) -> Result<String, ApiError> {
        self.record(Op::Compare).await?;
        Ok(format!("{} vs {}", pair[0], pair[1]))
    }

    async fn request_classification(&self, _name: &DocumentRef) -> Result<Vec<String>, ApiError> {
        self.record(Op::Classify).await?;
        Ok(self.topics.lock().unwrap().clone())
    }
}
