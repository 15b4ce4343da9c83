use std::path::Path;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::api::DocumentApi;
use crate::model::{DeleteAck, DocumentRef, UploadAck};
use crate::resource::{AsyncResource, ViewState};
use crate::upload::{PdfUpload, UploadError};

pub const LIST_FAILED: &str = "Error al cargar los PDFs";
pub const UPLOAD_FAILED: &str = "Error al subir el PDF";
pub const DELETE_FAILED: &str = "Error al eliminar el PDF";
pub const NO_FILE_SELECTED: &str = "Por favor selecciona un archivo";
pub const ONLY_PDF: &str = "Solo se permiten archivos PDF";
pub const UNREADABLE_FILE: &str = "No se pudo leer el archivo";

/// Backend-side cap, shown as a hint only.
pub const MAX_DOCUMENTS: usize = 5;

/// Home page: upload, list and delete documents.
pub struct RegistryView {
    api: Arc<dyn DocumentApi>,
    cancel: CancellationToken,
    documents: AsyncResource<Vec<DocumentRef>>,
    upload: AsyncResource<UploadAck>,
    removal: AsyncResource<DeleteAck>,
    selected: Option<PdfUpload>,
}

impl RegistryView {
    pub fn new(api: Arc<dyn DocumentApi>) -> Self {
        Self {
            api,
            cancel: CancellationToken::new(),
            documents: AsyncResource::new("documents", LIST_FAILED),
            upload: AsyncResource::new("upload", UPLOAD_FAILED),
            removal: AsyncResource::new("delete", DELETE_FAILED),
            selected: None,
        }
    }

    /// Also used by `/refresh`: banners left by earlier actions go away.
    pub async fn mount(&mut self) {
        self.clear_errors();
        self.refresh().await;
    }

    pub fn teardown(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub async fn refresh(&self) -> Option<Vec<DocumentRef>> {
        self.documents
            .run(&self.cancel, self.api.list_documents())
            .await
    }

    /// Pick a file (typed or dropped onto the terminal). Only PDFs are kept;
    /// anything else is refused here and never reaches the backend.
    pub fn select_file(&mut self, path: &Path) -> bool {
        match PdfUpload::from_path(path) {
            Ok(upload) => {
                self.clear_errors();
                self.selected = Some(upload);
                true
            }
            Err(err @ UploadError::NotPdf { .. }) => {
                tracing::debug!(error = %err, "file refused");
                self.upload.reject(ONLY_PDF);
                false
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not load selected file");
                self.upload.reject(UNREADABLE_FILE);
                false
            }
        }
    }

    pub fn selected_file(&self) -> Option<&PdfUpload> {
        self.selected.as_ref()
    }

    /// Upload the selected file, then reload the list.
    pub async fn upload(&mut self) -> Option<UploadAck> {
        let Some(file) = self.selected.as_ref() else {
            self.upload.reject(NO_FILE_SELECTED);
            return None;
        };

        self.clear_errors();
        let ack = self
            .upload
            .run(&self.cancel, self.api.upload_document(file))
            .await?;

        self.selected = None;
        self.refresh().await;
        Some(ack)
    }

    /// Delete by name, then reload the list. Confirmation is the caller's job.
    pub async fn delete(&mut self, name: &DocumentRef) -> bool {
        self.clear_errors();
        let deleted = self
            .removal
            .run(&self.cancel, self.api.delete_document(name))
            .await
            .is_some();

        if deleted {
            self.refresh().await;
        }
        deleted
    }

    fn clear_errors(&self) {
        self.documents.clear_error();
        self.upload.clear_error();
        self.removal.clear_error();
    }

    pub fn documents(&self) -> Vec<DocumentRef> {
        self.documents.data().unwrap_or_default()
    }

    pub fn list_state(&self) -> ViewState<Vec<DocumentRef>> {
        self.documents.snapshot()
    }

    /// The single error banner of the page.
    pub fn banner(&self) -> Option<String> {
        self.upload
            .last_error()
            .or_else(|| self.removal.last_error())
            .or_else(|| self.documents.last_error())
    }

    pub fn is_uploading(&self) -> bool {
        self.upload.is_loading()
    }

    pub fn can_upload(&self) -> bool {
        !self.is_uploading() && self.selected.is_some()
    }

    pub fn count_label(&self) -> String {
        match self.documents().len() {
            0 => "No hay documentos cargados".to_string(),
            1 => "1 documento cargado".to_string(),
            n => format!("{n} documentos cargados"),
        }
    }
}
