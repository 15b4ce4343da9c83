use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::api::DocumentApi;
use crate::model::DocumentRef;
use crate::resource::{AsyncResource, ViewState};
use crate::router::Route;

pub const LIST_FAILED: &str = "Error al cargar los documentos";

/// `/summaries`: every document with shortcuts to its insight pages.
pub struct CatalogView {
    api: Arc<dyn DocumentApi>,
    cancel: CancellationToken,
    documents: AsyncResource<Vec<DocumentRef>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub document: DocumentRef,
    pub summary: Route,
    pub classify: Route,
    pub chat: Route,
}

impl CatalogEntry {
    fn new(document: DocumentRef) -> Self {
        Self {
            summary: Route::Summary(document.clone()),
            classify: Route::Classify(document.clone()),
            chat: Route::Chat {
                pdf: Some(document.clone()),
            },
            document,
        }
    }
}

impl CatalogView {
    pub fn new(api: Arc<dyn DocumentApi>) -> Self {
        Self {
            api,
            cancel: CancellationToken::new(),
            documents: AsyncResource::loading("catalog", LIST_FAILED),
        }
    }

    pub async fn mount(&mut self) {
        self.documents
            .run(&self.cancel, self.api.list_documents())
            .await;
    }

    pub fn teardown(&self) {
        self.cancel.cancel();
    }

    pub fn state(&self) -> ViewState<Vec<DocumentRef>> {
        self.documents.snapshot()
    }

    pub fn entries(&self) -> Vec<CatalogEntry> {
        self.documents
            .data()
            .unwrap_or_default()
            .into_iter()
            .map(CatalogEntry::new)
            .collect()
    }
}
