use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::api::DocumentApi;
use crate::model::DocumentRef;
use crate::resource::{AsyncResource, ViewState};
use crate::router::Route;

pub const SUMMARY_FAILED: &str = "Error al generar el resumen del documento";

pub struct SummaryView {
    api: Arc<dyn DocumentApi>,
    cancel: CancellationToken,
    document: DocumentRef,
    summary: AsyncResource<String>,
}

impl SummaryView {
    pub fn new(api: Arc<dyn DocumentApi>, document: DocumentRef) -> Self {
        Self {
            api,
            cancel: CancellationToken::new(),
            document,
            summary: AsyncResource::loading("summary", SUMMARY_FAILED),
        }
    }

    pub async fn mount(&mut self) {
        self.load().await;
    }

    /// Ask again. Never served from a previous result.
    pub async fn regenerate(&mut self) {
        self.load().await;
    }

    async fn load(&self) {
        self.summary
            .run(&self.cancel, self.api.request_summary(&self.document))
            .await;
    }

    pub fn teardown(&self) {
        self.cancel.cancel();
    }

    pub fn document(&self) -> &DocumentRef {
        &self.document
    }

    pub fn state(&self) -> ViewState<String> {
        self.summary.snapshot()
    }

    pub fn compare_route(&self) -> Route {
        Route::Compare(Some(self.document.clone()))
    }

    pub fn chat_route(&self) -> Route {
        Route::Chat {
            pdf: Some(self.document.clone()),
        }
    }
}
