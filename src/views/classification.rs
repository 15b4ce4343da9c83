use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::api::DocumentApi;
use crate::model::DocumentRef;
use crate::resource::{AsyncResource, ViewState};
use crate::router::Route;

pub const CLASSIFY_FAILED: &str = "Error al clasificar el documento";
pub const NO_TOPICS: &str = "No se pudieron identificar temas en este documento";

pub struct ClassificationView {
    api: Arc<dyn DocumentApi>,
    cancel: CancellationToken,
    document: DocumentRef,
    topics: AsyncResource<Vec<String>>,
}

impl ClassificationView {
    pub fn new(api: Arc<dyn DocumentApi>, document: DocumentRef) -> Self {
        Self {
            api,
            cancel: CancellationToken::new(),
            document,
            topics: AsyncResource::loading("classification", CLASSIFY_FAILED),
        }
    }

    pub async fn mount(&mut self) {
        self.regenerate().await;
    }

    pub async fn regenerate(&mut self) {
        self.topics
            .run(&self.cancel, self.api.request_classification(&self.document))
            .await;
    }

    pub fn teardown(&self) {
        self.cancel.cancel();
    }

    pub fn document(&self) -> &DocumentRef {
        &self.document
    }

    pub fn state(&self) -> ViewState<Vec<String>> {
        self.topics.snapshot()
    }

    /// `("Tema 1", topic)` pairs in backend order.
    pub fn numbered_topics(&self) -> Vec<(String, String)> {
        self.topics
            .data()
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .map(|(i, topic)| (format!("Tema {}", i + 1), topic))
            .collect()
    }

    pub fn chat_route(&self) -> Route {
        Route::Chat {
            pdf: Some(self.document.clone()),
        }
    }

    pub fn compare_route(&self) -> Route {
        Route::Compare(Some(self.document.clone()))
    }
}
