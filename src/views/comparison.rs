use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::api::DocumentApi;
use crate::model::DocumentRef;
use crate::resource::{AsyncResource, ViewState};

pub const LIST_FAILED: &str = "Error al cargar los documentos";
pub const COMPARE_FAILED: &str = "Error al comparar los documentos";
pub const SELECT_TWO: &str = "Debes seleccionar dos documentos para comparar";
pub const SELECT_DIFFERENT: &str = "Debes seleccionar dos documentos diferentes";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    First,
    Second,
}

/// Two picks. Only checked when the comparison is submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonSelection {
    pub first: Option<DocumentRef>,
    pub second: Option<DocumentRef>,
}

impl ComparisonSelection {
    /// Both set and different, or the message explaining why not.
    pub fn validate(&self) -> Result<[DocumentRef; 2], &'static str> {
        match (&self.first, &self.second) {
            (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => {
                if a == b {
                    Err(SELECT_DIFFERENT)
                } else {
                    Ok([a.clone(), b.clone()])
                }
            }
            _ => Err(SELECT_TWO),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.first.is_some() && self.second.is_some()
    }
}

pub struct ComparisonView {
    api: Arc<dyn DocumentApi>,
    cancel: CancellationToken,
    preset: Option<DocumentRef>,
    documents: AsyncResource<Vec<DocumentRef>>,
    comparison: AsyncResource<String>,
    selection: ComparisonSelection,
}

impl ComparisonView {
    /// `preset` comes from `/compare/:pdfName` and fills the first slot.
    pub fn new(api: Arc<dyn DocumentApi>, preset: Option<DocumentRef>) -> Self {
        Self {
            api,
            cancel: CancellationToken::new(),
            selection: ComparisonSelection {
                first: preset.clone(),
                second: None,
            },
            preset,
            documents: AsyncResource::new("compare-documents", LIST_FAILED),
            comparison: AsyncResource::new("comparison", COMPARE_FAILED),
        }
    }

    /// Load the choices; without a preset the first listed document is
    /// picked for the first slot.
    pub async fn mount(&mut self) {
        self.comparison.clear_error();
        let listed = self
            .documents
            .run(&self.cancel, self.api.list_documents())
            .await;

        if let Some(docs) = listed {
            if self.preset.is_none() {
                if let Some(first) = docs.first() {
                    self.selection.first = Some(first.clone());
                }
            }
        }
    }

    pub fn teardown(&self) {
        self.cancel.cancel();
    }

    /// Blank input clears the slot.
    pub fn pick(&mut self, slot: Slot, name: Option<DocumentRef>) {
        let name = name.filter(|n| !n.is_empty());
        match slot {
            Slot::First => self.selection.first = name,
            Slot::Second => self.selection.second = name,
        }
    }

    pub fn selection(&self) -> &ComparisonSelection {
        &self.selection
    }

    /// Validate locally, then request the comparison. Invalid selections
    /// set an error and issue no request.
    pub async fn submit(&self) -> Option<String> {
        let pair = match self.selection.validate() {
            Ok(pair) => pair,
            Err(message) => {
                self.comparison.reject(message);
                return None;
            }
        };

        self.documents.clear_error();
        self.comparison
            .run(&self.cancel, self.api.request_comparison(&pair))
            .await
    }

    pub fn can_submit(&self) -> bool {
        !self.comparison.is_loading() && self.selection.is_complete()
    }

    pub fn documents(&self) -> Vec<DocumentRef> {
        self.documents.data().unwrap_or_default()
    }

    pub fn state(&self) -> ViewState<String> {
        self.comparison.snapshot()
    }

    pub fn banner(&self) -> Option<String> {
        self.comparison
            .last_error()
            .or_else(|| self.documents.last_error())
    }
}
