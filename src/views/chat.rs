use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::api::DocumentApi;
use crate::model::{ConversationTurn, DocumentRef};
use crate::resource::AsyncResource;

pub const LIST_FAILED: &str = "Error al cargar los PDFs";
pub const SEND_FAILED: &str = "Error al enviar el mensaje";
pub const ALL_DOCUMENTS: &str = "Todos los documentos";

/// Conversation against one document or the whole registry.
///
/// The transcript only grows (or is cleared as a whole). A user turn is
/// appended before the request goes out and stays even if the request fails.
pub struct ChatView {
    api: Arc<dyn DocumentApi>,
    cancel: CancellationToken,
    documents: AsyncResource<Vec<DocumentRef>>,
    reply: AsyncResource<String>,
    scope: Option<DocumentRef>,
    transcript: Vec<ConversationTurn>,
    rendered_len: usize,
}

impl ChatView {
    pub fn new(api: Arc<dyn DocumentApi>, scope: Option<DocumentRef>) -> Self {
        Self {
            api,
            cancel: CancellationToken::new(),
            documents: AsyncResource::new("chat-documents", LIST_FAILED),
            reply: AsyncResource::new("chat", SEND_FAILED),
            scope,
            transcript: Vec::new(),
            rendered_len: 0,
        }
    }

    /// Load the documents offered as scope choices.
    pub async fn mount(&mut self) {
        self.reply.clear_error();
        self.documents
            .run(&self.cancel, self.api.list_documents())
            .await;
    }

    pub fn teardown(&self) {
        self.cancel.cancel();
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// `None` talks to every document.
    pub fn set_scope(&mut self, scope: Option<DocumentRef>) {
        self.scope = scope.filter(|s| !s.is_empty());
    }

    pub fn scope(&self) -> Option<&DocumentRef> {
        self.scope.as_ref()
    }

    pub fn scope_label(&self) -> String {
        self.scope
            .as_ref()
            .map_or_else(|| ALL_DOCUMENTS.to_string(), |s| s.to_string())
    }

    /// Returns false for blank input, which is ignored entirely.
    pub async fn send(&mut self, text: &str) -> bool {
        if text.trim().is_empty() {
            return false;
        }

        // 1. Show the question right away
        self.transcript.push(ConversationTurn::user(text));

        // 2. One request, no retry
        let reply = self
            .reply
            .run(
                &self.cancel,
                self.api.send_chat_message(text, self.scope.as_ref()),
            )
            .await;

        // 3. Answer, or nothing on failure
        if let Some(reply) = reply {
            self.transcript.push(ConversationTurn::assistant(reply));
        }
        true
    }

    pub fn clear(&mut self) {
        self.transcript.clear();
        self.rendered_len = 0;
    }

    pub fn transcript(&self) -> &[ConversationTurn] {
        &self.transcript
    }

    /// True once per change in transcript length, so the front-end knows to
    /// scroll to the newest turn.
    pub fn take_scroll_request(&mut self) -> bool {
        let changed = self.transcript.len() != self.rendered_len;
        self.rendered_len = self.transcript.len();
        changed
    }

    pub fn is_sending(&self) -> bool {
        self.reply.is_loading()
    }

    pub fn documents(&self) -> Vec<DocumentRef> {
        self.documents.data().unwrap_or_default()
    }

    pub fn banner(&self) -> Option<String> {
        self.reply
            .last_error()
            .or_else(|| self.documents.last_error())
    }
}
