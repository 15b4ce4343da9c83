use std::fmt;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Name of a PDF held by the backend. Names double as identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentRef(String);

impl DocumentRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentRef {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for DocumentRef {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// Backend acknowledgement for an ingested file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UploadAck {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub num_chunks: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DeleteAck {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

/// One message of the chat transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationTurn {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

impl ConversationTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text.into())
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text.into())
    }

    fn new(role: Role, text: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            text,
            timestamp: Local::now(),
        }
    }

    /// Hour and minute, e.g. `14:05`.
    pub fn time_label(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_ref_is_a_bare_string_on_the_wire() {
        let docs: Vec<DocumentRef> = serde_json::from_str(r#"["a.pdf","b c.pdf"]"#).unwrap();
        assert_eq!(docs, vec![DocumentRef::from("a.pdf"), DocumentRef::from("b c.pdf")]);
        assert_eq!(serde_json::to_string(&docs[1]).unwrap(), r#""b c.pdf""#);
    }

    #[test]
    fn test_blank_document_ref_is_empty() {
        assert!(DocumentRef::new("  ").is_empty());
        assert!(!DocumentRef::new("x.pdf").is_empty());
    }

    #[test]
    fn test_upload_ack_tolerates_missing_fields() {
        let ack: UploadAck = serde_json::from_str(r#"{"message":"ok"}"#).unwrap();
        assert_eq!(ack.message.as_deref(), Some("ok"));
        assert_eq!(ack.num_chunks, None);
    }

    #[test]
    fn test_turns_get_distinct_ids() {
        let a = ConversationTurn::user("hola");
        let b = ConversationTurn::assistant("hola");
        assert_ne!(a.id, b.id);
        assert_eq!(a.role, Role::User);
        assert_eq!(b.role, Role::Assistant);
        assert_eq!(a.time_label().len(), 5);
    }
}
