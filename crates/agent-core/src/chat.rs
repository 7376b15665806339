//! Chat Protocol
//!
//! Wire envelope for the messaging substrate: timestamped messages with a
//! content list, paired acknowledgements, and session start/end markers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One content item inside a chat message
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatContent {
    /// Plain text
    Text { text: String },
    /// Start of a session; the receiver replies with a greeting
    StartSession,
    /// End of a session
    EndSession,
}

/// A chat message carrying one or more content items
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Unique message id, echoed back in the acknowledgement
    pub msg_id: Uuid,

    /// Send time
    pub timestamp: DateTime<Utc>,

    /// Ordered content items
    pub content: Vec<ChatContent>,
}

impl ChatMessage {
    pub fn new(content: Vec<ChatContent>) -> Self {
        Self {
            msg_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            content,
        }
    }

    /// Create a single-text message
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![ChatContent::Text { text: text.into() }])
    }

    /// Create a session-start message
    pub fn start_session() -> Self {
        Self::new(vec![ChatContent::StartSession])
    }

    /// Create a session-end message
    pub fn end_session() -> Self {
        Self::new(vec![ChatContent::EndSession])
    }

    /// Iterate over the text items
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.content.iter().filter_map(|c| match c {
            ChatContent::Text { text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Whether this message opens a session
    pub fn starts_session(&self) -> bool {
        self.content.contains(&ChatContent::StartSession)
    }

    /// Whether this message closes a session
    pub fn ends_session(&self) -> bool {
        self.content.contains(&ChatContent::EndSession)
    }
}

/// Receipt for a chat message; sent before any reply is produced
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatAcknowledgement {
    pub timestamp: DateTime<Utc>,
    pub acknowledged_msg_id: Uuid,
}

impl ChatAcknowledgement {
    pub fn for_message(message: &ChatMessage) -> Self {
        Self {
            timestamp: Utc::now(),
            acknowledged_msg_id: message.msg_id,
        }
    }
}

/// Top-level wire frame: either a message or an acknowledgement
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChatEnvelope {
    Message(ChatMessage),
    Ack(ChatAcknowledgement),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_message() {
        let msg = ChatMessage::text("hello");
        assert_eq!(msg.texts().collect::<Vec<_>>(), vec!["hello"]);
        assert!(!msg.starts_session());
    }

    #[test]
    fn test_ack_pairs_with_message() {
        let msg = ChatMessage::start_session();
        let ack = ChatAcknowledgement::for_message(&msg);
        assert_eq!(ack.acknowledged_msg_id, msg.msg_id);
        assert!(msg.starts_session());
    }

    #[test]
    fn test_envelope_tagging() {
        let json = serde_json::to_value(ChatEnvelope::Message(ChatMessage::text("hi"))).unwrap();
        assert_eq!(json["kind"], "message");
        assert_eq!(json["content"][0]["type"], "text");
    }
}
