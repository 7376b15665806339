//! # agent-core
//!
//! Messaging substrate for the wallet advisor: chat envelope types,
//! conversation history and session management.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Chat Substrate                          │
//! │  ┌──────────────┐  ┌──────────────┐  ┌───────────────────┐  │
//! │  │ ChatMessage  │  │ Conversation │  │   SessionStore    │  │
//! │  │  + Ack       │──│   History    │──│   (in-memory)     │  │
//! │  └──────────────┘  └──────────────┘  └───────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The substrate only moves text: it knows nothing about wallets or
//! recommendations. Every inbound message is acknowledged before any
//! reply is produced.

pub mod chat;
pub mod error;
pub mod message;
pub mod session;

pub use chat::{ChatAcknowledgement, ChatContent, ChatEnvelope, ChatMessage};
pub use error::{AgentError, Result};
pub use message::{Conversation, Message, Role};
pub use session::{MemorySessionStore, Session, SessionId, SessionStore};
