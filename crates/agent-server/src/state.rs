//! Application State

use std::sync::Arc;

use agent_core::MemorySessionStore;
use solana_advisor::WalletAnalyzer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// The analysis pipeline
    pub analyzer: Arc<WalletAnalyzer>,

    /// In-memory chat sessions
    pub sessions: Arc<MemorySessionStore>,
}
