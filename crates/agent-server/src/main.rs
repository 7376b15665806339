//! Wallet Advisor HTTP Server
//!
//! Axum-based server exposing the Solana wallet advisor over REST and
//! WebSocket. The WebSocket endpoint speaks the chat envelope protocol
//! (ack, working notice, report); the REST endpoint is a one-shot turn.

mod conversation;
mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::MemorySessionStore;
use solana_advisor::{AdvisorConfig, WalletAnalyzer};

use crate::handlers::{chat_handler, chat_stream_handler, health_check};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Build the analysis pipeline
    let config = AdvisorConfig::from_env();
    tracing::info!("RPC endpoints (in order):");
    for url in &config.rpc_urls {
        tracing::info!("  • {}", url);
    }

    let analyzer = Arc::new(WalletAnalyzer::new(&config)?);

    if analyzer.portfolio_configured() {
        tracing::info!("✓ Portfolio analytics configured");
    } else {
        tracing::warn!("⚠ Portfolio analytics disabled - set PORTFOLIO_API_KEY in .env");
        tracing::warn!("  Reports will show valuation as unavailable");
    }

    // Build application state
    let state = AppState {
        analyzer,
        sessions: Arc::new(MemorySessionStore::new()),
    };

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/chat", post(chat_handler))
        .route("/api/chat/stream", get(chat_stream_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🔮 wallet-advisor server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health          - Health check");
    tracing::info!("  POST /api/chat        - One-shot analysis turn");
    tracing::info!("  GET  /api/chat/stream - WebSocket chat protocol");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
