//! HTTP/WebSocket Handlers

use axum::{
    Json,
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    http::StatusCode,
    response::Response,
};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};

use agent_core::{
    ChatAcknowledgement, ChatContent, ChatEnvelope, ChatMessage, SessionId, SessionStore,
    message::Message as TranscriptMessage,
};
use solana_advisor::report;

use crate::conversation::{self, TurnIntent};
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub portfolio_analytics_configured: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        portfolio_analytics_configured: state.analyzer.portfolio_configured(),
    })
}

/// One-shot chat endpoint: classify the text, run the pipeline, reply
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(payload): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, (StatusCode, Json<ErrorResponse>)> {
    let session_id = payload
        .session_id
        .map_or_else(SessionId::new, SessionId::from_string);

    let reply = run_turn(&state, &payload.message).await;

    if let Err(e) = record_turn(&state, &session_id, &payload.message, &reply) {
        // History is best-effort; the reply still goes out.
        tracing::warn!(session = %session_id, error = %e, "failed to record turn");
    }

    Ok(Json(ChatResponse {
        reply,
        session_id: session_id.to_string(),
    }))
}

/// Classify one user turn and produce the final reply text
async fn run_turn(state: &AppState, text: &str) -> String {
    match conversation::classify(text) {
        TurnIntent::Analyze(address) => {
            tracing::info!(%address, "starting wallet analysis");
            let analysis = state.analyzer.analyze(&address).await;
            report::render(&analysis)
        }
        TurnIntent::Invalid(candidate) => {
            tracing::info!(%candidate, "rejected address candidate");
            conversation::invalid_address_reply()
        }
        TurnIntent::NeedAddress => conversation::missing_address_prompt(),
    }
}

/// Append the user turn and advisor reply to the session transcript
fn record_turn(
    state: &AppState,
    session_id: &SessionId,
    user_text: &str,
    reply: &str,
) -> agent_core::Result<()> {
    let mut session = state.sessions.load_or_create(session_id)?;
    session.conversation.push(TranscriptMessage::user(user_text));
    session.conversation.push(TranscriptMessage::advisor(reply));
    session.touch();
    state.sessions.save(&session)
}

/// WebSocket chat speaking `ChatEnvelope` frames
pub async fn chat_stream_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_stream(socket, state))
}

async fn handle_stream(socket: WebSocket, state: AppState) {
    let (mut sender, mut receiver) = socket.split();
    let session_id = SessionId::new();

    while let Some(frame) = receiver.next().await {
        let text = match frame {
            Ok(Message::Text(text)) => text,
            Ok(Message::Close(_)) => break,
            Err(e) => {
                tracing::error!("WebSocket error: {}", e);
                break;
            }
            _ => continue,
        };

        // A bare text frame is accepted as a plain message; otherwise the
        // frame must be a ChatEnvelope.
        let inbound = match serde_json::from_str::<ChatEnvelope>(&text) {
            Ok(ChatEnvelope::Message(msg)) => msg,
            Ok(ChatEnvelope::Ack(ack)) => {
                tracing::info!(msg_id = %ack.acknowledged_msg_id, "ack received");
                continue;
            }
            Err(_) => ChatMessage::text(text.to_string()),
        };

        // ACK first, before producing any reply
        let ack = ChatEnvelope::Ack(ChatAcknowledgement::for_message(&inbound));
        if send_envelope(&mut sender, &ack).await.is_err() {
            break;
        }

        if handle_chat_message(&state, &session_id, &inbound, &mut sender)
            .await
            .is_err()
        {
            break;
        }

        if inbound.ends_session() {
            break;
        }
    }

    if let Ok(Some(mut session)) = state.sessions.load(&session_id) {
        session.end();
        let _ = state.sessions.save(&session);
    }
}

/// Process one inbound chat message, sending every outbound frame in order
async fn handle_chat_message(
    state: &AppState,
    session_id: &SessionId,
    inbound: &ChatMessage,
    sender: &mut (impl SinkExt<Message> + Unpin),
) -> Result<(), ()> {
    for content in &inbound.content {
        match content {
            ChatContent::StartSession => {
                tracing::info!(session = %session_id, "investment advisor session started");
                send_text(sender, conversation::greeting()).await?;
            }
            ChatContent::EndSession => {
                tracing::info!(session = %session_id, "session ended by peer");
            }
            ChatContent::Text { text } => {
                // The working notice precedes any long-running analysis.
                if matches!(conversation::classify(text), TurnIntent::Analyze(_)) {
                    send_text(sender, conversation::working_notice().to_string()).await?;
                }

                let reply = run_turn(state, text).await;
                if let Err(e) = record_turn(state, session_id, text, &reply) {
                    tracing::warn!(session = %session_id, error = %e, "failed to record turn");
                }
                send_text(sender, reply).await?;
            }
        }
    }

    Ok(())
}

async fn send_text(
    sender: &mut (impl SinkExt<Message> + Unpin),
    text: String,
) -> Result<(), ()> {
    send_envelope(sender, &ChatEnvelope::Message(ChatMessage::text(text))).await
}

async fn send_envelope(
    sender: &mut (impl SinkExt<Message> + Unpin),
    envelope: &ChatEnvelope,
) -> Result<(), ()> {
    let json = match serde_json::to_string(envelope) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("failed to encode envelope: {}", e);
            return Err(());
        }
    };

    sender.send(Message::Text(json.into())).await.map_err(|_| ())
}
