// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.
//!
//! Two groups: the read-only debug surface (`GET /`, `GET /chatlog`,
//! `GET /health` -- plain unauthenticated GETs over ephemeral state) and the
//! ingest endpoints standing in for a chat platform (`POST /v1/messages`,
//! `POST /v1/commands`, `POST /v1/presence`).

use std::collections::{BTreeMap, HashMap};

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;

use carousel_core::types::{
    ChannelEvent, CommandInvocation, InboundMessage, MediaReference, PresenceUpdate,
    StreamingActivity,
};

use crate::server::GatewayState;

/// Request body for POST /v1/messages.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    /// Message text.
    pub content: String,
    /// Optional sender identifier.
    #[serde(default)]
    pub sender_id: Option<String>,
    /// Optional uploaded image URL (generation conditioning input).
    #[serde(default)]
    pub attachment_url: Option<String>,
}

/// Request body for POST /v1/commands.
#[derive(Debug, Deserialize)]
pub struct CommandRequest {
    /// Command name (create, echo).
    pub name: String,
    /// Invoking actor's chat identity.
    pub actor: String,
    /// Command options.
    #[serde(default)]
    pub options: BTreeMap<String, String>,
}

/// Request body for POST /v1/presence.
#[derive(Debug, Deserialize)]
pub struct PresenceRequest {
    pub user_id: String,
    pub display_name: String,
    #[serde(default)]
    pub is_bot: bool,
    /// Present when the user is streaming.
    #[serde(default)]
    pub streaming: Option<StreamingActivity>,
}

/// Response body for a replied ingest request.
#[derive(Debug, Serialize)]
pub struct ReplyResponse {
    /// Ingest request id.
    pub id: String,
    /// First reply the engine addressed to this request.
    pub reply: String,
    /// ISO 8601 timestamp of the ingest.
    pub created_at: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Response body for GET /chatlog.
#[derive(Debug, Serialize)]
pub struct ChatLogResponse {
    pub lines: Vec<carousel_core::ChatLine>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// GET /
///
/// The per-user streaming-announcement cache as a JSON mapping.
pub async fn get_streaming(State(state): State<GatewayState>) -> Json<HashMap<String, String>> {
    Json(state.ephemeral.streaming_snapshot().await)
}

/// GET /chatlog
///
/// The ephemeral recent-chat-line log, oldest first.
pub async fn get_chatlog(State(state): State<GatewayState>) -> Json<ChatLogResponse> {
    Json(ChatLogResponse {
        lines: state.ephemeral.chat_lines().await,
    })
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// POST /v1/messages
///
/// Ingests a chat message and waits briefly for the first reply the engine
/// addresses back to this request. Triggers that produce no reply time out
/// into 204 No Content.
pub async fn post_messages(
    State(state): State<GatewayState>,
    Json(body): Json<MessageRequest>,
) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    let inbound = InboundMessage {
        id: request_id.clone(),
        sender_id: body.sender_id.unwrap_or_else(|| "api-user".to_string()),
        sender_is_bot: false,
        destination: request_id.clone(),
        text: body.content,
        attachment: body.attachment_url.map(|url| MediaReference { url }),
        timestamp: now.clone(),
    };

    ingest_and_wait(state, request_id, now, ChannelEvent::Message(inbound)).await
}

/// POST /v1/commands
///
/// Ingests a structured command; command handlers always reply.
pub async fn post_commands(
    State(state): State<GatewayState>,
    Json(body): Json<CommandRequest>,
) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    let now = chrono::Utc::now().to_rfc3339();

    let cmd = CommandInvocation {
        name: body.name,
        actor: body.actor,
        destination: request_id.clone(),
        options: body.options,
    };

    ingest_and_wait(state, request_id, now, ChannelEvent::Command(cmd)).await
}

/// POST /v1/presence
///
/// Fire-and-forget: streaming announcements go to the configured
/// announcement destination, not back to the requester.
pub async fn post_presence(
    State(state): State<GatewayState>,
    Json(body): Json<PresenceRequest>,
) -> Response {
    let update = PresenceUpdate {
        user_id: body.user_id,
        display_name: body.display_name,
        user_is_bot: body.is_bot,
        streaming: body.streaming,
    };

    match state.inbound_tx.try_send(ChannelEvent::Presence(update)) {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(_) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorResponse {
                error: "engine not accepting events".to_string(),
            }),
        )
            .into_response(),
    }
}

/// Register a reply waiter, enqueue the event, and wait for the first reply
/// addressed to `request_id`.
async fn ingest_and_wait(
    state: GatewayState,
    request_id: String,
    created_at: String,
    event: ChannelEvent,
) -> Response {
    let (tx, rx) = oneshot::channel::<String>();
    state.response_map.insert(request_id.clone(), tx);

    match tokio::time::timeout(
        std::time::Duration::from_secs(5),
        state.inbound_tx.send(event),
    )
    .await
    {
        Ok(Ok(())) => {}
        Ok(Err(_)) => {
            state.response_map.remove(&request_id);
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse {
                    error: "engine not accepting events".to_string(),
                }),
            )
                .into_response();
        }
        Err(_) => {
            state.response_map.remove(&request_id);
            return (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorResponse {
                    error: "inbound channel full".to_string(),
                }),
            )
                .into_response();
        }
    }

    match tokio::time::timeout(state.reply_timeout, rx).await {
        Ok(Ok(reply)) => (
            StatusCode::OK,
            Json(ReplyResponse {
                id: request_id,
                reply,
                created_at,
            }),
        )
            .into_response(),
        Ok(Err(_)) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "response channel closed".to_string(),
            }),
        )
            .into_response(),
        Err(_) => {
            // No reply addressed to this request; a silent no-op trigger.
            state.response_map.remove(&request_id);
            StatusCode::NO_CONTENT.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_request_deserializes_with_content_only() {
        let json = r#"{"content": "show me a dog"}"#;
        let req: MessageRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.content, "show me a dog");
        assert!(req.sender_id.is_none());
        assert!(req.attachment_url.is_none());
    }

    #[test]
    fn command_request_deserializes_with_options() {
        let json = r#"{
            "name": "create",
            "actor": "alice",
            "options": {"folder": "jokes", "message": "ha"}
        }"#;
        let req: CommandRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.name, "create");
        assert_eq!(req.actor, "alice");
        assert_eq!(req.options.get("folder").map(String::as_str), Some("jokes"));
    }

    #[test]
    fn presence_request_defaults_optional_fields() {
        let json = r#"{"user_id": "u-1", "display_name": "Ann"}"#;
        let req: PresenceRequest = serde_json::from_str(json).unwrap();
        assert!(!req.is_bot);
        assert!(req.streaming.is_none());
    }

    #[test]
    fn reply_response_serializes() {
        let resp = ReplyResponse {
            id: "req-1".to_string(),
            reply: "woof".to_string(),
            created_at: "2026-01-01T00:00:00Z".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"reply\":\"woof\""));
    }

    #[test]
    fn health_response_serializes() {
        let resp = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            uptime_secs: 42,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"status\":\"ok\""));
        assert!(json.contains("\"uptime_secs\":42"));
    }
}
