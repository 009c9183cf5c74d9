// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state. All endpoints are
//! unauthenticated: the GETs are debug surfaces and the POSTs are local
//! chat-platform stand-ins, per the gateway's role.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    Router,
    routing::{get, post},
};
use dashmap::DashMap;
use tokio::sync::{mpsc, oneshot};
use tower_http::cors::CorsLayer;

use carousel_core::types::ChannelEvent;
use carousel_core::{CarouselError, EphemeralState};

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Channel for sending inbound events to the engine loop.
    pub inbound_tx: mpsc::Sender<ChannelEvent>,
    /// Map of request_id -> oneshot sender for HTTP response routing.
    pub response_map: Arc<DashMap<String, oneshot::Sender<String>>>,
    /// Ephemeral caches surfaced by the debug endpoints.
    pub ephemeral: Arc<EphemeralState>,
    /// How long an ingest request waits for a reply.
    pub reply_timeout: Duration,
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

/// Gateway server configuration (mirrors GatewayConfig from carousel-config).
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

/// Build the gateway router.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/", get(handlers::get_streaming))
        .route("/chatlog", get(handlers::get_chatlog))
        .route("/health", get(handlers::get_health))
        .route("/v1/messages", post(handlers::post_messages))
        .route("/v1/commands", post(handlers::post_commands))
        .route("/v1/presence", post(handlers::post_presence))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

/// Start the gateway HTTP server.
pub async fn start_server(config: &ServerConfig, state: GatewayState) -> Result<(), CarouselError> {
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener =
        tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| CarouselError::Channel {
                message: format!("failed to bind gateway to {addr}: {e}"),
                source: Some(Box::new(e)),
            })?;

    tracing::info!("gateway listening on {addr}");

    axum::serve(listener, app)
        .await
        .map_err(|e| CarouselError::Channel {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
