// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway implementing the `Channel` trait.
//!
//! The gateway stands in for a chat platform: HTTP handlers create channel
//! events and push them to an mpsc channel, `GatewayChannel::next_event()`
//! reads from it, and `GatewayChannel::send()` routes replies back to
//! waiting HTTP handlers via oneshot channels. By implementing the same
//! `Channel` seam a chat adapter would, the engine stays protocol agnostic.
//!
//! Replies addressed to destinations with no waiting handler (the
//! announcement destination, timed-out requests) are dropped at debug
//! level; the ingest surface is a debug stand-in, not a chat client.

pub mod handlers;
pub mod server;

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::{Mutex, mpsc};

use carousel_core::types::{
    AdapterType, ChannelEvent, HealthStatus, MessageId, OutboundBody, OutboundMessage,
};
use carousel_core::{Adapter, CarouselError, Channel, EphemeralState};

use crate::server::{GatewayState, ServerConfig};

/// Gateway channel configuration (mirrors GatewayConfig from
/// carousel-config to avoid a config-crate dependency here).
#[derive(Debug, Clone)]
pub struct GatewayChannelConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Seconds an ingest request waits for a reply.
    pub reply_timeout_secs: u64,
}

/// HTTP gateway implementing the `Channel` trait.
pub struct GatewayChannel {
    config: GatewayChannelConfig,
    inbound_tx: mpsc::Sender<ChannelEvent>,
    inbound_rx: Mutex<mpsc::Receiver<ChannelEvent>>,
    response_map: Arc<DashMap<String, tokio::sync::oneshot::Sender<String>>>,
    ephemeral: Arc<EphemeralState>,
    server_handle: Mutex<Option<tokio::task::JoinHandle<()>>>,
}

impl GatewayChannel {
    /// Create a new GatewayChannel sharing the given ephemeral state.
    pub fn new(config: GatewayChannelConfig, ephemeral: Arc<EphemeralState>) -> Self {
        let (inbound_tx, inbound_rx) = mpsc::channel(256);
        Self {
            config,
            inbound_tx,
            inbound_rx: Mutex::new(inbound_rx),
            response_map: Arc::new(DashMap::new()),
            ephemeral,
            server_handle: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Adapter for GatewayChannel {
    fn name(&self) -> &str {
        "gateway"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, CarouselError> {
        let handle = self.server_handle.lock().await;
        if handle.is_some() {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Unhealthy("server not started".to_string()))
        }
    }

    async fn shutdown(&self) -> Result<(), CarouselError> {
        let mut handle = self.server_handle.lock().await;
        if let Some(h) = handle.take() {
            h.abort();
        }
        Ok(())
    }
}

#[async_trait]
impl Channel for GatewayChannel {
    async fn connect(&mut self) -> Result<(), CarouselError> {
        let server_config = ServerConfig {
            host: self.config.host.clone(),
            port: self.config.port,
        };

        let state = GatewayState {
            inbound_tx: self.inbound_tx.clone(),
            response_map: Arc::clone(&self.response_map),
            ephemeral: Arc::clone(&self.ephemeral),
            reply_timeout: Duration::from_secs(self.config.reply_timeout_secs),
            start_time: Instant::now(),
        };

        let handle = tokio::spawn(async move {
            if let Err(e) = server::start_server(&server_config, state).await {
                tracing::error!("gateway server error: {e}");
            }
        });

        let mut server_handle = self.server_handle.lock().await;
        *server_handle = Some(handle);

        tracing::info!(
            "gateway channel connected on {}:{}",
            self.config.host,
            self.config.port
        );
        Ok(())
    }

    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, CarouselError> {
        let text = match msg.body {
            OutboundBody::Text(t) => t,
            OutboundBody::Media(m) => m.url,
        };

        if let Some((_, sender)) = self.response_map.remove(&msg.destination) {
            let _ = sender.send(text);
        } else {
            // Announcement destinations and timed-out requests have no
            // waiting handler.
            tracing::debug!(
                destination = %msg.destination,
                "no waiting ingest request for destination, dropping reply"
            );
        }
        Ok(MessageId(msg.destination))
    }

    async fn next_event(&self) -> Result<ChannelEvent, CarouselError> {
        let mut rx = self.inbound_rx.lock().await;
        rx.recv().await.ok_or_else(|| CarouselError::Channel {
            message: "gateway inbound channel closed".to_string(),
            source: None,
        })
    }
}
