// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock channel adapter for deterministic testing.
//!
//! `MockChannel` implements `Channel` with injectable inbound events and
//! captured outbound messages for assertion in tests.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use carousel_core::types::{
    AdapterType, ChannelEvent, HealthStatus, MessageId, OutboundBody, OutboundMessage,
};
use carousel_core::{Adapter, CarouselError, Channel};

/// A mock messaging channel for testing.
///
/// Provides two queues:
/// - **inbound**: Events injected via `inject_event()` are returned by `next_event()`
/// - **sent**: Messages passed to `send()` are captured and retrievable via `sent_messages()`
pub struct MockChannel {
    inbound: Arc<Mutex<VecDeque<ChannelEvent>>>,
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
    notify: Arc<Notify>,
}

impl MockChannel {
    /// Create a new mock channel with empty queues.
    pub fn new() -> Self {
        Self {
            inbound: Arc::new(Mutex::new(VecDeque::new())),
            sent: Arc::new(Mutex::new(Vec::new())),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Inject an inbound event into the receive queue.
    ///
    /// The next call to `next_event()` will return this event.
    pub async fn inject_event(&self, event: ChannelEvent) {
        self.inbound.lock().await.push_back(event);
        self.notify.notify_one();
    }

    /// Get all messages that were sent through `send()`.
    pub async fn sent_messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().await.clone()
    }

    /// Get the text bodies of all sent messages, in order.
    pub async fn sent_texts(&self) -> Vec<String> {
        self.sent
            .lock()
            .await
            .iter()
            .filter_map(|m| match &m.body {
                OutboundBody::Text(t) => Some(t.clone()),
                OutboundBody::Media(_) => None,
            })
            .collect()
    }

    /// Get the count of sent messages.
    pub async fn sent_count(&self) -> usize {
        self.sent.lock().await.len()
    }

    /// Clear all sent messages.
    pub async fn clear_sent(&self) {
        self.sent.lock().await.clear();
    }
}

impl Default for MockChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Adapter for MockChannel {
    fn name(&self) -> &str {
        "mock-channel"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, CarouselError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), CarouselError> {
        Ok(())
    }
}

#[async_trait]
impl Channel for MockChannel {
    async fn connect(&mut self) -> Result<(), CarouselError> {
        Ok(())
    }

    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, CarouselError> {
        let id = format!("mock-msg-{}", uuid::Uuid::new_v4());
        self.sent.lock().await.push(msg);
        Ok(MessageId(id))
    }

    async fn next_event(&self) -> Result<ChannelEvent, CarouselError> {
        loop {
            {
                let mut queue = self.inbound.lock().await;
                if let Some(event) = queue.pop_front() {
                    return Ok(event);
                }
            }
            // Wait for notification that a new event was injected.
            self.notify.notified().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carousel_core::types::InboundMessage;

    fn make_message(text: &str) -> ChannelEvent {
        ChannelEvent::Message(InboundMessage {
            id: format!("test-{}", uuid::Uuid::new_v4()),
            sender_id: "test-user".to_string(),
            sender_is_bot: false,
            destination: "test-chan".to_string(),
            text: text.to_string(),
            attachment: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }

    #[tokio::test]
    async fn next_event_returns_injected_events_in_order() {
        let channel = MockChannel::new();
        channel.inject_event(make_message("first")).await;
        channel.inject_event(make_message("second")).await;

        match channel.next_event().await.unwrap() {
            ChannelEvent::Message(m) => assert_eq!(m.text, "first"),
            other => panic!("expected message, got {other:?}"),
        }
        match channel.next_event().await.unwrap() {
            ChannelEvent::Message(m) => assert_eq!(m.text, "second"),
            other => panic!("expected message, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_captures_outbound_messages() {
        let channel = MockChannel::new();
        let msg_id = channel
            .send(OutboundMessage::text("chan-1", "response text"))
            .await
            .unwrap();
        assert!(msg_id.0.starts_with("mock-msg-"));

        let sent = channel.sent_messages().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].destination, "chan-1");
        assert_eq!(channel.sent_texts().await, vec!["response text"]);
    }

    #[tokio::test]
    async fn next_event_waits_for_injection() {
        let channel = Arc::new(MockChannel::new());
        let channel_clone = channel.clone();

        tokio::spawn(async move {
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
            channel_clone.inject_event(make_message("delayed")).await;
        });

        let event = tokio::time::timeout(
            tokio::time::Duration::from_secs(2),
            channel.next_event(),
        )
        .await
        .expect("next_event timed out")
        .unwrap();

        match event {
            ChannelEvent::Message(m) => assert_eq!(m.text, "delayed"),
            other => panic!("expected message, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn sent_count_and_clear() {
        let channel = MockChannel::new();
        assert_eq!(channel.sent_count().await, 0);

        channel
            .send(OutboundMessage::text("chan-1", "one"))
            .await
            .unwrap();
        channel
            .send(OutboundMessage::text("chan-1", "two"))
            .await
            .unwrap();
        assert_eq!(channel.sent_count().await, 2);

        channel.clear_sent().await;
        assert_eq!(channel.sent_count().await, 0);
    }
}
