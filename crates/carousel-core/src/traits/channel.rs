// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Channel adapter trait for messaging platform integrations.

use async_trait::async_trait;

use crate::error::CarouselError;
use crate::traits::adapter::Adapter;
use crate::types::{ChannelEvent, MessageId, OutboundMessage};

/// Adapter for bidirectional messaging channel integrations.
///
/// Channel adapters connect Carousel to an external messaging platform,
/// surfacing inbound events (messages, commands, presence changes) and
/// delivering outbound messages to named destinations.
#[async_trait]
pub trait Channel: Adapter {
    /// Establishes a connection to the messaging platform.
    async fn connect(&mut self) -> Result<(), CarouselError>;

    /// Sends a message through the channel.
    async fn send(&self, msg: OutboundMessage) -> Result<MessageId, CarouselError>;

    /// Receives the next inbound event from the channel.
    async fn next_event(&self) -> Result<ChannelEvent, CarouselError>;
}
