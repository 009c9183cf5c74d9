// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Streaming presence announcements with per-user dedupe.

use std::sync::Arc;

use tracing::warn;

use carousel_core::types::{OutboundMessage, PresenceUpdate, StreamingActivity};
use carousel_core::{Channel, EphemeralState};

/// Announces a user's streaming activity once per distinct message.
///
/// The per-user cache entry suppresses identical repeats until the daily
/// reset clears it.
pub struct StreamingAnnouncer {
    channel: Arc<dyn Channel>,
    state: Arc<EphemeralState>,
    destination: String,
}

impl StreamingAnnouncer {
    pub fn new(
        channel: Arc<dyn Channel>,
        state: Arc<EphemeralState>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            channel,
            state,
            destination: destination.into(),
        }
    }

    /// Handle one presence update. Bot users and non-streaming presences
    /// are ignored.
    pub async fn handle(&self, update: PresenceUpdate) {
        if update.user_is_bot {
            return;
        }
        let Some(activity) = update.streaming else {
            return;
        };

        let message = compose_streaming_message(&update.display_name, &activity);
        if self.state.record_streaming(&update.user_id, &message).await
            && let Err(err) = self
                .channel
                .send(OutboundMessage::text(&self.destination, message))
                .await
        {
            warn!(user = %update.user_id, error = %err, "streaming announcement failed");
        }
    }
}

/// `"<name> is streaming<state><details> on <activity><url>"`, with each
/// fragment included only when present.
fn compose_streaming_message(display_name: &str, activity: &StreamingActivity) -> String {
    let mut out = format!("{display_name} is streaming");
    if let Some(state) = &activity.state {
        out.push(' ');
        out.push_str(state);
    }
    if let Some(details) = &activity.details {
        out.push(' ');
        out.push_str(details);
    }
    if let Some(name) = &activity.name {
        out.push_str(" on ");
        out.push_str(name);
    }
    if let Some(url) = &activity.url {
        out.push(' ');
        out.push_str(url);
    }
    out
}
