// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-local ephemeral caches shared between the engine and the
//! read-only HTTP debug surface.
//!
//! Both caches are explicit, injectable state with a documented lifecycle:
//! the daily reset timer clears them, and they are lost on restart by design.
//! Neither is part of the durable entity model.

use std::collections::{HashMap, VecDeque};

use serde::Serialize;
use tokio::sync::Mutex;

/// One recent chat line, kept for the debug log endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ChatLine {
    pub sender: String,
    pub text: String,
    pub at: String,
}

/// Process-local ephemeral state: the per-user streaming-announcement dedupe
/// map and the bounded recent-chat-line log.
pub struct EphemeralState {
    streaming: Mutex<HashMap<String, String>>,
    chat_log: Mutex<VecDeque<ChatLine>>,
    chat_log_cap: usize,
}

impl EphemeralState {
    /// Create empty state with the given chat-log capacity.
    pub fn new(chat_log_cap: usize) -> Self {
        Self {
            streaming: Mutex::new(HashMap::new()),
            chat_log: Mutex::new(VecDeque::new()),
            chat_log_cap,
        }
    }

    /// Record a streaming announcement for a user.
    ///
    /// Returns `true` if the message differs from the user's cached entry
    /// (and was stored), `false` if it is an identical repeat.
    pub async fn record_streaming(&self, user_id: &str, message: &str) -> bool {
        let mut map = self.streaming.lock().await;
        if map.get(user_id).is_some_and(|prev| prev.as_str() == message) {
            return false;
        }
        map.insert(user_id.to_string(), message.to_string());
        true
    }

    /// Snapshot of the per-user streaming-announcement map.
    pub async fn streaming_snapshot(&self) -> HashMap<String, String> {
        self.streaming.lock().await.clone()
    }

    /// Append a chat line, evicting the oldest when over capacity.
    pub async fn record_line(&self, line: ChatLine) {
        let mut log = self.chat_log.lock().await;
        log.push_back(line);
        while log.len() > self.chat_log_cap {
            log.pop_front();
        }
    }

    /// Snapshot of the recent chat lines, oldest first.
    pub async fn chat_lines(&self) -> Vec<ChatLine> {
        self.chat_log.lock().await.iter().cloned().collect()
    }

    /// Daily reset: clears both caches. Never touches durable state.
    pub async fn daily_reset(&self) {
        self.streaming.lock().await.clear();
        self.chat_log.lock().await.clear();
    }
}
