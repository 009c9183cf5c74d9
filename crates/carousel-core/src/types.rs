// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Carousel engine.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a delivered message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub String);

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the type of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Channel,
    Store,
    ImageSearch,
    TextGeneration,
    ImageGeneration,
}

/// Sort direction for recency-ordered store queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Least-recently-updated first.
    Ascending,
    /// Most-recently-updated first.
    Descending,
}

// --- Stored entities ---

/// A stored text message belonging to one folder.
///
/// `folder` is always lowercase and trimmed; `text` is always trimmed.
/// Timestamps are store-assigned RFC 3339 strings. An item whose
/// `created_at` equals its `updated_at` has never been delivered ("fresh").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub folder: String,
    pub text: String,
    /// Rotation marker toggled on every delivery; not a read-receipt.
    pub seen: bool,
    pub created_by: Option<String>,
    /// Opaque access-permission strings, carried through updates unchanged.
    pub permissions: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Item {
    /// Returns true if this item has never been delivered since creation.
    pub fn is_fresh(&self) -> bool {
        self.created_at == self.updated_at
    }
}

/// Fields for creating a new item. Timestamps and id are store-assigned.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub folder: String,
    pub text: String,
    pub created_by: String,
    pub permissions: Vec<String>,
}

/// Full-field rewrite of an existing item. The store rewrites `updated_at`.
#[derive(Debug, Clone)]
pub struct ItemUpdate {
    pub folder: String,
    pub text: String,
    pub seen: bool,
    pub created_by: String,
    pub permissions: Vec<String>,
}

/// A page of items from a recency-ordered query.
///
/// `total` is the folder's full item count regardless of the query limit,
/// mirroring the store contract's `{total, documents}` result shape.
#[derive(Debug, Clone)]
pub struct ItemPage {
    pub total: u64,
    pub items: Vec<Item>,
}

/// Per-folder rotation-state summary. At most one record per folder key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderMeta {
    pub folder: String,
    /// Toggled on every delivery from the folder; independent of item `seen`.
    pub seen: bool,
    pub updated_at: String,
}

/// An identity allowed to create items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredActor {
    pub id: String,
    pub username: String,
}

// --- Channel payload types ---

/// A reference to an external media resource (image URL).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaReference {
    pub url: String,
}

/// An inbound free-text chat message.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub id: String,
    pub sender_id: String,
    pub sender_is_bot: bool,
    /// Reply destination for anything this message triggers.
    pub destination: String,
    pub text: String,
    /// Optional uploaded image, usable as generation conditioning input.
    pub attachment: Option<MediaReference>,
    pub timestamp: String,
}

/// A structured command invocation (create, echo).
#[derive(Debug, Clone)]
pub struct CommandInvocation {
    pub name: String,
    /// Chat identity of the invoking actor.
    pub actor: String,
    pub destination: String,
    pub options: BTreeMap<String, String>,
}

/// A streaming activity attached to a presence update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamingActivity {
    pub state: Option<String>,
    pub details: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
}

/// A presence change for a chat user.
#[derive(Debug, Clone)]
pub struct PresenceUpdate {
    pub user_id: String,
    pub display_name: String,
    pub user_is_bot: bool,
    /// Present when the user is currently streaming.
    pub streaming: Option<StreamingActivity>,
}

/// Any event a channel adapter can surface to the engine.
#[derive(Debug, Clone)]
pub enum ChannelEvent {
    Message(InboundMessage),
    Command(CommandInvocation),
    Presence(PresenceUpdate),
}

/// Body of an outbound message: plain text or a media reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutboundBody {
    Text(String),
    Media(MediaReference),
}

/// An outbound message to be sent via a channel adapter.
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    pub destination: String,
    pub body: OutboundBody,
}

impl OutboundMessage {
    /// Convenience constructor for a plain-text message.
    pub fn text(destination: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            body: OutboundBody::Text(text.into()),
        }
    }

    /// Convenience constructor for a media message.
    pub fn media(destination: impl Into<String>, media: MediaReference) -> Self {
        Self {
            destination: destination.into(),
            body: OutboundBody::Media(media),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn adapter_type_serialization() {
        let store = AdapterType::Store;
        let json = serde_json::to_string(&store).expect("should serialize");
        let parsed: AdapterType = serde_json::from_str(&json).expect("should deserialize");
        assert_eq!(store, parsed);
    }

    #[test]
    fn adapter_type_display_round_trip() {
        let variants = [
            AdapterType::Channel,
            AdapterType::Store,
            AdapterType::ImageSearch,
            AdapterType::TextGeneration,
            AdapterType::ImageGeneration,
        ];
        for variant in &variants {
            let s = variant.to_string();
            let parsed = AdapterType::from_str(&s).expect("should parse back");
            assert_eq!(*variant, parsed);
        }
    }

    #[test]
    fn fresh_item_detection() {
        let mut item = Item {
            id: "i1".into(),
            folder: "dog".into(),
            text: "woof".into(),
            seen: false,
            created_by: None,
            permissions: vec![],
            created_at: "2026-01-01T00:00:00.000Z".into(),
            updated_at: "2026-01-01T00:00:00.000Z".into(),
        };
        assert!(item.is_fresh());

        item.updated_at = "2026-01-02T00:00:00.000Z".into();
        assert!(!item.is_fresh());
    }

    #[test]
    fn outbound_constructors() {
        let msg = OutboundMessage::text("chan-1", "hello");
        assert_eq!(msg.destination, "chan-1");
        assert_eq!(msg.body, OutboundBody::Text("hello".into()));

        let media = OutboundMessage::media(
            "chan-1",
            MediaReference {
                url: "https://img.example/cat.png".into(),
            },
        );
        match media.body {
            OutboundBody::Media(m) => assert_eq!(m.url, "https://img.example/cat.png"),
            _ => panic!("expected media body"),
        }
    }
}
