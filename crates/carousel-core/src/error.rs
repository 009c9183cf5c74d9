// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Carousel rotation engine.

use thiserror::Error;

/// The primary error type used across all Carousel adapter traits and core operations.
#[derive(Debug, Error)]
pub enum CarouselError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// A folder has zero eligible items. Recovered locally by the caller
    /// (collaborator fallback or silent no-op), never shown to the end user.
    #[error("no content in folder `{folder}`")]
    NoContent { folder: String },

    /// Content store errors (connection, query failure, serialization).
    #[error("store error: {source}")]
    Store {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Delivery channel errors (connection failure, message format, routing).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Collaborator errors (image search, text generation, image generation).
    #[error("collaborator error: {message}")]
    Collaborator {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A creation request arrived from an identity with no registered account.
    #[error("unregistered actor `{actor}`")]
    UnregisteredActor { actor: String },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CarouselError {
    /// Returns true if this error is the recoverable no-content case.
    pub fn is_no_content(&self) -> bool {
        matches!(self, CarouselError::NoContent { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_content_is_recoverable() {
        let err = CarouselError::NoContent {
            folder: "dog".into(),
        };
        assert!(err.is_no_content());
        assert_eq!(err.to_string(), "no content in folder `dog`");
    }

    #[test]
    fn other_variants_are_not_no_content() {
        let err = CarouselError::Store {
            source: Box::new(std::io::Error::other("disk gone")),
        };
        assert!(!err.is_no_content());

        let err = CarouselError::UnregisteredActor {
            actor: "stranger".into(),
        };
        assert!(!err.is_no_content());
        assert!(err.to_string().contains("stranger"));
    }
}
