// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Carousel rotation engine.
//!
//! This crate provides the foundational trait definitions, error types,
//! entity and channel payload types, and the process-local ephemeral state
//! shared between the engine and the HTTP debug surface. All collaborator
//! adapters implement traits defined here.

pub mod error;
pub mod state;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::CarouselError;
pub use state::{ChatLine, EphemeralState};
pub use types::{AdapterType, HealthStatus, MessageId, SortOrder};

// Re-export all adapter traits at crate root.
pub use traits::{
    Adapter, Channel, ContentStore, ImageGenerator, ImageSearch, RandomSource,
    TextGenerator, ThreadRngSource, Unconfigured,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_has_all_taxonomy_variants() {
        // Spec taxonomy: NoContent, collaborator failure classes, and the
        // creation-gate rejection all exist and can be constructed.
        let _config = CarouselError::Config("test".into());
        let _no_content = CarouselError::NoContent {
            folder: "test".into(),
        };
        let _store = CarouselError::Store {
            source: Box::new(std::io::Error::other("test")),
        };
        let _channel = CarouselError::Channel {
            message: "test".into(),
            source: None,
        };
        let _collab = CarouselError::Collaborator {
            message: "test".into(),
            source: None,
        };
        let _actor = CarouselError::UnregisteredActor {
            actor: "test".into(),
        };
        let _internal = CarouselError::Internal("test".into());
    }

    #[test]
    fn all_trait_modules_are_exported() {
        // Compile-time check that every adapter seam is accessible through
        // the public API.
        fn _assert_adapter<T: Adapter>() {}
        fn _assert_channel<T: Channel>() {}
        fn _assert_store<T: ContentStore>() {}
        fn _assert_search<T: ImageSearch>() {}
        fn _assert_text_gen<T: TextGenerator>() {}
        fn _assert_image_gen<T: ImageGenerator>() {}
        fn _assert_random<T: RandomSource>() {}
    }
}
