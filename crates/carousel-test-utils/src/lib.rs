// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Carousel integration tests.
//!
//! Provides mock adapters and scripted randomness for fast, deterministic,
//! CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockChannel`] - Mock messaging channel with event injection and capture
//! - [`ScriptedRandom`] - Deterministic `RandomSource` with call recording
//! - [`StaticImageSearch`] / [`StaticTextGenerator`] / [`StaticImageGenerator`]
//!   - Pre-scripted collaborators
//! - [`FailingStore`] - A store whose every call fails

pub mod mock_channel;
pub mod mock_collab;
pub mod mock_random;

pub use mock_channel::MockChannel;
pub use mock_collab::{
    FailingStore, StaticImageGenerator, StaticImageSearch, StaticTextGenerator,
};
pub use mock_random::ScriptedRandom;
