// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP media collaborators: image search fallback and image generation.
//!
//! Both clients talk to configurable endpoints and are optional: when no
//! endpoint is configured, the binary wires `carousel_core::Unconfigured`
//! in their place.

pub mod imagine;
pub mod search;

pub use imagine::HttpImageGenerator;
pub use search::HttpImageSearch;
