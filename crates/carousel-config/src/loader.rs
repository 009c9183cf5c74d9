// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./carousel.toml` > `~/.config/carousel/carousel.toml`
//! > `/etc/carousel/carousel.toml` with environment variable overrides via
//! `CAROUSEL_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::CarouselConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/carousel/carousel.toml` (system-wide)
/// 3. `~/.config/carousel/carousel.toml` (user XDG config)
/// 4. `./carousel.toml` (local directory)
/// 5. `CAROUSEL_*` environment variables
pub fn load_config() -> Result<CarouselConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CarouselConfig::default()))
        .merge(Toml::file("/etc/carousel/carousel.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("carousel/carousel.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("carousel.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<CarouselConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CarouselConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CarouselConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CarouselConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `CAROUSEL_AGENT_DEFAULT_FOLDER` must map
/// to `agent.default_folder`, not `agent.default.folder`.
fn env_provider() -> Env {
    Env::prefixed("CAROUSEL_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: CAROUSEL_SCHEDULE_ANNOUNCE_CRON -> "schedule_announce_cron"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("schedule_", "schedule.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("gateway_", "gateway.", 1)
            .replacen("generation_", "generation.", 1)
            .replacen("image_search_", "image_search.", 1)
            .replacen("imagine_", "imagine.", 1);
        mapped.into()
    })
}
