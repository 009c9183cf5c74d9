// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Carousel rotation engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Carousel configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CarouselConfig {
    /// Assistant identity and trigger settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Weekday announcement and daily reset schedules.
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Storage backend settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Text-generation collaborator settings.
    #[serde(default)]
    pub generation: GenerationConfig,

    /// Image-search collaborator settings.
    #[serde(default)]
    pub image_search: ImageSearchConfig,

    /// Image-generation collaborator settings.
    #[serde(default)]
    pub imagine: ImagineConfig,
}

/// Assistant identity and trigger configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Assistant name matched by mention and directive triggers.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Folder delivered on a bare assistant mention. Lowercase.
    #[serde(default = "default_folder")]
    pub default_folder: String,

    /// Attribution written back when a stored item has no `created_by`.
    #[serde(default = "default_fallback_attribution")]
    pub fallback_attribution: String,

    /// Registration link included in the unregistered-actor reply.
    #[serde(default)]
    pub registration_url: Option<String>,

    /// Maximum number of recent chat lines kept for the debug log endpoint.
    #[serde(default = "default_chat_log_capacity")]
    pub chat_log_capacity: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            default_folder: default_folder(),
            fallback_attribution: default_fallback_attribution(),
            registration_url: None,
            chat_log_capacity: default_chat_log_capacity(),
        }
    }
}

fn default_agent_name() -> String {
    "carousel".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_folder() -> String {
    "carousel".to_string()
}

fn default_fallback_attribution() -> String {
    "carousel".to_string()
}

fn default_chat_log_capacity() -> usize {
    200
}

/// Weekday announcement and daily reset schedule configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleConfig {
    /// Cron pattern for the daily announcement check, local time.
    #[serde(default = "default_announce_cron")]
    pub announce_cron: String,

    /// Cron pattern for the daily ephemeral-cache reset, local time.
    #[serde(default = "default_reset_cron")]
    pub reset_cron: String,

    /// Weekdays on which the announcer runs at all.
    #[serde(default = "default_announce_days")]
    pub announce_days: Vec<String>,

    /// Subset of `announce_days` whose folder query is filtered to keys
    /// starting with the weekday's first letter. Days sharing an initial
    /// are not disambiguated.
    #[serde(default = "default_announce_days")]
    pub letter_filter_days: Vec<String>,

    /// Destination channel for announcements and streaming notices.
    #[serde(default = "default_announce_destination")]
    pub announce_destination: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            announce_cron: default_announce_cron(),
            reset_cron: default_reset_cron(),
            announce_days: default_announce_days(),
            letter_filter_days: default_announce_days(),
            announce_destination: default_announce_destination(),
        }
    }
}

fn default_announce_cron() -> String {
    "0 9 * * *".to_string()
}

fn default_reset_cron() -> String {
    "30 5 * * *".to_string()
}

fn default_announce_days() -> Vec<String> {
    ["Monday", "Tuesday", "Friday", "Saturday"]
        .iter()
        .map(|d| d.to_string())
        .collect()
}

fn default_announce_destination() -> String {
    "general".to_string()
}

/// Storage backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Enable WAL (Write-Ahead Logging) mode for SQLite.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("carousel").join("carousel.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("carousel.db"))
        .to_string_lossy()
        .into_owned()
}

fn default_wal_mode() -> bool {
    true
}

/// HTTP gateway configuration.
///
/// The gateway carries the read-only debug endpoints plus the ingest
/// endpoints that stand in for a chat platform.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Enable the gateway.
    #[serde(default = "default_gateway_enabled")]
    pub enabled: bool,

    /// Host address to bind.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_gateway_port")]
    pub port: u16,

    /// Seconds an ingest request waits for a reply before returning 204.
    #[serde(default = "default_reply_timeout_secs")]
    pub reply_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            enabled: default_gateway_enabled(),
            host: default_gateway_host(),
            port: default_gateway_port(),
            reply_timeout_secs: default_reply_timeout_secs(),
        }
    }
}

fn default_gateway_enabled() -> bool {
    true
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    3000
}

fn default_reply_timeout_secs() -> u64 {
    30
}

/// Text-generation collaborator configuration.
///
/// Sampling parameters are fixed per deployment; the engine never varies
/// them per request.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    /// Anthropic API key. `None` disables the text-generation collaborator.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier for generation requests.
    #[serde(default = "default_model")]
    pub model: String,

    /// Anthropic API version string.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Maximum tokens to generate per response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Nucleus sampling probability mass.
    #[serde(default = "default_top_p")]
    pub top_p: f64,

    /// Top-k sampling cutoff.
    #[serde(default = "default_top_k")]
    pub top_k: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            api_version: default_api_version(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            top_k: default_top_k(),
        }
    }
}

fn default_model() -> String {
    "claude-haiku-4-5-20250901".to_string()
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f64 {
    0.7
}

fn default_top_p() -> f64 {
    0.95
}

fn default_top_k() -> u32 {
    40
}

/// Image-search collaborator configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ImageSearchConfig {
    /// Base URL of the image search service. `None` disables the fallback.
    #[serde(default)]
    pub endpoint: Option<String>,
}

/// Image-generation collaborator configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ImagineConfig {
    /// Base URL of the image generation service. `None` disables the
    /// imagine directive.
    #[serde(default)]
    pub endpoint: Option<String>,
}
