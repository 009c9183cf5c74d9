// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Carousel configuration system.

use carousel_config::diagnostic::{ConfigError, suggest_key};
use carousel_config::model::CarouselConfig;
use carousel_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known sections deserializes successfully.
#[test]
fn valid_toml_deserializes_into_carousel_config() {
    let toml = r#"
[agent]
name = "eva"
log_level = "debug"
default_folder = "quotes"
fallback_attribution = "keeper"
chat_log_capacity = 50

[schedule]
announce_cron = "0 9 * * *"
reset_cron = "30 5 * * *"
announce_days = ["Monday", "Friday"]
letter_filter_days = ["Monday"]
announce_destination = "lounge"

[storage]
database_path = "/tmp/test.db"
wal_mode = false

[gateway]
host = "0.0.0.0"
port = 8080
reply_timeout_secs = 10

[generation]
api_key = "sk-ant-123"
model = "claude-haiku-4-5-20250901"
max_tokens = 400

[image_search]
endpoint = "https://images.example/api"

[imagine]
endpoint = "https://imagine.example/api"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "eva");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.agent.default_folder, "quotes");
    assert_eq!(config.agent.fallback_attribution, "keeper");
    assert_eq!(config.agent.chat_log_capacity, 50);
    assert_eq!(config.schedule.announce_days, vec!["Monday", "Friday"]);
    assert_eq!(config.schedule.letter_filter_days, vec!["Monday"]);
    assert_eq!(config.schedule.announce_destination, "lounge");
    assert_eq!(config.storage.database_path, "/tmp/test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.gateway.host, "0.0.0.0");
    assert_eq!(config.gateway.port, 8080);
    assert_eq!(config.gateway.reply_timeout_secs, 10);
    assert_eq!(config.generation.api_key.as_deref(), Some("sk-ant-123"));
    assert_eq!(config.generation.max_tokens, 400);
    assert_eq!(
        config.image_search.endpoint.as_deref(),
        Some("https://images.example/api")
    );
    assert_eq!(
        config.imagine.endpoint.as_deref(),
        Some("https://imagine.example/api")
    );
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.agent.name, "carousel");
    assert_eq!(config.agent.log_level, "info");
    assert_eq!(config.agent.default_folder, "carousel");
    assert_eq!(config.agent.chat_log_capacity, 200);
    assert_eq!(config.schedule.announce_cron, "0 9 * * *");
    assert_eq!(config.schedule.reset_cron, "30 5 * * *");
    assert_eq!(
        config.schedule.announce_days,
        vec!["Monday", "Tuesday", "Friday", "Saturday"]
    );
    assert_eq!(
        config.schedule.letter_filter_days,
        config.schedule.announce_days
    );
    assert!(config.storage.database_path.ends_with("carousel.db"));
    assert!(config.storage.wal_mode);
    assert!(config.gateway.enabled);
    assert_eq!(config.gateway.host, "127.0.0.1");
    assert_eq!(config.gateway.port, 3000);
    assert!(config.generation.api_key.is_none());
    assert_eq!(config.generation.max_tokens, 500);
    assert_eq!(config.generation.temperature, 0.7);
    assert_eq!(config.generation.top_p, 0.95);
    assert_eq!(config.generation.top_k, 40);
    assert!(config.image_search.endpoint.is_none());
    assert!(config.imagine.endpoint.is_none());
}

/// Unknown field in [agent] section is rejected by deny_unknown_fields.
#[test]
fn unknown_field_in_agent_produces_error() {
    let toml = r#"
[agent]
naem = "test"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("naem"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[observability]
level = "debug"
"#;

    let err =
        load_config_from_str(toml).expect_err("unknown top-level section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("observability"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Environment-style dotted overrides merge over TOML values.
#[test]
fn dotted_override_beats_toml() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let toml_content = r#"
[agent]
name = "from-toml"
"#;

    let config: CarouselConfig = Figment::new()
        .merge(Serialized::defaults(CarouselConfig::default()))
        .merge(Toml::string(toml_content))
        .merge(("agent.name", "from-env"))
        .extract()
        .expect("should merge override");

    assert_eq!(config.agent.name, "from-env");
}

/// `schedule.announce_cron` maps as one key, not `schedule.announce.cron`.
#[test]
fn dotted_override_for_underscore_key() {
    use figment::{Figment, providers::Serialized};

    let config: CarouselConfig = Figment::new()
        .merge(Serialized::defaults(CarouselConfig::default()))
        .merge(("schedule.announce_cron", "15 8 * * *"))
        .extract()
        .expect("should set announce_cron via dot notation");

    assert_eq!(config.schedule.announce_cron, "15 8 * * *");
}

/// Missing config files are silently skipped (Figment's Toml::file behavior).
#[test]
fn missing_config_files_silently_skipped() {
    use figment::{
        Figment,
        providers::{Format, Serialized, Toml},
    };

    let config: CarouselConfig = Figment::new()
        .merge(Serialized::defaults(CarouselConfig::default()))
        .merge(Toml::file("/nonexistent/path/carousel.toml"))
        .extract()
        .expect("missing file should be silently skipped");

    assert_eq!(config.agent.name, "carousel");
}

/// Diagnostic conversion surfaces the unknown key with a suggestion.
#[test]
fn diagnostic_error_includes_unknown_key() {
    let toml = r#"
[agent]
naem = "test"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    assert!(!errors.is_empty(), "should have at least one error");

    let has_unknown_key = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys } if {
            key == "naem"
                && suggestion.as_deref() == Some("name")
                && valid_keys.contains("default_folder")
        })
    });
    assert!(
        has_unknown_key,
        "should have UnknownKey error for 'naem' with suggestion 'name', got: {errors:?}"
    );
}

/// Fuzzy suggestions work for schedule keys.
#[test]
fn diagnostic_suggests_close_schedule_key() {
    let valid_keys = &[
        "announce_cron",
        "reset_cron",
        "announce_days",
        "letter_filter_days",
        "announce_destination",
    ];
    assert_eq!(
        suggest_key("anounce_days", valid_keys),
        Some("announce_days".to_string())
    );
}

/// Validation errors flow through load_and_validate_str.
#[test]
fn validation_catches_bad_cron_through_load() {
    let toml = r#"
[schedule]
announce_cron = "not a cron"
"#;

    let errors = load_and_validate_str(toml).expect_err("bad cron should fail");
    let has_validation_error = errors.iter().any(|e| {
        matches!(e, ConfigError::Validation { message } if message.contains("announce_cron"))
    });
    assert!(
        has_validation_error,
        "should have validation error for bad cron, got: {errors:?}"
    );
}

/// Invalid type (string where number expected) produces a clear message.
#[test]
fn diagnostic_invalid_type_message() {
    let toml = r#"
[gateway]
port = "not_a_number"
"#;

    let err = load_config_from_str(toml).expect_err("should reject invalid type");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("invalid type") || err_str.contains("port"),
        "error should mention type mismatch, got: {err_str}"
    );
}
