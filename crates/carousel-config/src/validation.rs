// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as parseable cron patterns, real weekday names, and
//! sampling parameter ranges.

use crate::diagnostic::ConfigError;
use crate::model::CarouselConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &CarouselConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.agent.name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "agent.name must not be empty".to_string(),
        });
    }

    // The default folder is a folder key, so the lowercase/trimmed invariant
    // applies to it as well.
    let folder = &config.agent.default_folder;
    if folder.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "agent.default_folder must not be empty".to_string(),
        });
    } else if *folder != folder.trim().to_lowercase() {
        errors.push(ConfigError::Validation {
            message: format!(
                "agent.default_folder `{folder}` must be lowercase and trimmed"
            ),
        });
    }

    if config.agent.chat_log_capacity == 0 {
        errors.push(ConfigError::Validation {
            message: "agent.chat_log_capacity must be at least 1".to_string(),
        });
    }

    for (key, pattern) in [
        ("schedule.announce_cron", &config.schedule.announce_cron),
        ("schedule.reset_cron", &config.schedule.reset_cron),
    ] {
        if let Err(e) = croner::Cron::new(pattern).with_seconds_optional().parse() {
            errors.push(ConfigError::Validation {
                message: format!("{key} `{pattern}` is not a valid cron pattern: {e}"),
            });
        }
    }

    for (key, days) in [
        ("schedule.announce_days", &config.schedule.announce_days),
        ("schedule.letter_filter_days", &config.schedule.letter_filter_days),
    ] {
        for day in days.iter() {
            if day.parse::<chrono::Weekday>().is_err() {
                errors.push(ConfigError::Validation {
                    message: format!("{key} contains unknown weekday `{day}`"),
                });
            }
        }
    }

    // The letter filter only applies to days the announcer runs on.
    for day in &config.schedule.letter_filter_days {
        if !config.schedule.announce_days.contains(day) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "schedule.letter_filter_days contains `{day}` which is not in schedule.announce_days"
                ),
            });
        }
    }

    if config.schedule.announce_destination.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "schedule.announce_destination must not be empty".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.gateway.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gateway.host must not be empty".to_string(),
        });
    }

    let generation = &config.generation;
    if generation.max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "generation.max_tokens must be at least 1".to_string(),
        });
    }
    if !(0.0..=1.0).contains(&generation.temperature) {
        errors.push(ConfigError::Validation {
            message: format!(
                "generation.temperature must be within [0.0, 1.0], got {}",
                generation.temperature
            ),
        });
    }
    if !(generation.top_p > 0.0 && generation.top_p <= 1.0) {
        errors.push(ConfigError::Validation {
            message: format!(
                "generation.top_p must be within (0.0, 1.0], got {}",
                generation.top_p
            ),
        });
    }
    if generation.top_k == 0 {
        errors.push(ConfigError::Validation {
            message: "generation.top_k must be at least 1".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = CarouselConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn uppercase_default_folder_fails_validation() {
        let mut config = CarouselConfig::default();
        config.agent.default_folder = "Jokes".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("lowercase"))
        ));
    }

    #[test]
    fn bad_cron_pattern_fails_validation() {
        let mut config = CarouselConfig::default();
        config.schedule.announce_cron = "every day at nine".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("announce_cron"))
        ));
    }

    #[test]
    fn unknown_weekday_fails_validation() {
        let mut config = CarouselConfig::default();
        config.schedule.announce_days.push("Funday".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("Funday"))
        ));
    }

    #[test]
    fn letter_filter_day_outside_announce_days_fails() {
        let mut config = CarouselConfig::default();
        config.schedule.announce_days = vec!["Monday".to_string()];
        config.schedule.letter_filter_days = vec!["Tuesday".to_string()];
        let errors = validate_config(&config).unwrap_err();
        assert!(errors.iter().any(
            |e| matches!(e, ConfigError::Validation { message } if message.contains("letter_filter_days"))
        ));
    }

    #[test]
    fn out_of_range_sampling_parameters_fail() {
        let mut config = CarouselConfig::default();
        config.generation.temperature = 1.5;
        config.generation.top_p = 0.0;
        config.generation.top_k = 0;
        config.generation.max_tokens = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn direct_toml_deserialization_validates() {
        let toml_str = r#"
[schedule]
announce_days = ["Monday", "Friday"]
letter_filter_days = ["Friday"]
"#;
        let config: CarouselConfig = toml::from_str(toml_str).unwrap();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.schedule.letter_filter_days, vec!["Friday"]);
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = CarouselConfig::default();
        config.agent.default_folder = "jokes".to_string();
        config.schedule.announce_days = vec!["Monday".to_string(), "Friday".to_string()];
        config.schedule.letter_filter_days = vec!["Monday".to_string()];
        config.generation.temperature = 0.0;
        assert!(validate_config(&config).is_ok());
    }
}
