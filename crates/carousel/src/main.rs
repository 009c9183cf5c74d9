// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Carousel - a chat-triggered content rotation engine.
//!
//! This is the binary entry point for the Carousel service.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod serve;

/// Carousel - a chat-triggered content rotation engine.
#[derive(Parser, Debug)]
#[command(name = "carousel", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Carousel service.
    Serve,
    /// Print the resolved configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match carousel_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            carousel_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(err) = serve::run_serve(config).await {
                eprintln!("carousel serve failed: {err}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            print_config(&config);
        }
        None => {
            println!("carousel: use --help for available commands");
        }
    }
}

/// Print the resolved configuration as TOML, with secrets redacted.
fn print_config(config: &carousel_config::CarouselConfig) {
    let mut shown = config.clone();
    if shown.generation.api_key.is_some() {
        shown.generation.api_key = Some("[redacted]".to_string());
    }
    match toml::to_string_pretty(&shown) {
        Ok(rendered) => println!("{rendered}"),
        Err(err) => eprintln!("failed to render config: {err}"),
    }
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed).
        let config =
            carousel_config::load_and_validate().expect("default config should be valid");
        assert_eq!(config.agent.name, "carousel");
    }

    #[test]
    fn printed_config_redacts_api_key() {
        let mut config = carousel_config::CarouselConfig::default();
        config.generation.api_key = Some("sk-ant-secret".to_string());
        // print_config redacts before rendering; exercise the same path.
        super::print_config(&config);
        let mut shown = config.clone();
        shown.generation.api_key = Some("[redacted]".to_string());
        let rendered = toml::to_string_pretty(&shown).unwrap();
        assert!(!rendered.contains("sk-ant-secret"));
        assert!(rendered.contains("[redacted]"));
    }
}
