// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `carousel serve` command implementation.
//!
//! Wires the SQLite content store, the configured collaborators, the HTTP
//! gateway channel, the trigger dispatcher, and the background schedules,
//! then runs the engine event loop until a shutdown signal arrives.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use carousel_anthropic::AnthropicGenerator;
use carousel_config::CarouselConfig;
use carousel_core::{
    Adapter, CarouselError, Channel, ContentStore, EphemeralState, ImageGenerator,
    ImageSearch, TextGenerator, ThreadRngSource, Unconfigured,
};
use carousel_engine::{
    CommandHandler, Dispatcher, Engine, ItemSelector, StreamingAnnouncer, WeekdayAnnouncer,
    spawn_schedules,
};
use carousel_gateway::{GatewayChannel, GatewayChannelConfig};
use carousel_media::{HttpImageGenerator, HttpImageSearch};
use carousel_storage::SqliteContentStore;

/// Runs the `carousel serve` command.
pub async fn run_serve(config: CarouselConfig) -> Result<(), CarouselError> {
    init_tracing(&config.agent.log_level);
    info!("starting carousel serve");

    // The gateway is the only compiled-in channel; without it the engine
    // has no event source.
    if !config.gateway.enabled {
        return Err(CarouselError::Config(
            "gateway.enabled = false, but the gateway is the only configured channel".into(),
        ));
    }

    // Initialize storage.
    let store = SqliteContentStore::new(config.storage.clone());
    store.initialize().await?;
    let store: Arc<dyn ContentStore> = Arc::new(store);
    info!(path = %config.storage.database_path, "content store initialized");

    // Ephemeral caches, shared with the gateway's debug endpoints.
    let state = Arc::new(EphemeralState::new(config.agent.chat_log_capacity));

    // Collaborators: each is optional, replaced by an `Unconfigured` stub
    // that answers with a collaborator error.
    let text_generator: Arc<dyn TextGenerator> = match &config.generation.api_key {
        Some(_) => {
            let generator = AnthropicGenerator::new(&config.generation)?;
            info!(model = %config.generation.model, "text generation enabled");
            Arc::new(generator)
        }
        None => {
            info!("text generation disabled (no generation.api_key)");
            Arc::new(Unconfigured)
        }
    };

    let image_search: Arc<dyn ImageSearch> = match &config.image_search.endpoint {
        Some(endpoint) => {
            info!(endpoint = %endpoint, "image search enabled");
            Arc::new(HttpImageSearch::new(endpoint.clone())?)
        }
        None => {
            info!("image search disabled (no image_search.endpoint)");
            Arc::new(Unconfigured)
        }
    };

    let image_generator: Arc<dyn ImageGenerator> = match &config.imagine.endpoint {
        Some(endpoint) => {
            info!(endpoint = %endpoint, "image generation enabled");
            Arc::new(HttpImageGenerator::new(endpoint.clone())?)
        }
        None => {
            info!("image generation disabled (no imagine.endpoint)");
            Arc::new(Unconfigured)
        }
    };

    // Connect the gateway channel.
    let mut gateway = GatewayChannel::new(
        GatewayChannelConfig {
            host: config.gateway.host.clone(),
            port: config.gateway.port,
            reply_timeout_secs: config.gateway.reply_timeout_secs,
        },
        state.clone(),
    );
    gateway.connect().await?;
    let channel: Arc<dyn Channel> = Arc::new(gateway);

    // Build the rotation engine.
    let random = Arc::new(ThreadRngSource);
    let selector = Arc::new(ItemSelector::new(
        store.clone(),
        random.clone(),
        config.agent.fallback_attribution.clone(),
    ));
    let announcer = Arc::new(WeekdayAnnouncer::new(
        store.clone(),
        random,
        channel.clone(),
        selector.clone(),
        config.schedule.announce_destination.clone(),
        config.schedule.letter_filter_days.clone(),
    ));
    let commands = CommandHandler::new(
        store.clone(),
        channel.clone(),
        config.agent.registration_url.clone(),
    );
    let presence = StreamingAnnouncer::new(
        channel.clone(),
        state.clone(),
        config.schedule.announce_destination.clone(),
    );
    let dispatcher = Arc::new(Dispatcher::new(
        selector,
        channel.clone(),
        image_search,
        text_generator,
        image_generator,
        commands,
        presence,
        state.clone(),
        config.agent.name.clone(),
        config.agent.default_folder.clone(),
    ));

    // Install signal handler.
    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown signal received");
            signal_cancel.cancel();
        }
    });

    // Background schedules: weekday announcements and the daily cache reset.
    spawn_schedules(config.schedule.clone(), announcer, state, cancel.clone())?;

    // Run the event loop until cancelled.
    let engine = Engine::new(channel.clone(), dispatcher);
    let run_result = engine.run(cancel).await;

    // Graceful teardown.
    if let Err(err) = channel.shutdown().await {
        error!(error = %err, "gateway shutdown failed");
    }
    store.shutdown().await?;

    info!("carousel serve shutdown complete");
    run_result
}

/// Initializes the tracing subscriber with the given log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("carousel={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
