// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Selection & rotation engine for Carousel.
//!
//! The engine consumes channel events and routes them through the trigger
//! dispatcher; scheduled timers drive weekday announcements and the daily
//! ephemeral-cache reset. Each triggering event runs in its own task:
//! concurrent selections -- even from the same folder -- are intentionally
//! unsynchronized, so two overlapping deliveries can occasionally pick the
//! same item. That duplication is accepted behavior, not a defect.

pub mod announcer;
pub mod commands;
pub mod dispatcher;
pub mod freshness;
pub mod presence;
pub mod scheduler;
pub mod selector;

pub use announcer::WeekdayAnnouncer;
pub use commands::CommandHandler;
pub use dispatcher::{Dispatcher, FAILURE_REPLY, Trigger, match_trigger};
pub use freshness::FolderFreshness;
pub use presence::StreamingAnnouncer;
pub use scheduler::spawn_schedules;
pub use selector::ItemSelector;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use carousel_core::{CarouselError, Channel};

/// The engine event loop: receives channel events and dispatches each in
/// its own task.
pub struct Engine {
    channel: Arc<dyn Channel>,
    dispatcher: Arc<Dispatcher>,
}

impl Engine {
    pub fn new(channel: Arc<dyn Channel>, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            channel,
            dispatcher,
        }
    }

    /// Run until cancelled or the channel closes.
    pub async fn run(&self, cancel: CancellationToken) -> Result<(), CarouselError> {
        info!("engine event loop started");
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("engine event loop shutting down");
                    return Ok(());
                }
                event = self.channel.next_event() => {
                    match event {
                        Ok(event) => {
                            let dispatcher = self.dispatcher.clone();
                            tokio::spawn(async move {
                                dispatcher.handle_event(event).await;
                            });
                        }
                        Err(err) => {
                            error!(error = %err, "channel receive failed");
                            return Err(err);
                        }
                    }
                }
            }
        }
    }
}
