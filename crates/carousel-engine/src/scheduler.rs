// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Background timers: the daily announcement check and the daily
//! ephemeral-cache reset.
//!
//! Both loops run on independent schedules under one cancellation token.
//! They may interleave freely: the reset only touches process-local caches,
//! never durable state.

use std::sync::Arc;

use chrono::{Datelike, Local};
use croner::Cron;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use carousel_config::model::ScheduleConfig;
use carousel_core::{CarouselError, EphemeralState};

use crate::announcer::WeekdayAnnouncer;

/// Parse both cron patterns and spawn the announcement and reset loops.
pub fn spawn_schedules(
    schedule: ScheduleConfig,
    announcer: Arc<WeekdayAnnouncer>,
    state: Arc<EphemeralState>,
    cancel: CancellationToken,
) -> Result<(), CarouselError> {
    let announce_cron = Cron::new(&schedule.announce_cron)
        .with_seconds_optional()
        .parse()
        .map_err(|e| CarouselError::Config(format!("schedule.announce_cron: {e}")))?;
    let reset_cron = Cron::new(&schedule.reset_cron)
        .with_seconds_optional()
        .parse()
        .map_err(|e| CarouselError::Config(format!("schedule.reset_cron: {e}")))?;

    let announce_days = schedule.announce_days.clone();
    let announce_pattern = schedule.announce_cron.clone();
    let reset_pattern = schedule.reset_cron.clone();
    let announce_cancel = cancel.clone();
    tokio::spawn(async move {
        run_announce_loop(
            announce_cron,
            announce_pattern,
            announce_days,
            announcer,
            announce_cancel,
        )
        .await;
    });

    tokio::spawn(async move {
        run_reset_loop(reset_cron, reset_pattern, state, cancel).await;
    });

    Ok(())
}

async fn run_announce_loop(
    cron: Cron,
    pattern: String,
    announce_days: Vec<String>,
    announcer: Arc<WeekdayAnnouncer>,
    cancel: CancellationToken,
) {
    info!(pattern, "announcement schedule started");
    loop {
        let Some(delay) = next_delay(&cron) else {
            warn!("announcement schedule has no next occurrence, stopping");
            return;
        };
        tokio::select! {
            _ = tokio::time::sleep(delay) => {
                let weekday = weekday_name(Local::now().weekday());
                if announce_days.iter().any(|d| d.eq_ignore_ascii_case(weekday)) {
                    announcer.announce(weekday).await;
                }
            }
            _ = cancel.cancelled() => {
                info!("announcement schedule shutting down");
                return;
            }
        }
    }
}

async fn run_reset_loop(
    cron: Cron,
    pattern: String,
    state: Arc<EphemeralState>,
    cancel: CancellationToken,
) {
    info!(pattern, "daily reset schedule started");
    loop {
        let Some(delay) = next_delay(&cron) else {
            warn!("reset schedule has no next occurrence, stopping");
            return;
        };
        tokio::select! {
            _ = tokio::time::sleep(delay) => {
                state.daily_reset().await;
                info!("ephemeral caches reset");
            }
            _ = cancel.cancelled() => {
                info!("reset schedule shutting down");
                return;
            }
        }
    }
}

/// Duration until the pattern's next occurrence in local time.
fn next_delay(cron: &Cron) -> Option<std::time::Duration> {
    let now = Local::now();
    let next = cron.find_next_occurrence(&now, false).ok()?;
    (next - now).to_std().ok()
}

/// Full English weekday name, matching the configured `announce_days`.
fn weekday_name(weekday: chrono::Weekday) -> &'static str {
    match weekday {
        chrono::Weekday::Mon => "Monday",
        chrono::Weekday::Tue => "Tuesday",
        chrono::Weekday::Wed => "Wednesday",
        chrono::Weekday::Thu => "Thursday",
        chrono::Weekday::Fri => "Friday",
        chrono::Weekday::Sat => "Saturday",
        chrono::Weekday::Sun => "Sunday",
    }
}
