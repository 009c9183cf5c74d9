// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Weekday folder announcements.

use std::sync::Arc;

use tracing::{debug, warn};

use carousel_core::types::{OutboundMessage, SortOrder};
use carousel_core::{CarouselError, Channel, ContentStore, RandomSource};

use crate::selector::ItemSelector;

/// Surfaces a candidate folder once per configured weekday and delivers one
/// item from it.
pub struct WeekdayAnnouncer {
    store: Arc<dyn ContentStore>,
    random: Arc<dyn RandomSource>,
    channel: Arc<dyn Channel>,
    selector: Arc<ItemSelector>,
    destination: String,
    /// Weekdays whose folder query is filtered by the weekday's first
    /// letter. Days sharing an initial are not disambiguated.
    letter_filter_days: Vec<String>,
}

impl WeekdayAnnouncer {
    pub fn new(
        store: Arc<dyn ContentStore>,
        random: Arc<dyn RandomSource>,
        channel: Arc<dyn Channel>,
        selector: Arc<ItemSelector>,
        destination: impl Into<String>,
        letter_filter_days: Vec<String>,
    ) -> Self {
        Self {
            store,
            random,
            channel,
            selector,
            destination: destination.into(),
            letter_filter_days,
        }
    }

    /// Run one weekday's announcement.
    ///
    /// Errors are logged per invocation; one weekday's failure never
    /// affects another's scheduled run.
    pub async fn announce(&self, weekday: &str) {
        if let Err(err) = self.announce_inner(weekday).await {
            warn!(weekday, error = %err, "weekday announcement failed");
        }
    }

    async fn announce_inner(&self, weekday: &str) -> Result<(), CarouselError> {
        let prefix = if self
            .letter_filter_days
            .iter()
            .any(|d| d.eq_ignore_ascii_case(weekday))
        {
            weekday
                .chars()
                .next()
                .map(|c| c.to_lowercase().to_string())
        } else {
            None
        };

        let candidates = self
            .store
            .folder_meta_by_recency(prefix.as_deref(), SortOrder::Ascending, 2)
            .await?;
        if candidates.is_empty() {
            debug!(weekday, "no candidate folders for announcement");
            return Ok(());
        }

        let meta = &candidates[self.random.pick(candidates.len())];
        let display = title_case_words(&meta.folder);
        self.channel
            .send(OutboundMessage::text(
                &self.destination,
                format!("It's {display} {weekday}"),
            ))
            .await?;

        match self.selector.select(&meta.folder).await {
            Ok(text) => {
                self.channel
                    .send(OutboundMessage::text(&self.destination, text))
                    .await?;
            }
            Err(err) if err.is_no_content() => {
                // The announced folder has metadata but nothing to deliver.
                debug!(weekday, folder = %meta.folder, "announced folder is empty");
            }
            Err(err) => return Err(err),
        }
        Ok(())
    }
}

/// Title-case each whitespace-separated word of a folder key for display:
/// `"monday_jokes"` becomes `"Monday_jokes"`.
fn title_case_words(folder: &str) -> String {
    folder
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
