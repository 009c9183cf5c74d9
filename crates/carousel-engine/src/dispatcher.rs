// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trigger matching and routing for inbound chat events.
//!
//! Phrase matching is an ordered first-match-wins scan over the lowercased
//! message text, not a tokenizer. The rule order is load-bearing: a message
//! containing both an assistant mention and a "show me" phrase resolves to
//! whichever rule is listed earlier.

use std::sync::Arc;

use tracing::{debug, warn};

use carousel_core::state::ChatLine;
use carousel_core::types::{ChannelEvent, InboundMessage, OutboundMessage};
use carousel_core::{Channel, EphemeralState, ImageGenerator, ImageSearch, TextGenerator};

use crate::commands::CommandHandler;
use crate::presence::StreamingAnnouncer;
use crate::selector::ItemSelector;

/// Generic user-visible reply when a collaborator fails.
pub const FAILURE_REPLY: &str = "I can't show that!";

/// A matched trigger, carrying the text extracted from the lowercased
/// message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// "show me ..." phrases; `key` is the folder/search key (may be empty).
    ShowMe { key: String },
    /// Assistant-name-prefixed "imagine" directive.
    Imagine { prompt: String },
    /// Assistant-name-prefixed generic directive.
    Directive { prompt: String },
    /// Bare mention of the assistant name anywhere in the text.
    Mention,
}

type Matcher = fn(&str, &str) -> Option<Trigger>;

/// Ordered rule table, evaluated first-match-wins. The "show me" variants
/// differ only in which words are stripped as the matched prefix, so the
/// most specific phrasings come first.
const RULES: &[Matcher] = &[
    match_show_me_an_the,
    match_show_me_a,
    match_show_me,
    match_imagine,
    match_directive,
    match_mention,
];

/// Match `text` against the trigger rules for the given (lowercase)
/// assistant name.
pub fn match_trigger(assistant_name: &str, text: &str) -> Option<Trigger> {
    let lower = text.to_lowercase();
    RULES
        .iter()
        .find_map(|rule| rule(assistant_name, &lower))
}

/// Remainder of `text` after the earliest occurrence of any pattern.
fn split_after_earliest<'a>(text: &'a str, patterns: &[&str]) -> Option<&'a str> {
    patterns
        .iter()
        .filter_map(|p| text.find(p).map(|start| (start, start + p.len())))
        .min()
        .map(|(_, end)| &text[end..])
}

fn match_show_me_an_the(_name: &str, text: &str) -> Option<Trigger> {
    split_after_earliest(text, &["show me an ", "show me the "]).map(|rest| Trigger::ShowMe {
        key: rest.trim().to_string(),
    })
}

fn match_show_me_a(_name: &str, text: &str) -> Option<Trigger> {
    split_after_earliest(text, &["show me a "]).map(|rest| Trigger::ShowMe {
        key: rest.trim().to_string(),
    })
}

fn match_show_me(_name: &str, text: &str) -> Option<Trigger> {
    split_after_earliest(text, &["show me "]).map(|rest| Trigger::ShowMe {
        key: rest.trim().to_string(),
    })
}

fn match_imagine(name: &str, text: &str) -> Option<Trigger> {
    let rest = text.strip_prefix(name)?;
    let rest = rest.strip_prefix(' ')?;
    let prompt = rest.strip_prefix("imagine")?;
    if !prompt.is_empty() && !prompt.starts_with(' ') {
        return None;
    }
    Some(Trigger::Imagine {
        prompt: prompt.trim().to_string(),
    })
}

fn match_directive(name: &str, text: &str) -> Option<Trigger> {
    let rest = text.strip_prefix(name)?;
    let rest = rest.strip_prefix(' ')?;
    Some(Trigger::Directive {
        prompt: rest.trim().to_string(),
    })
}

fn match_mention(name: &str, text: &str) -> Option<Trigger> {
    text.contains(name).then_some(Trigger::Mention)
}

/// Routes inbound channel events to the selector, collaborators, command
/// handler, and presence announcer.
pub struct Dispatcher {
    selector: Arc<ItemSelector>,
    channel: Arc<dyn Channel>,
    image_search: Arc<dyn ImageSearch>,
    text_generator: Arc<dyn TextGenerator>,
    image_generator: Arc<dyn ImageGenerator>,
    commands: CommandHandler,
    presence: StreamingAnnouncer,
    state: Arc<EphemeralState>,
    assistant_name: String,
    default_folder: String,
}

impl Dispatcher {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        selector: Arc<ItemSelector>,
        channel: Arc<dyn Channel>,
        image_search: Arc<dyn ImageSearch>,
        text_generator: Arc<dyn TextGenerator>,
        image_generator: Arc<dyn ImageGenerator>,
        commands: CommandHandler,
        presence: StreamingAnnouncer,
        state: Arc<EphemeralState>,
        assistant_name: impl Into<String>,
        default_folder: impl Into<String>,
    ) -> Self {
        Self {
            selector,
            channel,
            image_search,
            text_generator,
            image_generator,
            commands,
            presence,
            state,
            assistant_name: assistant_name.into().to_lowercase(),
            default_folder: default_folder.into(),
        }
    }

    /// Handle one inbound event. Every failure path is isolated here: this
    /// method never returns an error, leaving the engine ready for the next
    /// event.
    pub async fn handle_event(&self, event: ChannelEvent) {
        match event {
            ChannelEvent::Message(msg) => self.handle_message(msg).await,
            ChannelEvent::Command(cmd) => self.commands.handle(cmd).await,
            ChannelEvent::Presence(update) => self.presence.handle(update).await,
        }
    }

    async fn handle_message(&self, msg: InboundMessage) {
        if msg.sender_is_bot {
            return;
        }

        self.state
            .record_line(ChatLine {
                sender: msg.sender_id.clone(),
                text: msg.text.clone(),
                at: msg.timestamp.clone(),
            })
            .await;

        let Some(trigger) = match_trigger(&self.assistant_name, &msg.text) else {
            return;
        };
        debug!(sender = %msg.sender_id, ?trigger, "trigger matched");

        match trigger {
            Trigger::ShowMe { key } => self.handle_show_me(&msg, &key).await,
            Trigger::Imagine { prompt } => self.handle_imagine(&msg, &prompt).await,
            Trigger::Directive { prompt } => self.handle_directive(&msg, &prompt).await,
            Trigger::Mention => {
                self.deliver_folder(&msg.destination, &self.default_folder)
                    .await
            }
        }
    }

    async fn handle_show_me(&self, msg: &InboundMessage, key: &str) {
        if key.is_empty() {
            return;
        }

        match self.selector.select(key).await {
            Ok(text) => self.send_text(&msg.destination, text).await,
            // The selector folds store failures into NoContent, so any
            // error here means: try the image search fallback.
            Err(_) => {
                let safe_mode = !key.starts_with("nsfw ");
                match self.image_search.search(key, safe_mode).await {
                    Ok(media) => {
                        self.send(OutboundMessage::media(&msg.destination, media))
                            .await
                    }
                    Err(err) => {
                        warn!(key, error = %err, "image search fallback failed");
                        self.send_text(&msg.destination, FAILURE_REPLY).await;
                    }
                }
            }
        }
    }

    async fn handle_imagine(&self, msg: &InboundMessage, prompt: &str) {
        if prompt.is_empty() && msg.attachment.is_none() {
            return;
        }

        match self
            .image_generator
            .generate(prompt, msg.attachment.as_ref())
            .await
        {
            Ok(images) if images.is_empty() => {
                self.send_text(&msg.destination, FAILURE_REPLY).await;
            }
            Ok(images) => {
                for image in images {
                    self.send(OutboundMessage::media(&msg.destination, image))
                        .await;
                }
            }
            Err(err) => {
                warn!(prompt, error = %err, "image generation failed");
                self.send_text(&msg.destination, FAILURE_REPLY).await;
            }
        }
    }

    async fn handle_directive(&self, msg: &InboundMessage, prompt: &str) {
        if prompt.is_empty() {
            // A bare directive falls back to the default folder.
            return self
                .deliver_folder(&msg.destination, &self.default_folder)
                .await;
        }

        match self.text_generator.generate(prompt).await {
            Ok(reply) => self.send_text(&msg.destination, reply).await,
            Err(err) => {
                warn!(prompt, error = %err, "text generation failed");
                self.send_text(&msg.destination, FAILURE_REPLY).await;
            }
        }
    }

    /// Deliver one item from `folder`, or silently no-op when the folder is
    /// empty.
    async fn deliver_folder(&self, destination: &str, folder: &str) {
        match self.selector.select(folder).await {
            Ok(text) => self.send_text(destination, text).await,
            Err(_) => debug!(folder, "nothing to deliver"),
        }
    }

    async fn send_text(&self, destination: &str, text: impl Into<String>) {
        self.send(OutboundMessage::text(destination, text)).await;
    }

    async fn send(&self, msg: OutboundMessage) {
        let destination = msg.destination.clone();
        if let Err(err) = self.channel.send(msg).await {
            warn!(destination, error = %err, "channel send failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: &str = "carousel";

    fn show_me(key: &str) -> Option<Trigger> {
        Some(Trigger::ShowMe {
            key: key.to_string(),
        })
    }

    #[test]
    fn show_me_an_and_the_share_a_rule() {
        assert_eq!(match_trigger(NAME, "show me an owl"), show_me("owl"));
        assert_eq!(match_trigger(NAME, "show me the moon"), show_me("moon"));
    }

    #[test]
    fn show_me_a_strips_the_article() {
        assert_eq!(match_trigger(NAME, "show me a dog"), show_me("dog"));
    }

    #[test]
    fn bare_show_me_is_the_generic_fallback() {
        assert_eq!(match_trigger(NAME, "show me dogs"), show_me("dogs"));
        // "an" without a trailing space is not the article rule.
        assert_eq!(
            match_trigger(NAME, "show me angry cats"),
            show_me("angry cats")
        );
    }

    #[test]
    fn phrase_may_appear_mid_message() {
        assert_eq!(
            match_trigger(NAME, "hey could you show me a capybara please"),
            show_me("capybara please")
        );
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert_eq!(match_trigger(NAME, "Show Me A DOG"), show_me("dog"));
    }

    #[test]
    fn empty_key_still_matches_the_show_me_rule() {
        // The predicate is the phrase itself; an empty remainder matches
        // and the handler no-ops, rather than falling through to later
        // rules.
        assert_eq!(match_trigger(NAME, "show me an "), show_me(""));
    }

    #[test]
    fn show_me_beats_mention_regardless_of_position() {
        assert_eq!(
            match_trigger(NAME, "carousel show me a dog"),
            show_me("dog")
        );
    }

    #[test]
    fn earliest_occurrence_wins_within_a_rule() {
        assert_eq!(
            match_trigger(NAME, "show me the show me an owl"),
            show_me("show me an owl")
        );
    }

    #[test]
    fn imagine_directive_extracts_prompt() {
        assert_eq!(
            match_trigger(NAME, "carousel imagine a red fox"),
            Some(Trigger::Imagine {
                prompt: "a red fox".to_string()
            })
        );
        assert_eq!(
            match_trigger(NAME, "carousel imagine"),
            Some(Trigger::Imagine {
                prompt: String::new()
            })
        );
    }

    #[test]
    fn imagine_requires_word_boundary() {
        // A longer word starting with "imagine" is a generic directive.
        assert_eq!(
            match_trigger(NAME, "carousel imagines things"),
            Some(Trigger::Directive {
                prompt: "imagines things".to_string()
            })
        );
    }

    #[test]
    fn name_prefixed_text_is_a_directive() {
        assert_eq!(
            match_trigger(NAME, "carousel tell me a story"),
            Some(Trigger::Directive {
                prompt: "tell me a story".to_string()
            })
        );
        assert_eq!(
            match_trigger(NAME, "carousel "),
            Some(Trigger::Directive {
                prompt: String::new()
            })
        );
    }

    #[test]
    fn bare_mention_anywhere_matches() {
        assert_eq!(match_trigger(NAME, "carousel"), Some(Trigger::Mention));
        assert_eq!(
            match_trigger(NAME, "i love carousel so much"),
            Some(Trigger::Mention)
        );
    }

    #[test]
    fn unrelated_text_matches_nothing() {
        assert_eq!(match_trigger(NAME, "good morning everyone"), None);
    }

    #[test]
    fn nsfw_prefix_is_preserved_in_the_key() {
        assert_eq!(
            match_trigger(NAME, "show me nsfw cat"),
            show_me("nsfw cat")
        );
    }
}
