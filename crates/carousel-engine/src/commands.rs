// SPDX-FileCopyrightText: 2026 Carousel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Structured command handling: item creation and echo.

use std::sync::Arc;

use tracing::{debug, error};

use carousel_core::types::{CommandInvocation, NewItem, OutboundMessage};
use carousel_core::{CarouselError, Channel, ContentStore};

use crate::dispatcher::FAILURE_REPLY;

/// Handles structured commands arriving alongside free-text triggers.
pub struct CommandHandler {
    store: Arc<dyn ContentStore>,
    channel: Arc<dyn Channel>,
    registration_url: Option<String>,
}

impl CommandHandler {
    pub fn new(
        store: Arc<dyn ContentStore>,
        channel: Arc<dyn Channel>,
        registration_url: Option<String>,
    ) -> Self {
        Self {
            store,
            channel,
            registration_url,
        }
    }

    /// Handle one command invocation, replying to its destination.
    ///
    /// Never returns an error: an unregistered actor gets the instructional
    /// registration message, and any other failure is logged and answered
    /// with the generic failure reply.
    pub async fn handle(&self, cmd: CommandInvocation) {
        let result = match cmd.name.as_str() {
            "create" => self.handle_create(&cmd).await,
            "echo" => self.handle_echo(&cmd).await,
            other => {
                debug!(command = other, "ignoring unknown command");
                Ok(())
            }
        };

        match result {
            Ok(()) => {}
            Err(CarouselError::UnregisteredActor { actor }) => {
                debug!(actor, "rejected creation from unregistered actor");
                self.reply(&cmd.destination, self.registration_message())
                    .await;
            }
            Err(err) => {
                error!(command = %cmd.name, actor = %cmd.actor, error = %err, "command failed");
                self.reply(&cmd.destination, FAILURE_REPLY.to_string()).await;
            }
        }
    }

    async fn handle_create(&self, cmd: &CommandInvocation) -> Result<(), CarouselError> {
        let folder = cmd
            .options
            .get("folder")
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CarouselError::Internal("create command missing folder".into()))?;
        let text = cmd
            .options
            .get("message")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CarouselError::Internal("create command missing message".into()))?;

        // Creation is gated on a registered account; nothing is written for
        // unknown identities.
        let actor = self
            .store
            .registered_actor(&cmd.actor)
            .await?
            .ok_or_else(|| CarouselError::UnregisteredActor {
                actor: cmd.actor.clone(),
            })?;

        self.store
            .create_item(NewItem {
                folder: folder.clone(),
                text: text.clone(),
                created_by: cmd.actor.clone(),
                permissions: vec![format!("write:user:{}", actor.id)],
            })
            .await?;

        self.reply(
            &cmd.destination,
            format!("Added '{text}' to [{folder}] successfully"),
        )
        .await;
        Ok(())
    }

    async fn handle_echo(&self, cmd: &CommandInvocation) -> Result<(), CarouselError> {
        let message = cmd
            .options
            .get("message")
            .cloned()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| CarouselError::Internal("echo command missing message".into()))?;
        self.reply(&cmd.destination, message).await;
        Ok(())
    }

    fn registration_message(&self) -> String {
        match &self.registration_url {
            Some(url) => {
                format!("Your account isn't registered. Visit {url} to get started")
            }
            None => "Your account isn't registered.".to_string(),
        }
    }

    async fn reply(&self, destination: &str, text: String) {
        if let Err(err) = self
            .channel
            .send(OutboundMessage::text(destination, text))
            .await
        {
            error!(destination, error = %err, "command reply failed");
        }
    }
}
