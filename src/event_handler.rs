use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use serenity::async_trait;
use serenity::builder::{
    CreateInteractionResponse, CreateInteractionResponseFollowup,
    CreateInteractionResponseMessage, EditInteractionResponse,
};
use serenity::model::application::{CommandInteraction, Interaction, ResolvedValue};
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tracing::{error, info, instrument, warn};

use crate::activation::activate;
use crate::commands::{loudspeaker, CommandArgs};
use crate::configuration::Configuration;
use crate::discord::{DiscordHost, MESSAGE_OPTION};
use crate::utils::{split_message, MAX_MESSAGE_LEN};

pub struct Handler {
    pub(crate) config: Arc<Configuration>,
    /// Set once `ready` fires for the first time; later reconnects skip activation
    pub(crate) is_activating: AtomicBool,
    pub(crate) bot_user_id: OnceLock<String>,
}

impl Handler {
    pub fn new(config: Arc<Configuration>) -> Self {
        Self {
            config,
            is_activating: AtomicBool::new(false),
            bot_user_id: OnceLock::new(),
        }
    }

    fn host(&self, ctx: &Context) -> DiscordHost {
        DiscordHost::new(ctx.http.clone(), self.config.dev_guild_id)
    }

    #[instrument(skip(self, ctx, command), fields(user = %command.user.id))]
    async fn run_loudspeaker(&self, ctx: &Context, command: &CommandInteraction) {
        let Some(bot_user_id) = self.bot_user_id.get() else {
            let response = CreateInteractionResponseMessage::new()
                .content("I'm still starting up, try again in a moment")
                .ephemeral(true);
            if let Err(why) = command
                .create_response(&ctx.http, CreateInteractionResponse::Message(response))
                .await
            {
                error!("Cannot respond to slash command: {}", why);
            }
            return;
        };

        // Posting to every guild easily takes longer than the 3 seconds
        // Discord allows before the first response.
        if let Err(why) = command.defer_ephemeral(&ctx.http).await {
            error!("Cannot defer slash command response: {}", why);
            return;
        }

        let args = command_args(&self.config.command_trigger, command);
        let text = match loudspeaker::execute(&self.host(ctx), &self.config, bot_user_id, &args)
            .await
        {
            Ok(response) => response.text,
            Err(err) => {
                warn!("Announcement aborted: {}", err);
                err.to_string()
            }
        };

        let mut chunks = split_message(&text, MAX_MESSAGE_LEN).into_iter();
        if let Some(first) = chunks.next() {
            if let Err(why) = command
                .edit_response(&ctx.http, EditInteractionResponse::new().content(first))
                .await
            {
                error!("Cannot edit deferred response: {}", why);
                return;
            }
        }
        for chunk in chunks {
            let followup = CreateInteractionResponseFollowup::new()
                .content(chunk)
                .ephemeral(true);
            if let Err(why) = command.create_followup(&ctx.http, followup).await {
                error!("Cannot send follow-up message: {}", why);
                return;
            }
        }
    }
}

/// Rebuild the command line the user typed, `/{trigger} {message}`.
fn command_args(trigger: &str, command: &CommandInteraction) -> CommandArgs {
    let message = command
        .data
        .options()
        .into_iter()
        .find(|option| option.name == MESSAGE_OPTION)
        .and_then(|option| match option.value {
            ResolvedValue::String(text) => Some(text.to_string()),
            _ => None,
        })
        .unwrap_or_default();

    CommandArgs {
        command: format!("/{} {}", trigger, message),
        user_id: command.user.id.to_string(),
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        if let Interaction::Command(command) = interaction {
            if command.data.name == self.config.command_trigger {
                self.run_loudspeaker(&ctx, &command).await;
            }
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("Connected as {}", ready.user.name);

        if self
            .is_activating
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return;
        }

        match activate(&self.host(&ctx), &self.config).await {
            Ok(bot) => {
                let _ = self.bot_user_id.set(bot.user_id);
            }
            Err(err) => {
                error!("Activation failed, shutting down: {:#}", anyhow::Error::new(err));
                ctx.shard.shutdown_clean();
            }
        }
    }
}
