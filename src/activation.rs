use tracing::{info, instrument, warn};

use crate::commands::{LOUDSPEAKER_DESCRIPTION, LOUDSPEAKER_HINT};
use crate::configuration::Configuration;
use crate::error::{ActivationError, PlatformError};
use crate::platform::{BotDefinition, CommandDefinition, PluginApi};

/// What activation hands back to the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivatedBot {
    pub user_id: String,
}

/// Make sure the bot account is in place, give it its avatar and register the command.
///
/// Failing to set the avatar is logged and otherwise ignored.
#[instrument(skip(api, config))]
pub async fn activate<A>(api: &A, config: &Configuration) -> Result<ActivatedBot, ActivationError>
where
    A: PluginApi + ?Sized,
{
    let bot = BotDefinition {
        username: config.bot_name.clone(),
        display_name: config.bot_display_name.clone(),
    };
    let user_id = api
        .ensure_bot(&bot)
        .await
        .map_err(ActivationError::EnsureBot)?;
    info!("Bot user `{}` ({}) is ready", bot.display_name, user_id);

    if let Err(err) = set_profile_image(api, config, &user_id).await {
        warn!(
            "Failed to set profile image for the bot, continuing without it: {:#}",
            anyhow::Error::new(err)
        );
    }

    api.register_command(&command_definition(config))
        .await
        .map_err(ActivationError::RegisterCommand)?;
    info!("Registered /{}", config.command_trigger);

    Ok(ActivatedBot { user_id })
}

pub fn command_definition(config: &Configuration) -> CommandDefinition {
    CommandDefinition {
        trigger: config.command_trigger.clone(),
        auto_complete_desc: LOUDSPEAKER_DESCRIPTION.to_string(),
        auto_complete_hint: LOUDSPEAKER_HINT.to_string(),
    }
}

async fn set_profile_image<A>(
    api: &A,
    config: &Configuration,
    user_id: &str,
) -> Result<(), PlatformError>
where
    A: PluginApi + ?Sized,
{
    let image = tokio::fs::read(config.profile_image_path()).await?;
    api.set_profile_image(user_id, image).await
}
