use std::sync::Arc;

use async_trait::async_trait;
use serenity::builder::{CreateAttachment, CreateCommand, CreateCommandOption, EditProfile};
use serenity::http::Http;
use serenity::model::application::{Command, CommandOptionType};
use serenity::model::channel::ChannelType;
use serenity::model::id::{ChannelId, GuildId};
use tracing::{info, instrument};

use crate::error::PlatformError;
use crate::platform::{
    BotDefinition, ChannelRef, CommandDefinition, PluginApi, Post, TeamDirectory, TeamRef,
};
use crate::utils::MAX_MESSAGE_LEN;

/// Name of the single string option carrying the announcement text.
pub const MESSAGE_OPTION: &str = "message";

/// Discord behind the platform traits. Guilds are teams, guild text channels are channels.
pub struct DiscordHost {
    http: Arc<Http>,
    dev_guild_id: Option<GuildId>,
}

/// Where the slash command gets registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandScope {
    Global,
    Guild(GuildId),
}

impl DiscordHost {
    pub fn new(http: Arc<Http>, dev_guild_id: Option<GuildId>) -> Self {
        Self { http, dev_guild_id }
    }

    /// A dev guild, when configured, replaces global registration so the
    /// command isn't listed twice there.
    pub fn command_scope(&self) -> CommandScope {
        match self.dev_guild_id {
            Some(guild_id) => CommandScope::Guild(guild_id),
            None => CommandScope::Global,
        }
    }
}

fn parse_id(raw: &str) -> Result<u64, PlatformError> {
    match raw.parse::<u64>() {
        Ok(id) if id != 0 => Ok(id),
        _ => Err(PlatformError::InvalidId(raw.to_string())),
    }
}

/// Slash command equivalent of a [`CommandDefinition`]: the hint becomes the
/// description of a required `message` option, capped at what a single
/// Discord message can hold.
pub fn build_command(command: &CommandDefinition) -> CreateCommand {
    CreateCommand::new(&command.trigger)
        .description(&command.auto_complete_desc)
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                MESSAGE_OPTION,
                &command.auto_complete_hint,
            )
            .required(true)
            .max_length(MAX_MESSAGE_LEN as u16),
        )
}

#[async_trait]
impl TeamDirectory for DiscordHost {
    async fn list_teams(&self) -> Result<Vec<TeamRef>, PlatformError> {
        // a single page; Discord returns up to 200 guilds
        let guilds = self.http.get_guilds(None, None).await?;
        Ok(guilds
            .into_iter()
            .map(|guild| TeamRef {
                id: guild.id.to_string(),
                display_name: guild.name,
            })
            .collect())
    }

    async fn channel_by_name(
        &self,
        team_id: &str,
        channel_name: &str,
    ) -> Result<ChannelRef, PlatformError> {
        let guild_id = GuildId::new(parse_id(team_id)?);
        let channels = guild_id.channels(&*self.http).await?;
        channels
            .into_values()
            .find(|channel| channel.kind == ChannelType::Text && channel.name == channel_name)
            .map(|channel| ChannelRef {
                id: channel.id.to_string(),
                display_name: channel.name,
            })
            .ok_or_else(|| {
                PlatformError::NotFound(format!("#{} in guild {}", channel_name, team_id))
            })
    }

    /// Discord only lets the token's own user post, so `post.author_id` is
    /// always the bot and is not sent anywhere.
    async fn create_post(&self, post: &Post) -> Result<String, PlatformError> {
        let channel_id = ChannelId::new(parse_id(&post.channel_id)?);
        let message = channel_id.say(&*self.http, &post.message).await?;
        Ok(message.id.to_string())
    }
}

#[async_trait]
impl PluginApi for DiscordHost {
    #[instrument(skip(self))]
    async fn ensure_bot(&self, bot: &BotDefinition) -> Result<String, PlatformError> {
        let mut current_user = self.http.get_current_user().await?;
        if !current_user.bot {
            return Err(PlatformError::NotABot(current_user.name.clone()));
        }
        if current_user.name != bot.username {
            info!(
                "Renaming bot user from `{}` to `{}`",
                current_user.name, bot.username
            );
            current_user
                .edit(&*self.http, EditProfile::new().username(&bot.username))
                .await?;
        }
        Ok(current_user.id.to_string())
    }

    async fn set_profile_image(
        &self,
        _bot_user_id: &str,
        image: Vec<u8>,
    ) -> Result<(), PlatformError> {
        let avatar = CreateAttachment::bytes(image, "icon.png");
        let mut current_user = self.http.get_current_user().await?;
        current_user
            .edit(&*self.http, EditProfile::new().avatar(&avatar))
            .await?;
        Ok(())
    }

    async fn register_command(&self, command: &CommandDefinition) -> Result<(), PlatformError> {
        match self.command_scope() {
            CommandScope::Guild(guild_id) => {
                guild_id
                    .create_command(&*self.http, build_command(command))
                    .await?;
                info!("Registered /{} in guild {}", command.trigger, guild_id);
            }
            CommandScope::Global => {
                // Global commands can take up to an hour to show up in clients
                Command::create_global_command(&*self.http, build_command(command)).await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_rejects_garbage_and_zero() {
        assert_eq!(parse_id("81384788765712384").unwrap(), 81384788765712384);
        assert!(matches!(parse_id("0"), Err(PlatformError::InvalidId(_))));
        assert!(matches!(parse_id("town-square"), Err(PlatformError::InvalidId(_))));
    }

    #[test]
    fn test_dev_guild_replaces_global_registration() {
        let http = Arc::new(Http::new("token"));
        let guild_id = GuildId::new(81384788765712384);

        let dev = DiscordHost::new(http.clone(), Some(guild_id));
        let prod = DiscordHost::new(http, None);

        assert_eq!(dev.command_scope(), CommandScope::Guild(guild_id));
        assert_eq!(prod.command_scope(), CommandScope::Global);
    }

    #[test]
    fn test_message_option_is_capped_at_message_limit() {
        let command = build_command(&CommandDefinition {
            trigger: "loudspeaker".to_string(),
            auto_complete_desc: "Announce message to all teams".to_string(),
            auto_complete_hint: "[Message]".to_string(),
        });

        let value = serenity::json::to_value(command).unwrap();
        let option = &value["options"][0];

        assert_eq!(value["name"], "loudspeaker");
        assert_eq!(option["name"], "message");
        assert_eq!(option["description"], "[Message]");
        assert_eq!(option["required"], true);
        assert_eq!(option["max_length"], 2000);
    }
}
