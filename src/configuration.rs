use std::env;
use std::fmt;
use std::path::PathBuf;

use serenity::model::id::GuildId;

use crate::error::ConfigError;

pub const DEFAULT_TRIGGER: &str = "loudspeaker";
pub const DEFAULT_BOT_NAME: &str = "loudspeaker";
pub const DEFAULT_BOT_DISPLAY_NAME: &str = "Loud Speaker";
/// Name of the channel every guild is expected to have.
pub const DEFAULT_CHANNEL: &str = "general";
pub const DEFAULT_ASSETS_DIR: &str = "assets";
pub const PROFILE_IMAGE_FILE: &str = "icon.png";

/// Discord caps slash command names at 32 characters.
const MAX_TRIGGER_LEN: usize = 32;

/// Settings read once at startup.
///
/// A snapshot is shared behind an `Arc` and handed to every command
/// invocation, so reads never wait on anything.
#[derive(Clone, PartialEq, Eq)]
pub struct Configuration {
    pub token: String,
    pub command_trigger: String,
    pub bot_name: String,
    pub bot_display_name: String,
    pub default_channel: String,
    pub assets_dir: PathBuf,
    /// Guild in which the command is also registered, for instant availability while developing
    pub dev_guild_id: Option<GuildId>,
}

// Hand-written so the token never ends up in logs.
impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("token", &"[redacted]")
            .field("command_trigger", &self.command_trigger)
            .field("bot_name", &self.bot_name)
            .field("bot_display_name", &self.bot_display_name)
            .field("default_channel", &self.default_channel)
            .field("assets_dir", &self.assets_dir)
            .field("dev_guild_id", &self.dev_guild_id)
            .finish()
    }
}

impl Configuration {
    /// Read the configuration from the process environment.
    /// Call [`dotenv::dotenv`] beforehand to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a configuration from any key/value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("DISCORD_TOKEN").ok_or(ConfigError::Missing("DISCORD_TOKEN"))?;
        let with_default = |name: &'static str, default: &str| {
            lookup(name).unwrap_or_else(|| default.to_string())
        };

        let dev_guild_id = match lookup("DEV_GUILD_ID") {
            Some(raw) => Some(parse_guild_id(&raw)?),
            None => None,
        };

        let config = Configuration {
            token,
            command_trigger: with_default("LOUDSPEAKER_TRIGGER", DEFAULT_TRIGGER),
            bot_name: with_default("LOUDSPEAKER_BOT_NAME", DEFAULT_BOT_NAME),
            bot_display_name: with_default(
                "LOUDSPEAKER_BOT_DISPLAY_NAME",
                DEFAULT_BOT_DISPLAY_NAME,
            ),
            default_channel: with_default("LOUDSPEAKER_DEFAULT_CHANNEL", DEFAULT_CHANNEL),
            assets_dir: PathBuf::from(with_default("LOUDSPEAKER_ASSETS_DIR", DEFAULT_ASSETS_DIR)),
            dev_guild_id,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("DISCORD_TOKEN", &self.token),
            ("LOUDSPEAKER_TRIGGER", &self.command_trigger),
            ("LOUDSPEAKER_BOT_NAME", &self.bot_name),
            ("LOUDSPEAKER_BOT_DISPLAY_NAME", &self.bot_display_name),
            ("LOUDSPEAKER_DEFAULT_CHANNEL", &self.default_channel),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Empty { name });
            }
        }

        let trigger = &self.command_trigger;
        let valid_chars = trigger
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
        if trigger.len() > MAX_TRIGGER_LEN || !valid_chars {
            return Err(ConfigError::Invalid {
                name: "LOUDSPEAKER_TRIGGER",
                value: trigger.clone(),
                reason: "slash command names are 1-32 lowercase letters, digits, `-` or `_`",
            });
        }
        Ok(())
    }

    pub fn profile_image_path(&self) -> PathBuf {
        self.assets_dir.join(PROFILE_IMAGE_FILE)
    }
}

fn parse_guild_id(raw: &str) -> Result<GuildId, ConfigError> {
    match raw.trim().parse::<u64>() {
        Ok(id) if id != 0 => Ok(GuildId::new(id)),
        _ => Err(ConfigError::Invalid {
            name: "DEV_GUILD_ID",
            value: raw.to_string(),
            reason: "expected a numeric guild id",
        }),
    }
}
