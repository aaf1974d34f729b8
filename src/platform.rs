//! The surface of the chat platform this bot talks to.
//!
//! Everything the announcement logic needs from the outside world goes through
//! [`TeamDirectory`], and everything done once at startup goes through
//! [`PluginApi`]. [`crate::discord::DiscordHost`] implements both on top of serenity.

use async_trait::async_trait;

use crate::error::PlatformError;

/// A team (a Discord guild) as returned by the platform. Read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamRef {
    pub id: String,
    pub display_name: String,
}

/// A channel inside a team. Read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRef {
    pub id: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    pub author_id: String,
    pub channel_id: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotDefinition {
    pub username: String,
    pub display_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDefinition {
    pub trigger: String,
    pub auto_complete_desc: String,
    pub auto_complete_hint: String,
}

/// Lookups and writes used while broadcasting.
#[async_trait]
pub trait TeamDirectory: Send + Sync {
    /// Every team the bot can see, in the order the platform returns them.
    async fn list_teams(&self) -> Result<Vec<TeamRef>, PlatformError>;

    async fn channel_by_name(
        &self,
        team_id: &str,
        channel_name: &str,
    ) -> Result<ChannelRef, PlatformError>;

    /// Returns the id of the created post.
    async fn create_post(&self, post: &Post) -> Result<String, PlatformError>;
}

/// Startup-only operations.
#[async_trait]
pub trait PluginApi: Send + Sync {
    /// Make sure the bot account exists and matches `bot`; returns its user id.
    async fn ensure_bot(&self, bot: &BotDefinition) -> Result<String, PlatformError>;

    async fn set_profile_image(&self, bot_user_id: &str, image: Vec<u8>)
        -> Result<(), PlatformError>;

    async fn register_command(&self, command: &CommandDefinition) -> Result<(), PlatformError>;
}
