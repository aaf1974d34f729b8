//! In-memory stand-ins for the platform, used by unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::configuration::Configuration;
use crate::error::PlatformError;
use crate::platform::{
    BotDefinition, ChannelRef, CommandDefinition, PluginApi, Post, TeamDirectory, TeamRef,
};

/// Configuration with only the token set, everything else defaulted.
pub fn test_configuration() -> Configuration {
    Configuration::from_lookup(|name| (name == "DISCORD_TOKEN").then(|| "token".to_string()))
        .unwrap()
}

/// A platform whose teams, channels and failures are scripted up front.
#[derive(Default)]
pub struct FakeDirectory {
    teams: Vec<TeamRef>,
    fail_listing: bool,
    /// team id -> channel name -> channel
    channels: HashMap<String, HashMap<String, ChannelRef>>,
    /// channel ids whose posts are refused
    refusing: HashSet<String>,
    pub posts: Mutex<Vec<Post>>,
    pub channel_lookups: Mutex<Vec<(String, String)>>,
}

impl FakeDirectory {
    pub fn failing_listing() -> Self {
        Self {
            fail_listing: true,
            ..Default::default()
        }
    }

    pub fn with_team(mut self, id: &str, display_name: &str) -> Self {
        self.teams.push(TeamRef {
            id: id.to_string(),
            display_name: display_name.to_string(),
        });
        self
    }

    pub fn with_channel(mut self, team_id: &str, name: &str, channel_id: &str) -> Self {
        self.channels.entry(team_id.to_string()).or_default().insert(
            name.to_string(),
            ChannelRef {
                id: channel_id.to_string(),
                display_name: name.to_string(),
            },
        );
        self
    }

    pub fn refusing_posts_in(mut self, channel_id: &str) -> Self {
        self.refusing.insert(channel_id.to_string());
        self
    }

    pub fn posts(&self) -> Vec<Post> {
        self.posts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TeamDirectory for FakeDirectory {
    async fn list_teams(&self) -> Result<Vec<TeamRef>, PlatformError> {
        if self.fail_listing {
            return Err(PlatformError::NotFound("team list".to_string()));
        }
        Ok(self.teams.clone())
    }

    async fn channel_by_name(
        &self,
        team_id: &str,
        channel_name: &str,
    ) -> Result<ChannelRef, PlatformError> {
        self.channel_lookups
            .lock()
            .unwrap()
            .push((team_id.to_string(), channel_name.to_string()));
        self.channels
            .get(team_id)
            .and_then(|channels| channels.get(channel_name))
            .cloned()
            .ok_or_else(|| PlatformError::NotFound(format!("channel `{}`", channel_name)))
    }

    async fn create_post(&self, post: &Post) -> Result<String, PlatformError> {
        if self.refusing.contains(&post.channel_id) {
            return Err(PlatformError::NotFound(format!("channel {}", post.channel_id)));
        }
        let mut posts = self.posts.lock().unwrap();
        posts.push(post.clone());
        Ok(format!("post-{}", posts.len()))
    }
}

/// Records every startup call; individual steps can be made to fail.
#[derive(Default)]
pub struct FakePluginApi {
    pub fail_ensure_bot: bool,
    pub fail_profile_image: bool,
    pub fail_register: bool,
    pub profile_images: Mutex<Vec<(String, Vec<u8>)>>,
    pub registered: Mutex<Vec<CommandDefinition>>,
}

#[async_trait]
impl PluginApi for FakePluginApi {
    async fn ensure_bot(&self, bot: &BotDefinition) -> Result<String, PlatformError> {
        if self.fail_ensure_bot {
            return Err(PlatformError::NotABot(bot.username.clone()));
        }
        Ok(format!("{}-user-id", bot.username))
    }

    async fn set_profile_image(
        &self,
        bot_user_id: &str,
        image: Vec<u8>,
    ) -> Result<(), PlatformError> {
        if self.fail_profile_image {
            return Err(PlatformError::NotFound("avatar endpoint".to_string()));
        }
        self.profile_images
            .lock()
            .unwrap()
            .push((bot_user_id.to_string(), image));
        Ok(())
    }

    async fn register_command(&self, command: &CommandDefinition) -> Result<(), PlatformError> {
        if self.fail_register {
            return Err(PlatformError::InvalidId(command.trigger.clone()));
        }
        self.registered.lock().unwrap().push(command.clone());
        Ok(())
    }
}
