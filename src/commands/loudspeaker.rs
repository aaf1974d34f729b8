use tracing::{info, instrument};

use crate::announcement::{Announcement, AnnouncementResult, ResultKind};
use crate::commands::{CommandArgs, CommandResponse};
use crate::configuration::Configuration;
use crate::error::BroadcastError;
use crate::platform::{Post, TeamDirectory};

/// Remove the leading `/{trigger}` from a command line, leaving the message.
///
/// Only the exact prefix is removed, so a message that happens to start
/// with letters of the trigger survives intact.
pub fn strip_trigger<'a>(command: &'a str, trigger: &str) -> &'a str {
    let command = command.trim_start();
    let rest = command
        .strip_prefix('/')
        .and_then(|c| c.strip_prefix(trigger))
        .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace));
    match rest {
        Some(message) => message.trim_start(),
        None => command,
    }
}

/// Post the message to the default channel of every team, one team at a time.
///
/// A team whose channel can't be resolved, or whose post is refused, is
/// recorded and skipped. Only failing to list the teams aborts the broadcast.
#[instrument(skip(platform, config, args), fields(issuer = %args.user_id))]
pub async fn broadcast<P>(
    platform: &P,
    config: &Configuration,
    bot_user_id: &str,
    args: &CommandArgs,
) -> Result<Announcement, BroadcastError>
where
    P: TeamDirectory + ?Sized,
{
    let mut announcement = Announcement::new(
        strip_trigger(&args.command, &config.command_trigger),
        args.user_id.as_str(),
    );

    // TODO: restrict to system admins once the permission model is settled
    let teams = platform
        .list_teams()
        .await
        .map_err(BroadcastError::ListTeams)?;

    for team in teams {
        let channel = match platform
            .channel_by_name(&team.id, &config.default_channel)
            .await
        {
            Ok(channel) => channel,
            Err(_) => {
                announcement.push(AnnouncementResult::channel_not_found(team));
                continue;
            }
        };

        let post = Post {
            author_id: bot_user_id.to_string(),
            channel_id: channel.id.clone(),
            message: announcement.message.clone(),
        };
        let result = match platform.create_post(&post).await {
            Ok(_) => AnnouncementResult::success(team, channel),
            Err(_) => AnnouncementResult::post_creation_failed(team, channel),
        };
        announcement.push(result);
    }

    info!(
        teams = announcement.results().len(),
        succeeded = announcement.count(ResultKind::Success),
        "Announcement finished"
    );
    Ok(announcement)
}

/// Run the broadcast and render the outcome for the issuer.
pub async fn execute<P>(
    platform: &P,
    config: &Configuration,
    bot_user_id: &str,
    args: &CommandArgs,
) -> Result<CommandResponse, BroadcastError>
where
    P: TeamDirectory + ?Sized,
{
    let announcement = broadcast(platform, config, bot_user_id, args).await?;
    Ok(CommandResponse::new(announcement.result_table()))
}
