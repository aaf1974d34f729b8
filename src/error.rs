use thiserror::Error as ThisError;

/// Error type for every call made against the chat platform:
///
/// [`serenity::Error`]
///
/// [`std::io::Error`]
///
/// The broadcast treats any of these as "this team could not be reached",
/// so callers rarely need to match on the variant.
#[derive(ThisError, Debug)]
pub enum PlatformError {
    #[error("serenity returned an error: {0}")]
    Serenity(serenity::Error),
    #[error("failed to read a local file: {0}")]
    Io(std::io::Error),
    #[error("`{0}` is not a valid platform id")]
    InvalidId(String),
    #[error("{0} was not found")]
    NotFound(String),
    #[error("the account `{0}` is not a bot account")]
    NotABot(String),
}

impl From<serenity::Error> for PlatformError {
    fn from(error: serenity::Error) -> Self {
        PlatformError::Serenity(error)
    }
}

impl From<std::io::Error> for PlatformError {
    fn from(error: std::io::Error) -> Self {
        PlatformError::Io(error)
    }
}

/// The only failure that aborts a broadcast. Per-team failures are recorded
/// in the announcement instead.
#[derive(ThisError, Debug)]
pub enum BroadcastError {
    #[error("Failed to fetch the list of teams: {0}")]
    ListTeams(#[source] PlatformError),
}

#[derive(ThisError, Debug)]
pub enum ActivationError {
    #[error("failed to ensure bot user")]
    EnsureBot(#[source] PlatformError),
    #[error("failed to register the slash command")]
    RegisterCommand(#[source] PlatformError),
}

#[derive(ThisError, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Expected {0} in the environment")]
    Missing(&'static str),
    #[error("{name} must not be empty")]
    Empty { name: &'static str },
    #[error("`{value}` is not a valid value for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_listing_failure_message_carries_underlying_error() {
        let err = BroadcastError::ListTeams(PlatformError::Io(io::Error::new(
            io::ErrorKind::Other,
            "missing Access permission",
        )));

        let rendered = err.to_string();

        assert!(rendered.starts_with("Failed to fetch the list of teams: "));
        assert!(rendered.contains("missing Access permission"));
    }

    #[test]
    fn test_not_found_message_names_the_target() {
        let err = BroadcastError::ListTeams(PlatformError::NotFound("guild list".to_string()));
        assert_eq!(
            err.to_string(),
            "Failed to fetch the list of teams: guild list was not found"
        );
    }
}
