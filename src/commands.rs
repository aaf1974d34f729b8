pub mod loudspeaker;

pub const LOUDSPEAKER_DESCRIPTION: &str = "Announce message to all teams";
pub const LOUDSPEAKER_HINT: &str = "[Message]";

/// A command invocation as the host delivered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandArgs {
    /// The full command line, trigger included, e.g. `/loudspeaker hello`
    pub command: String,
    /// Who issued the command
    pub user_id: String,
}

/// Reply to the issuer. Always shown to the issuer alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    pub text: String,
}

impl CommandResponse {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}
