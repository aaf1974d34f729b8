use std::fmt;

use crate::platform::{ChannelRef, TeamRef};

pub const NO_TEAMS_FOUND: &str = "I couldn't find any teams...";
const TABLE_HEADER: &str = "| Team | Channel | Result |";
const TABLE_ALIGNMENT: &str = "|:--|:--|:--|";

// The two warning texts read as if swapped relative to their kinds.
// Existing users match on these strings, so they stay as they are.
const STATUS_SUCCESS: &str = ":white_check_mark: Success to create message";
const STATUS_CHANNEL_NOT_FOUND: &str = ":warning: Failed to create post";
const STATUS_POST_CREATION_FAILED: &str = ":warning: Failed to find DEFAULT CHANNEL";
const STATUS_UNKNOWN: &str = ":skull_and_crossbone: UNKNOWN ERROR";

/// Outcome of announcing to a single team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ResultKind {
    Success = 0,
    ChannelNotFound = 1,
    PostCreationFailed = 2,
}

impl ResultKind {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn status_text(self) -> &'static str {
        status_text_for_code(self.code())
    }
}

/// Status column text for a raw outcome code. Codes with no matching
/// [`ResultKind`] get the generic unknown-error text.
pub fn status_text_for_code(code: u8) -> &'static str {
    match code {
        0 => STATUS_SUCCESS,
        1 => STATUS_CHANNEL_NOT_FOUND,
        2 => STATUS_POST_CREATION_FAILED,
        _ => STATUS_UNKNOWN,
    }
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.status_text())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnouncementResult {
    pub kind: ResultKind,
    pub team: TeamRef,
    /// `None` only when the default channel could not be resolved
    pub channel: Option<ChannelRef>,
}

impl AnnouncementResult {
    pub fn success(team: TeamRef, channel: ChannelRef) -> Self {
        Self {
            kind: ResultKind::Success,
            team,
            channel: Some(channel),
        }
    }

    pub fn channel_not_found(team: TeamRef) -> Self {
        Self {
            kind: ResultKind::ChannelNotFound,
            team,
            channel: None,
        }
    }

    pub fn post_creation_failed(team: TeamRef, channel: ChannelRef) -> Self {
        Self {
            kind: ResultKind::PostCreationFailed,
            team,
            channel: Some(channel),
        }
    }

    fn channel_display_name(&self) -> &str {
        self.channel
            .as_ref()
            .map(|channel| channel.display_name.as_str())
            .unwrap_or_default()
    }
}

/// A single broadcast: what was said, who asked, and how each team fared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub message: String,
    pub issuer_id: String,
    results: Vec<AnnouncementResult>,
}

impl Announcement {
    pub fn new(message: impl Into<String>, issuer_id: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            issuer_id: issuer_id.into(),
            results: Vec::default(),
        }
    }

    pub fn push(&mut self, result: AnnouncementResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[AnnouncementResult] {
        &self.results
    }

    pub fn count(&self, kind: ResultKind) -> usize {
        self.results.iter().filter(|r| r.kind == kind).count()
    }

    /// Render the results as a markdown table, one row per team.
    pub fn result_table(&self) -> String {
        if self.results.is_empty() {
            return NO_TEAMS_FOUND.to_string();
        }

        let mut lines = Vec::with_capacity(self.results.len() + 2);
        lines.push(TABLE_HEADER.to_string());
        lines.push(TABLE_ALIGNMENT.to_string());
        for result in &self.results {
            lines.push(format!(
                "| {} | {} | {} |",
                result.team.display_name,
                result.channel_display_name(),
                result.kind
            ));
        }
        lines.join("\n")
    }
}
