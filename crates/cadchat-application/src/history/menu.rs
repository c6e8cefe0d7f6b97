//! Selectable reply menu built from a conversation detail.

use cadchat_core::history::{ConversationDetail, ConversationSummary};
use chrono::{DateTime, Local, NaiveDateTime};
use serde::Serialize;

/// One selectable assistant reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplyEntry {
    pub conversation_id: String,
    pub message_index: usize,
    /// "Reply N"
    pub label: String,
    /// Local, human-readable time of the reply
    pub timestamp: String,
    pub object_id: Option<String>,
    /// Error recorded on the reply; selecting it surfaces this message
    pub error: Option<String>,
}

impl ReplyEntry {
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Builds the reply menu for a conversation.
///
/// Only assistant messages that produced a result are offered; everything
/// else is excluded from the menu rather than shown disabled.
pub fn reply_entries(detail: &ConversationDetail) -> Vec<ReplyEntry> {
    detail
        .selectable_messages()
        .map(|message| ReplyEntry {
            conversation_id: detail.id.clone(),
            message_index: message.index,
            label: format!("Reply {}", message.reply_number()),
            timestamp: format_timestamp(&message.timestamp),
            object_id: message.object_id.clone(),
            error: message.error.clone(),
        })
        .collect()
}

/// One-line label for a conversation in the history list.
pub fn summary_label(summary: &ConversationSummary) -> String {
    let date = format_timestamp(&summary.created_at);
    let date = date.split(' ').next().unwrap_or_default();
    format!(
        "{} ({} • {} replies)",
        summary.title, date, summary.assistant_responses
    )
}

/// Formats a backend timestamp as local time.
///
/// Offset-carrying timestamps are converted to the local zone; naive ones are
/// shown as recorded. Unparseable input is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%Y-%m-%d %H:%M";

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Local).format(DISPLAY).to_string();
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(dt) => dt.format(DISPLAY).to_string(),
        Err(_) => raw.to_string(),
    }
}
