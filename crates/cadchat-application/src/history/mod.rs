//! Conversation history services.
//!
//! This module owns the history caches: the conversation summary list and the
//! lazily loaded per-conversation details. The session only ever borrows them
//! for display.

mod cache;
mod menu;
mod service;

pub use cache::HistoryCache;
pub use menu::{ReplyEntry, format_timestamp, reply_entries, summary_label};
pub use service::HistoryService;
