//! Application layer for cadchat.
//!
//! This crate provides use case implementations that coordinate the core
//! session, dispatcher and scene with the remote backend.

pub mod history;
pub mod studio_usecase;
pub mod welcome;

pub use history::HistoryService;
pub use studio_usecase::{DownloadedArtifact, StudioUpdate, StudioUseCase};
pub use welcome::{WELCOME_EXAMPLES, welcome_example};
