//! Core domain of the cadchat client.
//!
//! Holds the session state machine, the geometry normalizer, the scene
//! builder and the render-mode dispatcher. Transport, storage and terminal
//! concerns live in the application, infrastructure and cli crates.
//!
//! # Module Structure
//!
//! - `session`: four-state session controller with mode lock and tickets
//! - `result`: `CadResult`, render modes and export formats
//! - `geometry`: shape payload types and the normalizer
//! - `scene`: `SceneBuilder` over the `ViewerEngine` capability
//! - `dispatch`: presentation selection and download authorization
//! - `history`: read-only conversation history projections
//! - `backend`: the `CadBackend` collaborator trait
//! - `config`: client configuration model

pub mod backend;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod geometry;
pub mod history;
pub mod result;
pub mod scene;
pub mod session;

// Re-export common error type
pub use error::{CadError, Result};
