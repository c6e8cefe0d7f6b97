//! Infrastructure layer for cadchat.
//!
//! Concrete implementations of the collaborators the core consumes: the HTTP
//! backend, configuration loading, artifact storage and a headless viewer
//! engine.

pub mod artifact_store;
pub mod config_service;
pub mod dto;
pub mod headless_engine;
pub mod http_backend;
pub mod paths;

pub use crate::artifact_store::ArtifactStore;
pub use crate::config_service::ConfigService;
pub use crate::headless_engine::{EngineCall, HeadlessEngine, SceneSummary};
pub use crate::http_backend::HttpCadBackend;
pub use crate::paths::CadchatPaths;
