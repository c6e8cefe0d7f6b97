//! Scene module.
//!
//! Owns the lifetime of the 3D scene shown in one viewport. The viewer engine
//! is reached only through the [`ViewerEngine`] capability, so any engine that
//! satisfies it (including a headless recorder) can be mounted.

mod builder;
mod engine;
mod options;

pub use builder::{SceneBuilder, SceneOutcome};
pub use engine::ViewerEngine;
pub use options::{ControlKind, RenderOptions, Theme, UpAxis, ViewerOptions};
