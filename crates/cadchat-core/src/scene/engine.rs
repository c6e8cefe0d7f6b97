//! Viewer engine capability.

use super::options::{RenderOptions, ViewerOptions};
use crate::error::Result;
use crate::geometry::{ShapeSet, StateMap};

/// Narrow interface to a scene-graph engine.
///
/// The engine owns the native render target; it holds no domain data of its
/// own beyond what the last `render` call handed it.
pub trait ViewerEngine {
    /// A tessellated mesh batch, opaque to the core.
    type Batch;

    /// Configures camera, controls, grid, axes and theme for the viewport.
    ///
    /// Called exactly once per mount.
    fn mount(&mut self, options: &ViewerOptions) -> Result<()>;

    /// Drops the currently built scene, if any.
    fn clear(&mut self);

    /// Tessellates `shapes`, partitioned into `(unselected, selected)` batches
    /// according to `states`.
    fn tessellate(
        &mut self,
        shapes: &ShapeSet,
        states: &StateMap,
        options: &RenderOptions,
    ) -> Result<(Self::Batch, Self::Batch)>;

    /// Draws both batches into the render target.
    fn render(
        &mut self,
        unselected: Self::Batch,
        selected: Self::Batch,
        states: &StateMap,
        options: &RenderOptions,
    ) -> Result<()>;
}
