use serde_json::Value;

use super::engine::ViewerEngine;
use super::options::{RenderOptions, ViewerOptions};
use crate::error::{CadError, Result};
use crate::geometry::{NormalizedPayload, NormalizedShapes, normalize_optional};

/// What a call to [`SceneBuilder::show`] left in the viewport.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneOutcome {
    /// A new scene was built and rendered.
    Rendered { parts: usize, states: usize },
    /// Nothing to show; the viewport is empty.
    Cleared,
    /// The payload failed validation; the viewport is empty.
    Rejected(CadError),
    /// The engine failed mid-build; the viewport is empty.
    Failed(CadError),
}

impl SceneOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, SceneOutcome::Rendered { .. })
    }
}

/// Owns the single live scene of one mounted viewport.
///
/// Every build starts by clearing the previous scene, and every failure ends
/// with a cleared viewport, so at most one scene exists at any time.
pub struct SceneBuilder<E: ViewerEngine> {
    engine: E,
    viewer_options: ViewerOptions,
    render_options: RenderOptions,
    live: bool,
    builds: u64,
}

impl<E: ViewerEngine> SceneBuilder<E> {
    /// Mounts `engine` and configures its viewport from `viewer_options`.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine rejects the viewport configuration.
    pub fn mount(
        mut engine: E,
        viewer_options: ViewerOptions,
        render_options: RenderOptions,
    ) -> Result<Self> {
        engine.mount(&viewer_options)?;
        tracing::debug!(
            "[SceneBuilder] Mounted viewport {}x{} (ortho={}, control={:?})",
            viewer_options.cad_width,
            viewer_options.height,
            viewer_options.ortho,
            viewer_options.control
        );

        Ok(Self {
            engine,
            viewer_options,
            render_options,
            live: false,
            builds: 0,
        })
    }

    /// Replaces the current scene with one built from a raw shape payload.
    ///
    /// A missing or empty payload just clears the viewport. Validation and
    /// engine failures are logged and contained here.
    pub fn show(&mut self, payload: Option<&Value>) -> SceneOutcome {
        self.clear();

        match normalize_optional(payload) {
            Ok(NormalizedPayload::Empty) => {
                tracing::debug!("[SceneBuilder] No shape data, viewport left empty");
                SceneOutcome::Cleared
            }
            Ok(NormalizedPayload::Shapes(shapes)) => self.build(&shapes),
            Err(err) => {
                tracing::warn!("[SceneBuilder] Rejected shape payload: {}", err);
                SceneOutcome::Rejected(err)
            }
        }
    }

    /// Replaces the current scene with one built from already normalized shapes.
    pub fn show_normalized(&mut self, shapes: &NormalizedShapes) -> SceneOutcome {
        self.clear();
        self.build(shapes)
    }

    /// Drops the current scene.
    pub fn clear(&mut self) {
        self.engine.clear();
        self.live = false;
    }

    /// Whether a built scene is currently displayed.
    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Number of scenes successfully built since mount.
    pub fn builds(&self) -> u64 {
        self.builds
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn viewer_options(&self) -> &ViewerOptions {
        &self.viewer_options
    }

    pub fn render_options(&self) -> &RenderOptions {
        &self.render_options
    }

    fn build(&mut self, shapes: &NormalizedShapes) -> SceneOutcome {
        if !shapes.shapes.is_renderable() {
            tracing::debug!("[SceneBuilder] Shape set has nothing to draw");
            return SceneOutcome::Cleared;
        }

        match self.tessellate_and_render(shapes) {
            Ok(()) => {
                self.live = true;
                self.builds += 1;
                tracing::info!(
                    "[SceneBuilder] Rendered {} parts ({} with state)",
                    shapes.shapes.parts.len(),
                    shapes.states.len()
                );
                SceneOutcome::Rendered {
                    parts: shapes.shapes.parts.len(),
                    states: shapes.states.len(),
                }
            }
            Err(err) => {
                tracing::error!("[SceneBuilder] Error rendering CAD shapes: {}", err);
                self.clear();
                SceneOutcome::Failed(err)
            }
        }
    }

    fn tessellate_and_render(&mut self, shapes: &NormalizedShapes) -> Result<()> {
        let (unselected, selected) =
            self.engine
                .tessellate(&shapes.shapes, &shapes.states, &self.render_options)?;
        self.engine
            .render(unselected, selected, &shapes.states, &self.render_options)
    }
}
