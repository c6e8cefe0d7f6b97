//! Headless viewer engine.
//!
//! Implements the `ViewerEngine` capability without a render target: it
//! records recent calls and keeps a summary of the last rendered scene. Used
//! by the terminal client to describe the viewport, and by tests.

use std::fmt;

use cadchat_core::error::{CadError, Result};
use cadchat_core::geometry::{ShapeSet, StateMap};
use cadchat_core::scene::{RenderOptions, ViewerEngine, ViewerOptions};
use serde::Serialize;

/// One call received by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum EngineCall {
    Mount { width: u32, height: u32 },
    Clear,
    Tessellate { parts: usize },
    Render { unselected: usize, selected: usize },
}

/// Part labels of one tessellated batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeadlessBatch {
    pub parts: Vec<String>,
}

/// What the viewport currently shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSummary {
    pub unselected: Vec<String>,
    pub selected: Vec<String>,
    pub edge_color: u32,
    pub opacity: f64,
}

impl fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} part(s), {} selected",
            self.unselected.len() + self.selected.len(),
            self.selected.len()
        )?;
        if !self.selected.is_empty() {
            write!(f, " [{}]", self.selected.join(", "))?;
        }
        Ok(())
    }
}

/// Number of most recent calls kept in the log.
pub const CALL_LOG_LIMIT: usize = 64;

/// `ViewerEngine` that draws nothing.
#[derive(Debug, Default)]
pub struct HeadlessEngine {
    /// Most recent calls, oldest first, at most `CALL_LOG_LIMIT`
    calls: Vec<EngineCall>,
    renders: usize,
    scene: Option<SceneSummary>,
    mounted: bool,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[EngineCall] {
        &self.calls
    }

    /// The scene currently displayed, if any.
    pub fn scene(&self) -> Option<&SceneSummary> {
        self.scene.as_ref()
    }

    /// Renders performed since creation.
    pub fn render_count(&self) -> usize {
        self.renders
    }

    fn record(&mut self, call: EngineCall) {
        if self.calls.len() == CALL_LOG_LIMIT {
            self.calls.remove(0);
        }
        self.calls.push(call);
    }
}

impl ViewerEngine for HeadlessEngine {
    type Batch = HeadlessBatch;

    fn mount(&mut self, options: &ViewerOptions) -> Result<()> {
        if self.mounted {
            return Err(CadError::render("viewport is already mounted"));
        }
        self.mounted = true;
        self.record(EngineCall::Mount {
            width: options.cad_width,
            height: options.height,
        });
        Ok(())
    }

    fn clear(&mut self) {
        self.scene = None;
        self.record(EngineCall::Clear);
    }

    fn tessellate(
        &mut self,
        shapes: &ShapeSet,
        states: &StateMap,
        _options: &RenderOptions,
    ) -> Result<(Self::Batch, Self::Batch)> {
        if !self.mounted {
            return Err(CadError::render("viewport is not mounted"));
        }
        self.record(EngineCall::Tessellate {
            parts: shapes.parts.len(),
        });

        let mut unselected = HeadlessBatch::default();
        let mut selected = HeadlessBatch::default();
        for (position, part) in shapes.parts.iter().enumerate() {
            let label = part
                .name
                .clone()
                .or_else(|| part.id.clone())
                .unwrap_or_else(|| format!("part {}", position + 1));
            let is_selected = part
                .id
                .as_deref()
                .and_then(|id| states.get(id))
                .is_some_and(|state| state.is_selected());

            if is_selected {
                selected.parts.push(label);
            } else {
                unselected.parts.push(label);
            }
        }
        Ok((unselected, selected))
    }

    fn render(
        &mut self,
        unselected: Self::Batch,
        selected: Self::Batch,
        _states: &StateMap,
        options: &RenderOptions,
    ) -> Result<()> {
        self.renders += 1;
        self.record(EngineCall::Render {
            unselected: unselected.parts.len(),
            selected: selected.parts.len(),
        });
        self.scene = Some(SceneSummary {
            unselected: unselected.parts,
            selected: selected.parts,
            edge_color: options.edge_color,
            opacity: options.default_opacity,
        });
        Ok(())
    }
}
