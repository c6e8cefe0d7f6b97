//! Result domain module.
//!
//! A [`CadResult`] is the atomic unit exchanged between the backend and the
//! client: one response to a query or to a historical-message fetch.
//!
//! # Module Structure
//!
//! - `model`: `CadResult`, `RenderMode`
//! - `export`: download formats derived from the render mode

mod export;
mod model;

pub use export::ExportFormat;
pub use model::{CadResult, RenderMode};
pub(crate) use model::short_id;
