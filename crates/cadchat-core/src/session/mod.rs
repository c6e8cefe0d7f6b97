//! Session domain module.
//!
//! The session is an explicit four-state machine (`Empty`, `Loading`, `Ready`,
//! `Errored`) that decides which conversation is active, which render mode is
//! in effect, and which result is displayed.
//!
//! # Module Structure
//!
//! - `state`: `SessionState` and request tickets
//! - `controller`: `SessionController`, the transition table
//! - `snapshot`: serializable `SessionSnapshot` for presentation layers

mod controller;
mod snapshot;
mod state;

pub use controller::{ModeSelection, QueryRequest, SessionController, Transition};
pub use snapshot::SessionSnapshot;
pub use state::{SessionState, Ticket};
