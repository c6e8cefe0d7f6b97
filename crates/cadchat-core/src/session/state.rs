//! Session state types.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::result::CadResult;

/// Sequence number handed out for every outstanding fetch.
///
/// Only the most recently issued ticket may resolve into a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Ticket(pub(crate) u64);

impl Ticket {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The four session states.
///
/// `Loading` and `Errored` keep whatever result was on screen before, so a
/// failed follow-up never disturbs the display. Error text only exists inside
/// `Errored`.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// Initial state, and the state after a new-conversation reset.
    Empty,
    /// A query is in flight.
    Loading {
        ticket: Ticket,
        shown: Option<Arc<CadResult>>,
    },
    /// A result is displayed.
    Ready { result: Arc<CadResult> },
    /// The last request failed.
    Errored {
        message: String,
        shown: Option<Arc<CadResult>>,
    },
}

impl SessionState {
    /// The result currently on screen, if any.
    pub fn current_result(&self) -> Option<&Arc<CadResult>> {
        match self {
            SessionState::Empty => None,
            SessionState::Loading { shown, .. } | SessionState::Errored { shown, .. } => {
                shown.as_ref()
            }
            SessionState::Ready { result } => Some(result),
        }
    }

    /// Moves the displayed result out, leaving the state untouched otherwise.
    pub(crate) fn take_shown(&mut self) -> Option<Arc<CadResult>> {
        match std::mem::replace(self, SessionState::Empty) {
            SessionState::Empty => None,
            SessionState::Loading { shown, .. } | SessionState::Errored { shown, .. } => shown,
            SessionState::Ready { result } => Some(result),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SessionState::Errored { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Empty => "empty",
            SessionState::Loading { .. } => "loading",
            SessionState::Ready { .. } => "ready",
            SessionState::Errored { .. } => "errored",
        }
    }
}
