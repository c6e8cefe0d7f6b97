use std::sync::Arc;

use super::snapshot::SessionSnapshot;
use super::state::{SessionState, Ticket};
use crate::backend::HistoricalResult;
use crate::error::{CadError, Result};
use crate::result::{CadResult, RenderMode};

/// Everything a caller needs to perform the fetch for a submitted query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    pub ticket: Ticket,
    pub text: String,
    /// Conversation to continue, `None` for a fresh one
    pub conversation_id: Option<String>,
    /// Requested mode; the backend's echoed mode wins
    pub mode_hint: RenderMode,
}

/// Effect of a single event on the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// A fetch was started and the session is loading.
    Started { ticket: Ticket },
    /// A result was accepted and the mode is locked to it.
    Accepted {
        result_id: String,
        conversation_id: String,
        mode: RenderMode,
    },
    /// The request failed; the displayed result is unchanged.
    Failed { message: String },
    /// A superseded fetch resolved and was ignored.
    Stale { ticket: Ticket },
    /// The session returned to its initial values.
    Reset,
}

impl Transition {
    /// Whether the displayed result may have changed.
    pub fn changes_display(&self) -> bool {
        matches!(self, Transition::Accepted { .. } | Transition::Reset)
    }
}

/// Outcome of a mode-selector interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeSelection {
    Applied(RenderMode),
    Unchanged,
    /// A result has been accepted; only a reset unlocks the mode.
    Locked(RenderMode),
}

/// Owns the session state machine.
///
/// Conversation identity, mode lock and the effective render mode are all
/// derived from [`SessionState`], never stored alongside it:
///
/// - the session is locked exactly when a result is displayed
/// - the conversation id is the displayed result's conversation id
/// - the effective mode is the displayed result's mode, or the requested
///   mode while unlocked
///
/// Every fetch is issued a [`Ticket`]. Only the most recently issued ticket
/// may resolve; earlier ones are reported as [`Transition::Stale`].
#[derive(Debug, Clone)]
pub struct SessionController {
    state: SessionState,
    initial_mode: RenderMode,
    requested_mode: RenderMode,
    next_ticket: u64,
    latest: Option<Ticket>,
}

impl Default for SessionController {
    fn default() -> Self {
        Self::new(RenderMode::default())
    }
}

impl SessionController {
    pub fn new(initial_mode: RenderMode) -> Self {
        Self {
            state: SessionState::Empty,
            initial_mode,
            requested_mode: initial_mode,
            next_ticket: 1,
            latest: None,
        }
    }

    // ============================================================================
    // Events
    // ============================================================================

    /// Starts a query, moving the session to `Loading`.
    ///
    /// Valid from every state. The displayed result stays on screen while the
    /// fetch is outstanding, and any previous error is dropped.
    ///
    /// # Errors
    ///
    /// Returns `CadError::EmptyQuery` for blank text; the session is untouched.
    pub fn begin_query(&mut self, text: &str) -> Result<QueryRequest> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CadError::EmptyQuery);
        }

        let request = QueryRequest {
            ticket: self.issue_ticket(),
            text: text.to_string(),
            conversation_id: self.conversation_id().map(str::to_string),
            mode_hint: self.render_mode(),
        };

        let shown = self.state.take_shown();
        self.state = SessionState::Loading {
            ticket: request.ticket,
            shown,
        };

        tracing::debug!(
            "[SessionController] Query {} started (conversation={:?}, hint={})",
            request.ticket,
            request.conversation_id,
            request.mode_hint
        );
        Ok(request)
    }

    /// Applies the outcome of a query fetch.
    pub fn resolve_query(&mut self, ticket: Ticket, outcome: Result<CadResult>) -> Transition {
        if !self.is_current(ticket) {
            return self.stale(ticket);
        }

        match outcome {
            Ok(result) => match result.error.clone() {
                Some(message) => self.fail(message),
                None => self.accept(result),
            },
            Err(err) => self.fail(err.user_message()),
        }
    }

    /// Issues a ticket for a historical-message fetch.
    ///
    /// Supersedes any outstanding query without changing the state; history
    /// selection goes straight to `Ready` or `Errored` when it resolves.
    pub fn reserve_history_ticket(&mut self) -> Ticket {
        let ticket = self.issue_ticket();
        tracing::debug!("[SessionController] History fetch {} reserved", ticket);
        ticket
    }

    /// Applies the outcome of a historical-message fetch.
    ///
    /// A recorded backend error is surfaced like a live fetch failure and the
    /// displayed result is left alone.
    pub fn resolve_history(
        &mut self,
        ticket: Ticket,
        outcome: Result<HistoricalResult>,
    ) -> Transition {
        if !self.is_current(ticket) {
            return self.stale(ticket);
        }

        match outcome {
            Ok(HistoricalResult::Found(result)) => match result.error.clone() {
                Some(message) => self.fail(message),
                None => self.accept(result),
            },
            Ok(HistoricalResult::Failed(message)) => {
                self.fail(CadError::HistoricalResult(message).user_message())
            }
            Err(err) => self.fail(err.user_message()),
        }
    }

    /// Resets the session to its initial values from any state.
    ///
    /// Outstanding tickets are invalidated, so fetches started before the
    /// reset can never repopulate the new conversation.
    pub fn new_conversation(&mut self) -> Transition {
        self.state = SessionState::Empty;
        self.requested_mode = self.initial_mode;
        self.latest = None;
        tracing::info!("[SessionController] New conversation");
        Transition::Reset
    }

    /// Mode selector input. A no-op while locked.
    pub fn select_mode(&mut self, mode: RenderMode) -> ModeSelection {
        if let Some(result) = self.state.current_result() {
            tracing::debug!(
                "[SessionController] Mode change to {} ignored, locked to {}",
                mode,
                result.render_mode
            );
            return ModeSelection::Locked(result.render_mode);
        }
        if self.requested_mode == mode {
            return ModeSelection::Unchanged;
        }
        self.requested_mode = mode;
        ModeSelection::Applied(mode)
    }

    // ============================================================================
    // Derived views
    // ============================================================================

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current_result(&self) -> Option<&Arc<CadResult>> {
        self.state.current_result()
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.current_result()
            .map(|result| result.conversation_id.as_str())
    }

    pub fn render_mode(&self) -> RenderMode {
        self.current_result()
            .map(|result| result.render_mode)
            .unwrap_or(self.requested_mode)
    }

    pub fn mode_locked(&self) -> bool {
        self.current_result().is_some()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state.name(),
            conversation_id: self.conversation_id().map(str::to_string),
            render_mode: self.render_mode(),
            mode_locked: self.mode_locked(),
            loading: self.is_loading(),
            error: self.error().map(str::to_string),
            result_id: self.current_result().map(|result| result.id.clone()),
        }
    }

    // ============================================================================
    // Internals
    // ============================================================================

    fn issue_ticket(&mut self) -> Ticket {
        let ticket = Ticket(self.next_ticket);
        self.next_ticket += 1;
        self.latest = Some(ticket);
        ticket
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.latest == Some(ticket)
    }

    fn stale(&self, ticket: Ticket) -> Transition {
        tracing::debug!(
            "[SessionController] Ignoring superseded response {} (latest: {:?})",
            ticket,
            self.latest
        );
        Transition::Stale { ticket }
    }

    fn accept(&mut self, result: CadResult) -> Transition {
        self.latest = None;
        let transition = Transition::Accepted {
            result_id: result.id.clone(),
            conversation_id: result.conversation_id.clone(),
            mode: result.render_mode,
        };
        tracing::info!(
            "[SessionController] Accepted result {} (conversation={}, mode={})",
            result.id,
            result.short_conversation_id(),
            result.render_mode
        );
        self.state = SessionState::Ready {
            result: Arc::new(result),
        };
        transition
    }

    fn fail(&mut self, message: String) -> Transition {
        self.latest = None;
        tracing::warn!("[SessionController] Request failed: {}", message);
        let shown = self.state.take_shown();
        self.state = SessionState::Errored {
            message: message.clone(),
            shown,
        };
        Transition::Failed { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn cylinder(conversation_id: &str) -> CadResult {
        CadResult::new("obj-1", conversation_id, RenderMode::ThreeD).with_shapes(json!([
            {"parts": [{"id": "/cyl", "state": {"selected": false}}]},
            [{"vertices": [0.0, 0.0, 0.0]}]
        ]))
    }

    fn sketch(conversation_id: &str) -> CadResult {
        CadResult::new("obj-2", conversation_id, RenderMode::TwoD).with_svg("<svg/>")
    }

    fn ready_with(result: CadResult) -> SessionController {
        let mut session = SessionController::default();
        let request = session.begin_query("something").unwrap();
        session.resolve_query(request.ticket, Ok(result));
        session
    }

    #[test]
    fn test_first_query_has_no_conversation() {
        let mut session = SessionController::default();
        let request = session.begin_query("  cylinder d=50 h=30 ").unwrap();

        assert_eq!(request.text, "cylinder d=50 h=30");
        assert_eq!(request.conversation_id, None);
        assert_eq!(request.mode_hint, RenderMode::ThreeD);
        assert!(session.is_loading());
        assert!(!session.mode_locked());
    }

    #[test]
    fn test_blank_query_is_rejected_without_transition() {
        let mut session = SessionController::default();
        assert_eq!(session.begin_query("   ").unwrap_err(), CadError::EmptyQuery);
        assert_eq!(session.state(), &SessionState::Empty);
    }

    #[test]
    fn test_cylinder_scenario_locks_to_result_mode() {
        let mut session = SessionController::default();
        let request = session.begin_query("cylinder d=50 h=30").unwrap();
        let transition = session.resolve_query(request.ticket, Ok(cylinder("c1")));

        assert_eq!(
            transition,
            Transition::Accepted {
                result_id: "obj-1".into(),
                conversation_id: "c1".into(),
                mode: RenderMode::ThreeD,
            }
        );
        assert_eq!(session.state().name(), "ready");
        assert_eq!(session.conversation_id(), Some("c1"));
        assert!(session.mode_locked());
        assert_eq!(session.render_mode(), RenderMode::ThreeD);
    }

    #[test]
    fn test_echoed_mode_overrides_requested_hint() {
        let mut session = SessionController::default();
        assert_eq!(
            session.select_mode(RenderMode::TwoD),
            ModeSelection::Applied(RenderMode::TwoD)
        );
        let request = session.begin_query("bracket").unwrap();
        assert_eq!(request.mode_hint, RenderMode::TwoD);

        session.resolve_query(request.ticket, Ok(cylinder("c1")));
        assert_eq!(session.render_mode(), RenderMode::ThreeD);
        assert!(session.mode_locked());
    }

    #[test]
    fn test_mode_selector_is_noop_while_locked() {
        let mut session = ready_with(sketch("c1"));
        assert_eq!(
            session.select_mode(RenderMode::ThreeD),
            ModeSelection::Locked(RenderMode::TwoD)
        );
        assert_eq!(session.render_mode(), RenderMode::TwoD);
        assert_eq!(
            SessionController::default().select_mode(RenderMode::ThreeD),
            ModeSelection::Unchanged
        );
    }

    #[test]
    fn test_follow_up_continues_conversation() {
        let mut session = ready_with(cylinder("c1"));
        let request = session.begin_query("make it taller").unwrap();

        assert_eq!(request.conversation_id.as_deref(), Some("c1"));
        assert!(session.is_loading());
        // Previous result stays displayed and locked while loading
        assert!(session.mode_locked());
        assert_eq!(session.current_result().map(|r| r.id.as_str()), Some("obj-1"));
    }

    #[test]
    fn test_failed_follow_up_keeps_conversation_and_lock() {
        let mut session = ready_with(cylinder("c1"));
        let request = session.begin_query("make it taller").unwrap();
        let transition =
            session.resolve_query(request.ticket, Err(CadError::fetch("Connection refused")));

        assert_eq!(
            transition,
            Transition::Failed {
                message: "Connection refused".into()
            }
        );
        assert_eq!(session.error(), Some("Connection refused"));
        assert_eq!(session.conversation_id(), Some("c1"));
        assert!(session.mode_locked());
        assert_eq!(session.current_result().map(|r| r.id.as_str()), Some("obj-1"));
    }

    #[test]
    fn test_retry_after_error_clears_error() {
        let mut session = ready_with(cylinder("c1"));
        let request = session.begin_query("taller").unwrap();
        session.resolve_query(request.ticket, Err(CadError::fetch("boom")));

        session.begin_query("taller").unwrap();
        assert_eq!(session.error(), None);
        assert!(session.is_loading());
    }

    #[test]
    fn test_result_carrying_error_is_a_failure() {
        let mut session = SessionController::default();
        let request = session.begin_query("gear").unwrap();
        let mut result = cylinder("c1");
        result.error = Some("Execution failed".into());

        session.resolve_query(request.ticket, Ok(result));
        assert_eq!(session.error(), Some("Execution failed"));
        assert!(!session.mode_locked());
        assert_eq!(session.conversation_id(), None);
    }

    #[test]
    fn test_new_conversation_resets_from_any_state() {
        let mut ready = ready_with(sketch("c1"));
        let mut errored = ready_with(sketch("c1"));
        let request = errored.begin_query("x").unwrap();
        errored.resolve_query(request.ticket, Err(CadError::fetch("down")));
        let mut loading = SessionController::default();
        loading.begin_query("x").unwrap();

        for session in [&mut ready, &mut errored, &mut loading] {
            assert_eq!(session.new_conversation(), Transition::Reset);
            let snapshot = session.snapshot();
            assert_eq!(snapshot.state, "empty");
            assert_eq!(snapshot.conversation_id, None);
            assert!(!snapshot.mode_locked);
            assert_eq!(snapshot.error, None);
            assert_eq!(snapshot.result_id, None);
            assert_eq!(snapshot.render_mode, RenderMode::ThreeD);
        }
    }

    #[test]
    fn test_reset_restores_initial_mode_and_unlocks_selector() {
        let mut session = SessionController::new(RenderMode::TwoD);
        session.select_mode(RenderMode::ThreeD);
        let request = session.begin_query("x").unwrap();
        session.resolve_query(request.ticket, Ok(cylinder("c1")));

        session.new_conversation();
        assert_eq!(session.render_mode(), RenderMode::TwoD);
        assert_eq!(
            session.select_mode(RenderMode::ThreeD),
            ModeSelection::Applied(RenderMode::ThreeD)
        );
    }

    #[test]
    fn test_later_submission_wins_when_earlier_resolves_last() {
        let mut session = SessionController::default();
        let first = session.begin_query("first").unwrap();
        let second = session.begin_query("second").unwrap();

        let mut second_result = cylinder("c1");
        second_result.id = "second".into();
        assert!(matches!(
            session.resolve_query(second.ticket, Ok(second_result)),
            Transition::Accepted { .. }
        ));

        let mut first_result = cylinder("c1");
        first_result.id = "first".into();
        assert_eq!(
            session.resolve_query(first.ticket, Ok(first_result)),
            Transition::Stale {
                ticket: first.ticket
            }
        );
        assert_eq!(session.current_result().map(|r| r.id.as_str()), Some("second"));
    }

    #[test]
    fn test_fetch_started_before_reset_is_ignored() {
        let mut session = SessionController::default();
        let request = session.begin_query("cylinder").unwrap();
        session.new_conversation();

        let transition = session.resolve_query(request.ticket, Ok(cylinder("c1")));
        assert!(matches!(transition, Transition::Stale { .. }));
        assert_eq!(session.state(), &SessionState::Empty);
    }

    #[test]
    fn test_history_selection_adopts_and_locks() {
        let mut session = ready_with(cylinder("c1"));
        let ticket = session.reserve_history_ticket();
        let transition =
            session.resolve_history(ticket, Ok(HistoricalResult::Found(sketch("c2"))));

        assert!(transition.changes_display());
        assert_eq!(session.conversation_id(), Some("c2"));
        assert_eq!(session.render_mode(), RenderMode::TwoD);
        assert!(session.mode_locked());
    }

    #[test]
    fn test_historical_error_keeps_displayed_shapes() {
        let mut session = ready_with(cylinder("c1"));
        let ticket = session.reserve_history_ticket();
        let transition = session.resolve_history(
            ticket,
            Ok(HistoricalResult::Failed("Code file not found".into())),
        );

        assert_eq!(
            transition,
            Transition::Failed {
                message: "Code file not found".into()
            }
        );
        assert_eq!(session.state().name(), "errored");
        assert_eq!(session.current_result().map(|r| r.id.as_str()), Some("obj-1"));
    }

    #[test]
    fn test_history_selection_supersedes_pending_query() {
        let mut session = SessionController::default();
        let query = session.begin_query("cylinder").unwrap();
        let history = session.reserve_history_ticket();

        session.resolve_history(history, Ok(HistoricalResult::Found(sketch("c9"))));
        assert!(matches!(
            session.resolve_query(query.ticket, Ok(cylinder("c1"))),
            Transition::Stale { .. }
        ));
        assert_eq!(session.conversation_id(), Some("c9"));
    }

    #[test]
    fn test_snapshot_placeholder_and_badge() {
        let empty = SessionController::default().snapshot();
        assert_eq!(empty.query_placeholder(), "Describe the part you need...");
        assert_eq!(empty.conversation_badge(), None);

        let session = ready_with(cylinder("3f2a9c01-7d4e-4b8a"));
        let snapshot = session.snapshot();
        assert_eq!(snapshot.query_placeholder(), "Continue the conversation...");
        assert_eq!(snapshot.conversation_badge(), Some("3f2a9c01"));
    }
}
