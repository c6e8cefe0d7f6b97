//! Studio use case implementation.
//!
//! This module provides the `StudioUseCase` which drives one viewport: it feeds
//! backend responses into the `SessionController`, asks the dispatcher what to
//! present, and keeps the `SceneBuilder` in step with the displayed result.

use std::sync::Arc;

use cadchat_core::backend::CadBackend;
use cadchat_core::dispatch::{DownloadRequest, Presentation, authorize_download, dispatch};
use cadchat_core::error::Result;
use cadchat_core::result::{ExportFormat, RenderMode};
use cadchat_core::scene::{SceneBuilder, SceneOutcome, ViewerEngine};
use cadchat_core::session::{ModeSelection, SessionController, SessionSnapshot, Transition};
use tokio::sync::Mutex;

use crate::history::HistoryService;

/// Everything a presentation layer needs after one event.
#[derive(Debug, Clone, PartialEq)]
pub struct StudioUpdate {
    pub transition: Transition,
    pub snapshot: SessionSnapshot,
    pub presentation: Presentation,
    /// Set when the scene was rebuilt or cleared by this event
    pub scene: Option<SceneOutcome>,
}

/// Bytes of a downloaded artifact together with the request that fetched them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedArtifact {
    pub request: DownloadRequest,
    pub bytes: Vec<u8>,
}

/// Use case for one conversational CAD viewport.
///
/// # Responsibilities
///
/// - Submitting queries and selecting historical replies
/// - Applying the session's transitions to the scene
/// - Authorizing downloads against the displayed result
///
/// # Concurrency
///
/// Neither lock is ever held across a backend call. Overlapping requests are
/// sequenced by the session's tickets: only the latest one can take effect.
/// When both locks are needed the session lock is taken first.
pub struct StudioUseCase<E: ViewerEngine + Send> {
    backend: Arc<dyn CadBackend>,
    history: HistoryService,
    session: Mutex<SessionController>,
    scene: Mutex<SceneBuilder<E>>,
}

impl<E: ViewerEngine + Send> StudioUseCase<E> {
    /// Creates a new use case over an already mounted scene.
    pub fn new(backend: Arc<dyn CadBackend>, scene: SceneBuilder<E>, initial_mode: RenderMode) -> Self {
        Self {
            history: HistoryService::new(backend.clone()),
            backend,
            session: Mutex::new(SessionController::new(initial_mode)),
            scene: Mutex::new(scene),
        }
    }

    pub fn history(&self) -> &HistoryService {
        &self.history
    }

    /// Submits a query, continuing the active conversation if there is one.
    ///
    /// # Errors
    ///
    /// Returns `CadError::EmptyQuery` for blank text. Backend failures are not
    /// errors here; they surface as `Transition::Failed`.
    pub async fn submit_query(&self, text: &str) -> Result<StudioUpdate> {
        let request = self.session.lock().await.begin_query(text)?;

        tracing::info!(
            "[StudioUseCase] Submitting query {} ({})",
            request.ticket,
            request.mode_hint
        );
        let outcome = self
            .backend
            .submit_query(
                &request.text,
                request.conversation_id.as_deref(),
                request.mode_hint,
            )
            .await;

        let transition = self
            .session
            .lock()
            .await
            .resolve_query(request.ticket, outcome);

        if let Transition::Accepted {
            conversation_id, ..
        } = &transition
        {
            self.history.invalidate(conversation_id).await;
        }

        Ok(self.apply(transition).await)
    }

    /// Displays the result recorded for a historical reply.
    pub async fn select_history(&self, conversation_id: &str, message_index: usize) -> StudioUpdate {
        let ticket = self.session.lock().await.reserve_history_ticket();

        tracing::info!(
            "[StudioUseCase] Loading reply {} of {} ({})",
            message_index,
            conversation_id,
            ticket
        );
        let outcome = self
            .backend
            .get_message_result(conversation_id, message_index)
            .await;

        let transition = self.session.lock().await.resolve_history(ticket, outcome);
        self.apply(transition).await
    }

    /// Starts over with an empty session and an empty viewport.
    pub async fn new_conversation(&self) -> StudioUpdate {
        let transition = self.session.lock().await.new_conversation();
        self.apply(transition).await
    }

    pub async fn select_mode(&self, mode: RenderMode) -> ModeSelection {
        self.session.lock().await.select_mode(mode)
    }

    pub async fn snapshot(&self) -> SessionSnapshot {
        self.session.lock().await.snapshot()
    }

    /// Presentation for the displayed result.
    pub async fn presentation(&self) -> Presentation {
        let current = self.session.lock().await.current_result().cloned();
        dispatch(current.as_deref())
    }

    /// Download formats for the effective render mode.
    pub async fn download_options(&self) -> &'static [ExportFormat] {
        let mode = self.session.lock().await.render_mode();
        ExportFormat::for_mode(mode)
    }

    /// Downloads the displayed result in `format`.
    ///
    /// # Errors
    ///
    /// - `NoCurrentResult` / `UnsupportedExportFormat` before any request is made
    /// - `Fetch` when the backend download fails
    pub async fn download(&self, format: ExportFormat) -> Result<DownloadedArtifact> {
        let request = {
            let session = self.session.lock().await;
            authorize_download(session.current_result().map(|r| r.as_ref()), format)?
        };

        let bytes = self
            .backend
            .download_artifact(&request.result_id, request.format)
            .await?;
        tracing::info!(
            "[StudioUseCase] Downloaded {} ({} bytes)",
            request.file_name(),
            bytes.len()
        );
        Ok(DownloadedArtifact { request, bytes })
    }

    /// Runs `f` against the mounted scene.
    pub async fn inspect_scene<R>(&self, f: impl FnOnce(&SceneBuilder<E>) -> R) -> R {
        let scene = self.scene.lock().await;
        f(&scene)
    }

    /// Applies a transition to the scene.
    ///
    /// The session guard is held until the scene is updated (lock order is
    /// always session, then scene), so scene rebuilds happen in the order the
    /// session accepted the results.
    async fn apply(&self, transition: Transition) -> StudioUpdate {
        let session = self.session.lock().await;
        let snapshot = session.snapshot();
        let presentation = dispatch(session.current_result().map(|r| r.as_ref()));

        let scene = if transition.changes_display() {
            Some(self.show(&presentation).await)
        } else {
            None
        };
        drop(session);

        StudioUpdate {
            transition,
            snapshot,
            presentation,
            scene,
        }
    }

    async fn show(&self, presentation: &Presentation) -> SceneOutcome {
        let mut scene = self.scene.lock().await;
        match presentation {
            Presentation::Scene { shapes, .. } => scene.show_normalized(shapes),
            _ => {
                scene.clear();
                SceneOutcome::Cleared
            }
        }
    }
}
