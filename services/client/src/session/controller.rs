//! services/client/src/session/controller.rs
//!
//! The composition root for the document session. Owns the shared session
//! state and the service port, exposes every user-triggered operation, and
//! is the read surface the rendering layer draws from.

use crate::session::cache::ArtifactView;
use crate::session::error::SessionError;
use crate::session::state::{ActiveView, QueryDisplay, SessionState};
use crate::session::{fetch, query, upload};
use edufy_core::domain::{ArtifactKind, DocumentSession, Flashcard, UploadReceipt};
use edufy_core::ports::StudyService;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

pub struct SessionController {
    service: Arc<dyn StudyService>,
    state: Arc<Mutex<SessionState>>,
}

impl SessionController {
    pub fn new(service: Arc<dyn StudyService>) -> Self {
        Self {
            service,
            state: Arc::new(Mutex::new(SessionState::new())),
        }
    }

    //=====================================================================================
    // Status and connectivity
    //=====================================================================================

    /// Reads server truth from `/status` and refreshes `ready` and the
    /// document list. Returns true if the session changed, so dependent
    /// fetchers re-evaluate their cache validity. A failed poll leaves the
    /// previous known state intact and is not surfaced to the user.
    pub async fn refresh_status(&self) -> bool {
        match self.service.status().await {
            Ok(snapshot) => {
                let mut state = self.state.lock().await;
                let changed = state.session.apply_status(&snapshot);
                if changed {
                    info!(
                        ready = state.session.ready,
                        documents = state.session.document_count,
                        "document session changed"
                    );
                }
                changed
            }
            Err(e) => {
                warn!(error = %e, "status poll failed; keeping previous state");
                false
            }
        }
    }

    /// Raw connectivity check feeding the banner state.
    pub async fn check_connectivity(&self) {
        let reachable = self.service.health().await.is_ok();
        let mut state = self.state.lock().await;
        if state.backend_reachable && !reachable {
            warn!("backend connection lost");
        } else if !state.backend_reachable && reachable {
            info!("backend connection restored");
        }
        state.backend_reachable = reachable;
    }

    //=====================================================================================
    // User-triggered operations
    //=====================================================================================

    /// Uploads a new document and, on success, immediately re-reads the
    /// service status so dependent fetchers see the fresh session.
    pub async fn upload(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadReceipt, SessionError> {
        let receipt = upload::upload_document(&self.service, &self.state, filename, bytes).await?;
        self.refresh_status().await;
        Ok(receipt)
    }

    /// Asks one free-form question. See `query::ask_question` for the
    /// ordering and staleness guarantees.
    pub async fn ask(&self, question: &str) -> Result<(), SessionError> {
        query::ask_question(&self.service, &self.state, question).await
    }

    /// Switches the active view. Activating the flashcards view triggers the
    /// lazy generation if nothing valid is cached for the current document.
    /// Re-activating a view whose fetch failed retries it.
    pub async fn activate_view(&self, view: ActiveView) {
        {
            let mut state = self.state.lock().await;
            state.active_view = view;
            let version = state.session.version;
            let kind = match view {
                ActiveView::Asking => ArtifactKind::SampleQuestions,
                ActiveView::Flashcards => ArtifactKind::Flashcards,
            };
            let failed = match kind {
                ArtifactKind::SampleQuestions => matches!(
                    state.cache.sample_questions.read(version),
                    ArtifactView::Failed(_)
                ),
                ArtifactKind::Flashcards => {
                    matches!(state.cache.flashcards.read(version), ArtifactView::Failed(_))
                }
            };
            if failed {
                state.cache.invalidate(kind);
            }
        }
        if view == ActiveView::Flashcards {
            fetch::ensure_flashcards(&self.service, &self.state).await;
        }
    }

    /// The user picked one of the suggested questions: force the asking view
    /// and seed the question for it to consume.
    pub async fn select_sample_question(&self, question: &str) {
        let mut state = self.state.lock().await;
        state.active_view = ActiveView::Asking;
        state.pending_question = Some(question.to_string());
    }

    /// Consumes the seeded question. The asking view calls this exactly once
    /// per selection, so re-rendering never re-triggers a dispatch.
    pub async fn take_pending_question(&self) -> Option<String> {
        self.state.lock().await.pending_question.take()
    }

    /// Re-evaluates the sample-question cache; fetches lazily when the
    /// session is ready and nothing valid is cached. Safe to call on every
    /// poll tick.
    pub async fn ensure_sample_questions(&self) {
        fetch::ensure_sample_questions(&self.service, &self.state).await;
    }

    /// Re-evaluates the flashcards cache, as `ensure_sample_questions` but
    /// only ever invoked from view activation (or a retry of a failed
    /// generation).
    pub async fn ensure_flashcards(&self) {
        fetch::ensure_flashcards(&self.service, &self.state).await;
    }

    //=====================================================================================
    // Read surface for the rendering layer
    //=====================================================================================

    pub async fn session(&self) -> DocumentSession {
        self.state.lock().await.session.clone()
    }

    pub async fn active_view(&self) -> ActiveView {
        self.state.lock().await.active_view
    }

    pub async fn query_display(&self) -> QueryDisplay {
        self.state.lock().await.query_display.clone()
    }

    pub async fn sample_questions(&self) -> ArtifactView<String> {
        let state = self.state.lock().await;
        state.cache.sample_questions.read(state.session.version)
    }

    pub async fn flashcards(&self) -> ArtifactView<Flashcard> {
        let state = self.state.lock().await;
        state.cache.flashcards.read(state.session.version)
    }

    pub async fn backend_reachable(&self) -> bool {
        self.state.lock().await.backend_reachable
    }
}
