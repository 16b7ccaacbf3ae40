//! services/client/src/session/fetch.rs
//!
//! The asynchronous "worker" functions for the two fetch-and-cache
//! artifacts: sample questions and flashcards. Both follow the identical
//! state machine (`Empty -> Loading -> Ready | Failed`) driven through the
//! generation-stamped cache, which guarantees at most one in-flight fetch
//! per kind and drops completions for superseded versions.

use crate::session::state::SessionState;
use edufy_core::ports::StudyService;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Lazily fetches the suggested questions for the current document.
///
/// A no-op unless the session is ready and nothing valid is cached for the
/// current version, so it is safe to call on every poll tick and after every
/// upload.
pub async fn ensure_sample_questions(
    service: &Arc<dyn StudyService>,
    state: &Arc<Mutex<SessionState>>,
) {
    let version = {
        let mut state = state.lock().await;
        if !state.session.ready {
            return;
        }
        let version = state.session.version;
        if !state.cache.sample_questions.begin_fetch(version) {
            return;
        }
        version
    };

    info!(version, "fetching sample questions");
    let outcome = service
        .sample_questions()
        .await
        .map_err(|e| e.to_string());
    if let Err(message) = &outcome {
        warn!(version, %message, "sample-question fetch failed");
    }

    let mut state = state.lock().await;
    if !state.cache.sample_questions.complete(version, outcome) {
        debug!(version, "dropping sample-question result for a superseded document");
    }
}

/// Lazily generates flashcards for the current document. Triggered only when
/// the flashcards view is activated, never prefetched.
pub async fn ensure_flashcards(
    service: &Arc<dyn StudyService>,
    state: &Arc<Mutex<SessionState>>,
) {
    let version = {
        let mut state = state.lock().await;
        if !state.session.ready {
            return;
        }
        let version = state.session.version;
        if !state.cache.flashcards.begin_fetch(version) {
            return;
        }
        version
    };

    info!(version, "generating flashcards");
    let outcome = service.flashcards().await.map_err(|e| e.to_string());
    if let Err(message) = &outcome {
        warn!(version, %message, "flashcard generation failed");
    }

    let mut state = state.lock().await;
    if !state.cache.flashcards.complete(version, outcome) {
        debug!(version, "dropping flashcards for a superseded document");
    }
}
