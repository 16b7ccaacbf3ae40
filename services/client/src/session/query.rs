//! services/client/src/session/query.rs
//!
//! The asynchronous "worker" function for one free-form question.
//!
//! Ordering is last-dispatch-wins: every dispatch takes a fresh id from a
//! monotonic counter and only the response matching the most recently
//! dispatched id may be committed, so a slow earlier request can never
//! overwrite a faster later one. A response bound to an older session
//! version is discarded outright.

use crate::session::error::SessionError;
use crate::session::state::{QueryDisplay, SessionState};
use edufy_core::domain::QueryResult;
use edufy_core::ports::{PortError, StudyService};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Asks `question` against the current document and commits the outcome to
/// the visible query display.
///
/// Validation and precondition failures are returned as errors without any
/// network call; transport and server failures are rendered in place of a
/// result and reported as `Ok(())`.
pub async fn ask_question(
    service: &Arc<dyn StudyService>,
    state: &Arc<Mutex<SessionState>>,
    question: &str,
) -> Result<(), SessionError> {
    let question = question.trim();
    if question.is_empty() {
        return Err(SessionError::EmptyQuestion);
    }

    let (request_id, dispatched_version) = {
        let mut state = state.lock().await;
        if !state.session.ready {
            return Err(SessionError::NoDocuments);
        }
        state.last_query_dispatch += 1;
        let request_id = state.last_query_dispatch;
        state.query_display = QueryDisplay::Loading { request_id };
        (request_id, state.session.version)
    };

    info!(request_id, question, "query dispatched");
    let outcome = service.query(question).await;

    let mut state = state.lock().await;
    if request_id != state.last_query_dispatch {
        debug!(request_id, "discarding response superseded by a later dispatch");
        return Ok(());
    }
    if dispatched_version != state.session.version {
        // The document this was computed against no longer exists.
        debug!(
            request_id,
            dispatched_version,
            current_version = state.session.version,
            "discarding response answered after an intervening upload"
        );
        return Ok(());
    }

    state.query_display = match outcome {
        Ok(answer) if answer.is_empty() => QueryDisplay::NoMatches {
            question: question.to_string(),
        },
        Ok(answer) => QueryDisplay::Answered(QueryResult {
            question: question.to_string(),
            ai_response: answer.ai_response,
            answers: answer.answers,
            metadata: answer.metadata,
            request_id,
            bound_to_version: dispatched_version,
        }),
        Err(e) => {
            warn!(request_id, error = %e, "query failed");
            QueryDisplay::Failed {
                notice: match e {
                    PortError::Transport(_) => {
                        "Request failed: could not reach the document service.".to_string()
                    }
                    PortError::Server(message) => format!("Request failed: {}", message),
                    PortError::Unexpected(message) => format!("Request failed: {}", message),
                },
            }
        }
    };

    Ok(())
}
