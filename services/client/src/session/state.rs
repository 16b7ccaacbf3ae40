//! services/client/src/session/state.rs
//!
//! Defines the application's shared session state.

use crate::session::cache::ArtifactCache;
use edufy_core::domain::{DocumentSession, QueryResult};

/// The two views the rendering surface can show. Selecting a view may
/// trigger a lazy fetch but the view itself holds no data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    Asking,
    Flashcards,
}

/// What the asking view currently renders. A new dispatch supersedes the
/// previous value; a failure is shown in place of a result, not alongside a
/// restored previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryDisplay {
    /// No question has been asked against the current document.
    NotAsked,
    /// The most recently dispatched request is still in flight.
    Loading { request_id: u64 },
    /// The committed result of the most recent dispatch.
    Answered(QueryResult),
    /// The service answered successfully but found no relevant content.
    NoMatches { question: String },
    /// The request failed; the notice replaces the result area.
    Failed { notice: String },
}

/// The state for the single document session, shared across all components.
///
/// Guarded by one `tokio::sync::Mutex`; every component reads and writes it
/// only through its own operations, never by reaching into another
/// component's cached data.
pub struct SessionState {
    pub session: DocumentSession,
    pub cache: ArtifactCache,
    pub active_view: ActiveView,
    /// A sample question selected by the user, consumed exactly once by the
    /// asking view.
    pub pending_question: Option<String>,
    pub query_display: QueryDisplay,
    /// Dispatch counter for queries. Only the response matching the most
    /// recently dispatched id may be committed.
    pub last_query_dispatch: u64,
    /// Upload is strictly serialized with respect to itself.
    pub upload_in_flight: bool,
    /// Fed by the low-frequency connectivity poller; rendered as a banner.
    pub backend_reachable: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            session: DocumentSession::new(),
            cache: ArtifactCache::new(),
            active_view: ActiveView::Asking,
            pending_question: None,
            query_display: QueryDisplay::NotAsked,
            last_query_dispatch: 0,
            upload_in_flight: false,
            backend_reachable: true,
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
