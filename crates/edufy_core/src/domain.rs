//! crates/edufy_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any transport or serialization format.

/// The single piece of mutable state shared across all client components.
///
/// Created once at process start with `ready = false, version = 0` and never
/// replaced; only mutated through the two methods below. `version` is the
/// invalidation key for every cached artifact: anything computed against an
/// older version is stale and must not be surfaced.
#[derive(Debug, Clone)]
pub struct DocumentSession {
    /// True iff the backing service reports an indexed, queryable document.
    pub ready: bool,
    pub document_count: usize,
    /// Monotonically increasing; bumped on every successful upload.
    pub version: u64,
    /// The documents the service currently holds, as reported by `/status`.
    pub documents: Vec<DocumentInfo>,
}

impl DocumentSession {
    pub fn new() -> Self {
        Self {
            ready: false,
            document_count: 0,
            version: 0,
            documents: Vec::new(),
        }
    }

    /// Applies a fresh `/status` read. Returns true if `ready` or the
    /// document count changed, so dependent fetchers re-evaluate their
    /// cache validity. Never touches `version`: bumping it is the upload
    /// coordinator's exclusive right.
    pub fn apply_status(&mut self, snapshot: &StatusSnapshot) -> bool {
        let ready = snapshot.database_ready && !snapshot.documents.is_empty();
        let changed = self.ready != ready || self.document_count != snapshot.documents.len();
        self.ready = ready;
        self.document_count = snapshot.documents.len();
        self.documents = snapshot.documents.clone();
        changed
    }

    /// Records a successful upload: the remote document set was replaced
    /// wholesale, so the session moves to a new version and is ready.
    pub fn record_upload(&mut self) {
        self.version += 1;
        self.ready = true;
    }
}

impl Default for DocumentSession {
    fn default() -> Self {
        Self::new()
    }
}

/// What the service's `/status` endpoint reported.
#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    pub database_ready: bool,
    pub documents: Vec<DocumentInfo>,
}

/// One document currently held by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInfo {
    pub name: String,
    pub size: u64,
}

/// The two derived artifacts the client fetches once per valid document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
    SampleQuestions,
    Flashcards,
}

/// A single question-and-answer flashcard. The sequence order defines the
/// navigation order; the viewer wraps circularly.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

/// One retrieved passage backing an answer.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct SourcePassage {
    pub content: String,
    pub source: String,
}

/// Retrieval metadata attached to a query answer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryMetadata {
    pub query_type: String,
    pub k_used: u32,
    pub total_sections: u32,
}

/// What the service computed for one question, before the client has decided
/// whether it is still current.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryAnswer {
    pub ai_response: String,
    pub answers: Vec<SourcePassage>,
    pub metadata: QueryMetadata,
}

impl QueryAnswer {
    /// A valid terminal state meaning "no relevant content", distinct from
    /// an error.
    pub fn is_empty(&self) -> bool {
        self.ai_response.is_empty() && self.answers.is_empty()
    }
}

/// A committed, displayable query result. Created per dispatch and only ever
/// superseded, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResult {
    pub question: String,
    pub ai_response: String,
    pub answers: Vec<SourcePassage>,
    pub metadata: QueryMetadata,
    pub request_id: u64,
    /// The session version at dispatch time. A result whose version differs
    /// from the current session version is stale and must not be rendered.
    pub bound_to_version: u64,
}

/// Structured success response from an upload.
#[derive(Debug, Clone)]
pub struct UploadReceipt {
    pub message: String,
    pub filename: String,
    pub file_size: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(database_ready: bool, names: &[&str]) -> StatusSnapshot {
        StatusSnapshot {
            database_ready,
            documents: names
                .iter()
                .map(|n| DocumentInfo {
                    name: n.to_string(),
                    size: 1024,
                })
                .collect(),
        }
    }

    #[test]
    fn session_starts_not_ready_at_version_zero() {
        let session = DocumentSession::new();
        assert!(!session.ready);
        assert_eq!(session.version, 0);
        assert_eq!(session.document_count, 0);
    }

    #[test]
    fn ready_requires_database_and_documents() {
        let mut session = DocumentSession::new();
        session.apply_status(&snapshot(true, &[]));
        assert!(!session.ready, "ready database with no documents is not ready");
        session.apply_status(&snapshot(true, &["notes.pdf"]));
        assert!(session.ready);
    }

    #[test]
    fn apply_status_reports_changes_but_never_bumps_version() {
        let mut session = DocumentSession::new();
        assert!(session.apply_status(&snapshot(true, &["a.txt"])));
        assert!(!session.apply_status(&snapshot(true, &["a.txt"])));
        assert!(session.apply_status(&snapshot(false, &[])));
        assert_eq!(session.version, 0);
    }

    #[test]
    fn record_upload_bumps_version_and_sets_ready() {
        let mut session = DocumentSession::new();
        session.record_upload();
        session.record_upload();
        assert_eq!(session.version, 2);
        assert!(session.ready);
    }
}
