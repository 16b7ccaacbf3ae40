//! crates/edufy_core/src/ports.rs
//!
//! Defines the service contract (trait) for the application's core logic.
//! This trait forms the boundary of the hexagonal architecture, allowing the
//! session/cache orchestration to be independent of the concrete HTTP client
//! that talks to the document service.

use async_trait::async_trait;

use crate::domain::{Flashcard, QueryAnswer, StatusSnapshot, UploadReceipt};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
///
/// The three variants matter to the client's control flow: a connectivity
/// failure (no response at all) is distinguished from a well-formed error the
/// service chose to report, which is distinguished from everything else.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// No response: connection refused, DNS failure, or the transport's own
    /// timeout. Retryable.
    #[error("Could not reach the document service: {0}")]
    Transport(String),
    /// The service answered with a well-formed `{error}` payload or an HTTP
    /// 5xx. The message is passed through to the user; not retried
    /// automatically.
    #[error("{0}")]
    Server(String),
    /// A malformed response or any other unexpected condition.
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Port (Trait)
//=========================================================================================

/// The remote document-indexing and answer-generation service, consumed only
/// through its HTTP contract. The actual retrieval/AI computation lives
/// server-side; this is the whole client-side surface.
#[async_trait]
pub trait StudyService: Send + Sync {
    /// Raw connectivity check (`GET /`). The body is ignored.
    async fn health(&self) -> PortResult<()>;

    /// Reports whether an indexed, queryable document set exists
    /// (`GET /status`).
    async fn status(&self) -> PortResult<StatusSnapshot>;

    /// Uploads a new document, replacing the entire remote document set
    /// (`POST /upload`, multipart). Replace-not-append: one document session
    /// at a time.
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> PortResult<UploadReceipt>;

    /// Runs one question against the current document (`GET /query`).
    async fn query(&self, question: &str) -> PortResult<QueryAnswer>;

    /// Auto-suggested questions derived from the current document
    /// (`GET /sample-questions`). An empty list is a valid success.
    async fn sample_questions(&self) -> PortResult<Vec<String>>;

    /// Generated flashcards for the current document (`GET /flashcards`).
    /// An empty list is a valid success.
    async fn flashcards(&self) -> PortResult<Vec<Flashcard>>;
}
