//! services/client/src/session/cache.rs
//!
//! The generation-stamped artifact cache. Each derived artifact (sample
//! questions, flashcards) is expensive to recompute on the remote service,
//! so the client fetches it at most once per document version and treats
//! anything stamped with an older version as if it were never fetched.
//!
//! Invalidation is lazy: nothing is cleared eagerly on upload beyond the
//! status flag, and every read normalizes a stale `Ready`/`Failed` entry to
//! `Empty` before use.

use edufy_core::domain::{ArtifactKind, Flashcard};

/// The raw lifecycle state of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactStatus {
    Empty,
    Loading,
    Ready,
    Failed,
}

/// What a reader observes after staleness normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactView<T> {
    /// Nothing valid is cached for the current version.
    Empty,
    /// A fetch for the current version is in flight.
    Loading,
    /// Valid data for the current version. May be an empty list, which means
    /// "nothing could be generated" and is not an error.
    Ready(Vec<T>),
    /// The fetch for the current version failed; retryable.
    Failed(String),
}

/// One memoized artifact, stamped with the session version it was computed
/// against.
#[derive(Debug)]
pub struct CachedArtifact<T> {
    status: ArtifactStatus,
    data: Option<Vec<T>>,
    error: Option<String>,
    bound_to_version: u64,
}

impl<T: Clone> CachedArtifact<T> {
    pub fn new() -> Self {
        Self {
            status: ArtifactStatus::Empty,
            data: None,
            error: None,
            bound_to_version: 0,
        }
    }

    /// Reads the entry as of `current_version`. An entry whose stamp differs
    /// from the current version is logically invalid and reads as `Empty`,
    /// regardless of its raw status.
    pub fn read(&self, current_version: u64) -> ArtifactView<T> {
        if self.bound_to_version != current_version {
            return ArtifactView::Empty;
        }
        match self.status {
            ArtifactStatus::Empty => ArtifactView::Empty,
            ArtifactStatus::Loading => ArtifactView::Loading,
            ArtifactStatus::Ready => ArtifactView::Ready(self.data.clone().unwrap_or_default()),
            ArtifactStatus::Failed => {
                ArtifactView::Failed(self.error.clone().unwrap_or_default())
            }
        }
    }

    /// Claims the single in-flight fetch slot for `version`. Returns false
    /// when a fetch for this (or a newer) version is already in flight, or
    /// when the entry already holds a terminal state for this version; the
    /// caller must not issue a request in that case.
    ///
    /// A `Loading` entry stamped with an older version is re-claimed: its
    /// eventual completion carries the old stamp and will be dropped.
    pub fn begin_fetch(&mut self, version: u64) -> bool {
        match self.status {
            ArtifactStatus::Loading if self.bound_to_version >= version => false,
            ArtifactStatus::Ready | ArtifactStatus::Failed
                if self.bound_to_version == version =>
            {
                false
            }
            _ => {
                self.status = ArtifactStatus::Loading;
                self.bound_to_version = version;
                true
            }
        }
    }

    /// Commits the outcome of the fetch that was started for `version`.
    /// The write is dropped (returns false) unless the entry is still
    /// `Loading` with the matching stamp, so a completion racing a newer
    /// fetch or an invalidation never lands.
    pub fn complete(&mut self, version: u64, outcome: Result<Vec<T>, String>) -> bool {
        if self.status != ArtifactStatus::Loading || self.bound_to_version != version {
            return false;
        }
        match outcome {
            Ok(items) => {
                self.status = ArtifactStatus::Ready;
                self.data = Some(items);
                self.error = None;
            }
            Err(message) => {
                self.status = ArtifactStatus::Failed;
                self.error = Some(message);
            }
        }
        true
    }

    /// Sets the entry back to `Empty` without deleting prior data, so a
    /// caller could keep showing the previous list while refreshing.
    pub fn invalidate(&mut self) {
        self.status = ArtifactStatus::Empty;
    }

    pub fn status(&self) -> ArtifactStatus {
        self.status
    }

    pub fn bound_version(&self) -> u64 {
        self.bound_to_version
    }
}

impl<T: Clone> Default for CachedArtifact<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Holds the two fetch-once-per-document artifacts.
#[derive(Debug, Default)]
pub struct ArtifactCache {
    pub sample_questions: CachedArtifact<String>,
    pub flashcards: CachedArtifact<Flashcard>,
}

impl ArtifactCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidates one artifact kind.
    pub fn invalidate(&mut self, kind: ArtifactKind) {
        match kind {
            ArtifactKind::SampleQuestions => self.sample_questions.invalidate(),
            ArtifactKind::Flashcards => self.flashcards.invalidate(),
        }
    }

    /// Invalidates every cached artifact; called after a successful upload
    /// replaced the document they were computed from.
    pub fn invalidate_all(&mut self) {
        self.sample_questions.invalidate();
        self.flashcards.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_entry_reads_empty() {
        let entry: CachedArtifact<String> = CachedArtifact::new();
        assert_eq!(entry.read(0), ArtifactView::Empty);
        assert_eq!(entry.read(3), ArtifactView::Empty);
    }

    #[test]
    fn fetch_cycle_reaches_ready() {
        let mut entry = CachedArtifact::new();
        assert!(entry.begin_fetch(1));
        assert_eq!(entry.read(1), ArtifactView::Loading);
        assert!(entry.complete(1, Ok(vec!["Q1".to_string()])));
        assert_eq!(entry.read(1), ArtifactView::Ready(vec!["Q1".to_string()]));
    }

    #[test]
    fn second_trigger_is_suppressed_while_loading() {
        let mut entry: CachedArtifact<String> = CachedArtifact::new();
        assert!(entry.begin_fetch(1));
        assert!(!entry.begin_fetch(1), "loading suppresses duplicate fetch triggers");
    }

    #[test]
    fn valid_terminal_states_are_not_refetched() {
        let mut entry = CachedArtifact::new();
        entry.begin_fetch(1);
        entry.complete(1, Ok(vec!["Q1".to_string()]));
        assert!(!entry.begin_fetch(1));

        entry.begin_fetch(2);
        entry.complete(2, Err("boom".to_string()));
        assert!(!entry.begin_fetch(2), "a failed entry is retried by invalidation, not polling");
    }

    #[test]
    fn ready_entry_goes_stale_when_version_moves() {
        // After an upload bumps the version, a previously Ready entry reads
        // Empty purely through the version-mismatch check.
        let mut entry = CachedArtifact::new();
        entry.begin_fetch(1);
        entry.complete(1, Ok(vec!["Q1".to_string()]));
        assert!(entry.bound_version() < 2);
        assert_eq!(entry.read(2), ArtifactView::Empty);
        // And it may be fetched again for the new version.
        assert!(entry.begin_fetch(2));
    }

    #[test]
    fn completion_for_superseded_version_is_dropped() {
        let mut entry = CachedArtifact::new();
        entry.begin_fetch(1);
        // A new fetch starts for version 2 while version 1 is in flight.
        assert!(entry.begin_fetch(2));
        // The old completion arrives late and must not be written.
        assert!(!entry.complete(1, Ok(vec!["old".to_string()])));
        assert_eq!(entry.read(2), ArtifactView::Loading);
        assert!(entry.complete(2, Ok(vec!["new".to_string()])));
        assert_eq!(entry.read(2), ArtifactView::Ready(vec!["new".to_string()]));
    }

    #[test]
    fn completion_after_invalidation_is_dropped() {
        let mut entry = CachedArtifact::new();
        entry.begin_fetch(1);
        entry.invalidate();
        assert!(!entry.complete(1, Ok(vec!["late".to_string()])));
        assert_eq!(entry.read(1), ArtifactView::Empty);
    }

    #[test]
    fn invalidate_keeps_prior_data() {
        let mut entry = CachedArtifact::new();
        entry.begin_fetch(1);
        entry.complete(1, Ok(vec!["Q1".to_string()]));
        entry.invalidate();
        assert_eq!(entry.status(), ArtifactStatus::Empty);
        assert_eq!(entry.read(1), ArtifactView::Empty);
    }

    #[test]
    fn zero_result_success_is_ready_not_failed() {
        let mut entry: CachedArtifact<String> = CachedArtifact::new();
        entry.begin_fetch(1);
        entry.complete(1, Ok(vec![]));
        assert_eq!(entry.read(1), ArtifactView::Ready(vec![]));
    }
}
