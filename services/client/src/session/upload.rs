//! services/client/src/session/upload.rs
//!
//! The asynchronous "worker" function for submitting a new document.
//!
//! An upload replaces the entire remote document set, so success is the one
//! event allowed to bump the session version; doing so logically invalidates
//! every cached artifact and the visible query result, since the document
//! they were computed against no longer exists.

use crate::session::error::SessionError;
use crate::session::state::{QueryDisplay, SessionState};
use edufy_core::domain::UploadReceipt;
use edufy_core::ports::StudyService;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Uploads `bytes` as a new document.
///
/// Format and size validation is the service's responsibility; the only
/// local precondition is that a file was actually selected. No partial
/// success: on failure the previous session state is left untouched.
pub async fn upload_document(
    service: &Arc<dyn StudyService>,
    state: &Arc<Mutex<SessionState>>,
    filename: &str,
    bytes: Vec<u8>,
) -> Result<UploadReceipt, SessionError> {
    if filename.trim().is_empty() || bytes.is_empty() {
        return Err(SessionError::NoFileSelected);
    }

    {
        let mut state = state.lock().await;
        if state.upload_in_flight {
            // Two racing replacements are never allowed; the caller retries
            // once the current upload settles.
            return Err(SessionError::UploadBusy);
        }
        state.upload_in_flight = true;
    }

    info!(filename, size = bytes.len(), "uploading document");
    let outcome = service.upload(filename, bytes).await;

    let mut state = state.lock().await;
    state.upload_in_flight = false;
    match outcome {
        Ok(receipt) => {
            state.session.record_upload();
            state.cache.invalidate_all();
            state.query_display = QueryDisplay::NotAsked;
            info!(
                filename = %receipt.filename,
                version = state.session.version,
                "document replaced; cached artifacts invalidated"
            );
            Ok(receipt)
        }
        Err(e) => {
            warn!(filename, error = %e, "upload failed; previous document left untouched");
            Err(SessionError::Port(e))
        }
    }
}
