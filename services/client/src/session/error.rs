//! services/client/src/session/error.rs
//!
//! Errors for user-initiated session operations. Validation and
//! precondition failures are rejected synchronously, before any request is
//! sent, and never reach the artifact cache.

use edufy_core::ports::PortError;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Local validation: the question was empty after trimming.
    #[error("Please enter a question!")]
    EmptyQuestion,

    /// Local validation: no file was selected for upload.
    #[error("Please select a file first!")]
    NoFileSelected,

    /// Precondition not met: the operation needs a ready document session.
    #[error("No documents uploaded yet. Please upload a document first.")]
    NoDocuments,

    /// An upload is already in flight; concurrent replacements are rejected
    /// rather than raced.
    #[error("An upload is already in progress. Please wait for it to finish.")]
    UploadBusy,

    /// A transport or server failure propagated from the service port.
    #[error(transparent)]
    Port(#[from] PortError),
}
