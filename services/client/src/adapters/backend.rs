//! services/client/src/adapters/backend.rs
//!
//! This module contains the adapter for the remote document-indexing and
//! answer-generation service. It implements the `StudyService` port from the
//! `core` crate over the service's HTTP/JSON contract.

use async_trait::async_trait;
use edufy_core::domain::{
    DocumentInfo, Flashcard, QueryAnswer, QueryMetadata, SourcePassage, StatusSnapshot,
    UploadReceipt,
};
use edufy_core::ports::{PortError, PortResult, StudyService};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

//=========================================================================================
// Wire Format (private to this adapter)
//=========================================================================================

#[derive(Deserialize)]
struct StatusResponse {
    #[serde(default)]
    database_ready: bool,
    #[serde(default)]
    documents: Vec<DocumentEntry>,
}

#[derive(Deserialize)]
struct DocumentEntry {
    name: String,
    #[serde(default)]
    size: u64,
}

#[derive(Deserialize)]
struct UploadResponse {
    message: Option<String>,
    filename: Option<String>,
    file_size: Option<u64>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    ai_response: String,
    #[serde(default)]
    answers: Vec<SourcePassage>,
    #[serde(default)]
    query_type: String,
    #[serde(default)]
    k_used: u32,
    #[serde(default)]
    total_sections: u32,
    error: Option<String>,
}

#[derive(Deserialize)]
struct SampleQuestionsResponse {
    #[serde(default)]
    questions: Vec<String>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct FlashcardsResponse {
    #[serde(default)]
    flashcards: Vec<Flashcard>,
    error: Option<String>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements the `StudyService` port against the backing
/// service's HTTP endpoints.
#[derive(Clone)]
pub struct HttpStudyService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStudyService {
    /// Creates a new `HttpStudyService` with a bounded request timeout.
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> PortResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetches `path` and deserializes the JSON body, applying the shared
    /// error mapping: no response at all is a transport failure, an HTTP 5xx
    /// is a server failure, and a malformed body is unexpected.
    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> PortResult<T> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(transport_error)?;
        decode_json(path, response).await
    }
}

/// Maps a reqwest send error. Anything that produced no usable response
/// (connection refused, timeout) is a connectivity failure.
fn transport_error(e: reqwest::Error) -> PortError {
    PortError::Transport(e.to_string())
}

async fn decode_json<T: serde::de::DeserializeOwned>(
    path: &str,
    response: reqwest::Response,
) -> PortResult<T> {
    let status = response.status();
    if status.is_server_error() {
        return Err(PortError::Server(
            "Server error. Please try again later.".to_string(),
        ));
    }
    debug!(%path, status = %status, "response received");
    response
        .json::<T>()
        .await
        .map_err(|e| PortError::Unexpected(format!("Malformed response from {}: {}", path, e)))
}

/// A well-formed `{error}` payload takes precedence over whatever else the
/// body carries.
fn reject_reported_error(error: Option<String>) -> PortResult<()> {
    match error {
        Some(message) => Err(PortError::Server(message)),
        None => Ok(()),
    }
}

//=========================================================================================
// `StudyService` Trait Implementation
//=========================================================================================

#[async_trait]
impl StudyService for HttpStudyService {
    async fn health(&self) -> PortResult<()> {
        let response = self
            .client
            .get(self.url("/"))
            .send()
            .await
            .map_err(transport_error)?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(PortError::Server(format!(
                "Health check returned HTTP {}",
                response.status()
            )))
        }
    }

    async fn status(&self) -> PortResult<StatusSnapshot> {
        let body: StatusResponse = self.get_json("/status").await?;
        Ok(StatusSnapshot {
            database_ready: body.database_ready,
            documents: body
                .documents
                .into_iter()
                .map(|d| DocumentInfo {
                    name: d.name,
                    size: d.size,
                })
                .collect(),
        })
    }

    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> PortResult<UploadReceipt> {
        let file_size = bytes.len() as u64;
        let part = reqwest::multipart::Part::bytes(bytes).file_name(filename.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .client
            .post(self.url("/upload"))
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;
        let body: UploadResponse = decode_json("/upload", response).await?;
        reject_reported_error(body.error)?;

        Ok(UploadReceipt {
            message: body
                .message
                .unwrap_or_else(|| format!("{} uploaded successfully!", filename)),
            filename: body.filename.unwrap_or_else(|| filename.to_string()),
            file_size: body.file_size.unwrap_or(file_size),
        })
    }

    async fn query(&self, question: &str) -> PortResult<QueryAnswer> {
        let response = self
            .client
            .get(self.url("/query"))
            .query(&[("question", question)])
            .send()
            .await
            .map_err(transport_error)?;
        let body: QueryResponse = decode_json("/query", response).await?;
        reject_reported_error(body.error)?;

        Ok(QueryAnswer {
            ai_response: body.ai_response,
            answers: body.answers,
            metadata: QueryMetadata {
                query_type: body.query_type,
                k_used: body.k_used,
                total_sections: body.total_sections,
            },
        })
    }

    async fn sample_questions(&self) -> PortResult<Vec<String>> {
        let body: SampleQuestionsResponse = self.get_json("/sample-questions").await?;
        reject_reported_error(body.error)?;
        Ok(body.questions)
    }

    async fn flashcards(&self) -> PortResult<Vec<Flashcard>> {
        let body: FlashcardsResponse = self.get_json("/flashcards").await?;
        reject_reported_error(body.error)?;
        Ok(body.flashcards)
    }
}
