//! Clients for the remote collaborators a session depends on.
//!
//! Each collaborator sits behind a trait so the orchestrator can be driven by
//! the HTTP clients in production and by in-memory fakes in tests.

mod ask;
mod ingest;
mod transcript;

pub use ask::{parse_answer_response, HttpAskClient};
pub use ingest::{HttpIngestClient, IngestPayload};
pub use transcript::{parse_transcript_response, HttpTranscriptClient};

use crate::config::Settings;
use crate::error::{AskError, IngestError, Result, TranscriptError};
use crate::session::Answer;
use crate::transcript::Transcript;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Source of transcripts for a video URL.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the ordered transcript for the given raw URL.
    async fn fetch_transcript(&self, url: &str) -> std::result::Result<Transcript, TranscriptError>;
}

/// Builds a searchable index from a transcript.
#[async_trait]
pub trait Ingestor: Send + Sync {
    async fn ingest(&self, payload: &IngestPayload) -> std::result::Result<(), IngestError>;
}

/// Answers questions over the most recently ingested transcript.
#[async_trait]
pub trait Answerer: Send + Sync {
    async fn ask(&self, question: &str) -> std::result::Result<Answer, AskError>;
}

/// The three collaborators of a session.
#[derive(Clone)]
pub struct Collaborators {
    pub transcripts: Arc<dyn TranscriptSource>,
    pub ingestor: Arc<dyn Ingestor>,
    pub answerer: Arc<dyn Answerer>,
}

impl Collaborators {
    /// Build HTTP clients for all collaborators from settings.
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let http = create_http_client(settings.collaborators.timeout())?;
        let endpoints = settings.collaborators.endpoints()?;

        debug!(
            "Collaborator endpoints: transcript={}, ingest={}, ask={}",
            endpoints.transcript, endpoints.ingest, endpoints.ask
        );

        Ok(Self {
            transcripts: Arc::new(HttpTranscriptClient::new(http.clone(), endpoints.transcript)),
            ingestor: Arc::new(HttpIngestClient::new(http.clone(), endpoints.ingest)),
            answerer: Arc::new(HttpAskClient::new(http, endpoints.ask)),
        })
    }
}

/// Create the shared HTTP client. `None` means no request timeout.
pub fn create_http_client(timeout: Option<Duration>) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder().user_agent(concat!(
        env!("CARGO_PKG_NAME"),
        "/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Probe a collaborator's health endpoint. Returns the HTTP status on any response.
pub async fn check_health(http: &reqwest::Client, url: url::Url) -> Result<reqwest::StatusCode> {
    let response = http.get(url).send().await?;
    Ok(response.status())
}
