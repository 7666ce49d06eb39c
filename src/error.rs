//! Error types for Vidask.

use thiserror::Error;

/// Library-level error type for Vidask operations.
#[derive(Error, Debug)]
pub enum VidaskError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Result type alias for Vidask operations.
pub type Result<T> = std::result::Result<T, VidaskError>;

/// Failure fetching a transcript from the transcript collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    /// Non-success status, network failure, or unreadable body.
    #[error("Transcript request failed: {0}")]
    RequestFailed(String),

    /// The collaborator answered but could not produce a transcript.
    #[error("{0}")]
    DomainError(String),

    /// The transcript field was not an ordered list of segments.
    #[error("Transcript format is invalid: {0}")]
    InvalidFormat(String),
}

/// Failure submitting a transcript to the ingestion collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    #[error("Ingest request failed: {0}")]
    RequestFailed(String),
}

/// Failure asking the question-answering collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AskError {
    #[error("Question is empty")]
    EmptyQuestion,

    #[error("Ask request failed: {0}")]
    RequestFailed(String),
}
