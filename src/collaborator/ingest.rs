//! HTTP client for the ingestion collaborator.

use super::Ingestor;
use crate::error::IngestError;
use crate::transcript::Transcript;
use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;

/// Body submitted for ingestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IngestPayload {
    /// `{"transcript": [...]}`, the already-fetched segments.
    Transcript { transcript: Transcript },
    /// `{"url": ...}`, leaving extraction to the collaborator.
    Url { url: String },
}

impl IngestPayload {
    fn describe(&self) -> String {
        match self {
            IngestPayload::Transcript { transcript } => format!("{} segments", transcript.len()),
            IngestPayload::Url { url } => format!("url {}", url),
        }
    }
}

/// Submits transcripts with `POST`; any 2xx counts as success.
pub struct HttpIngestClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpIngestClient {
    pub fn new(http: reqwest::Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }
}

#[async_trait]
impl Ingestor for HttpIngestClient {
    #[instrument(skip(self, payload), fields(endpoint = %self.endpoint))]
    async fn ingest(&self, payload: &IngestPayload) -> Result<(), IngestError> {
        debug!("Submitting {} for ingestion", payload.describe());

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(payload)
            .send()
            .await
            .map_err(|e| IngestError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(IngestError::RequestFailed(format!(
                "collaborator returned {}",
                status
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::TranscriptSegment;
    use serde_json::json;

    #[test]
    fn test_transcript_payload_shape() {
        let payload = IngestPayload::Transcript {
            transcript: Transcript::new(vec![TranscriptSegment::new("a", "00:00", "l0")]),
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "transcript": [{ "text": "a", "start_time": "00:00", "link": "l0" }] })
        );
    }

    #[test]
    fn test_url_payload_shape() {
        let payload = IngestPayload::Url {
            url: "https://youtu.be/dQw4w9WgXcQ".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "url": "https://youtu.be/dQw4w9WgXcQ" })
        );
    }
}
