//! HTTP client for the transcript collaborator.

use super::TranscriptSource;
use crate::error::TranscriptError;
use crate::transcript::{Transcript, TranscriptSegment};
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

#[derive(Serialize)]
struct TranscriptRequest<'a> {
    url: &'a str,
}

/// Requests transcripts with `POST {"url": ...}`.
pub struct HttpTranscriptClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpTranscriptClient {
    pub fn new(http: reqwest::Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }
}

#[async_trait]
impl TranscriptSource for HttpTranscriptClient {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch_transcript(&self, url: &str) -> Result<Transcript, TranscriptError> {
        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&TranscriptRequest { url })
            .send()
            .await
            .map_err(|e| TranscriptError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranscriptError::RequestFailed(format!(
                "collaborator returned {}",
                status
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TranscriptError::RequestFailed(format!("unreadable body: {}", e)))?;

        let transcript = parse_transcript_response(body)?;
        debug!("Received {} transcript segments", transcript.len());
        Ok(transcript)
    }
}

/// Validate a transcript response body.
///
/// Accepts `{"transcript": [segment, ...]}`; `{"transcript": {"error": msg}}`
/// with a non-blank `msg` is a domain error carrying `msg`; any other shape is
/// invalid. Segments are returned in the order received.
pub fn parse_transcript_response(body: Value) -> Result<Transcript, TranscriptError> {
    let Value::Object(mut root) = body else {
        return Err(TranscriptError::InvalidFormat(
            "response is not a JSON object".to_string(),
        ));
    };

    match root.remove("transcript") {
        Some(Value::Array(items)) => {
            let segments: Vec<TranscriptSegment> =
                serde_json::from_value(Value::Array(items)).map_err(|e| {
                    TranscriptError::InvalidFormat(format!("malformed segment: {}", e))
                })?;
            Ok(Transcript::new(segments))
        }
        Some(Value::Object(fields)) => match fields.get("error") {
            Some(Value::String(message)) if !message.trim().is_empty() => {
                Err(TranscriptError::DomainError(message.clone()))
            }
            _ => Err(TranscriptError::InvalidFormat(
                "transcript is an object without an error message".to_string(),
            )),
        },
        Some(other) => Err(TranscriptError::InvalidFormat(format!(
            "transcript is not a list: {}",
            other
        ))),
        None => Err(TranscriptError::InvalidFormat(
            "response has no transcript field".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_segments_in_order() {
        let body = json!({
            "transcript": [
                { "text": "second", "start_time": "0:05", "link": "https://youtu.be/x?t=5" },
                { "text": "first", "start_time": "0:00", "link": "https://youtu.be/x?t=0" },
                { "text": "second", "start_time": "0:05", "link": "https://youtu.be/x?t=5" }
            ]
        });

        let transcript = parse_transcript_response(body).unwrap();
        let texts: Vec<&str> = transcript.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["second", "first", "second"]);
    }

    #[test]
    fn test_parse_empty_list() {
        let transcript = parse_transcript_response(json!({ "transcript": [] })).unwrap();
        assert!(transcript.is_empty());
    }

    #[test]
    fn test_parse_domain_error() {
        let body = json!({ "transcript": { "error": "Subtitles are disabled for this video" } });
        assert_eq!(
            parse_transcript_response(body),
            Err(TranscriptError::DomainError(
                "Subtitles are disabled for this video".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_invalid_shapes() {
        let cases = [
            json!({ "transcript": "hello" }),
            json!({ "transcript": { "message": "nope" } }),
            json!({ "transcript": { "error": "" } }),
            json!({ "transcript": { "error": "   " } }),
            json!({ "transcript": { "error": null } }),
            json!({ "transcript": [{ "text": "missing fields" }] }),
            json!({ "transcript": [1, 2, 3] }),
            json!({ "error": "Failed to process request" }),
            json!([]),
        ];

        for body in cases {
            assert!(
                matches!(
                    parse_transcript_response(body.clone()),
                    Err(TranscriptError::InvalidFormat(_))
                ),
                "expected invalid format for {}",
                body
            );
        }
    }
}
