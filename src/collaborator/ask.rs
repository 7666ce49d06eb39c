//! HTTP client for the question-answering collaborator.

use super::Answerer;
use crate::error::AskError;
use crate::session::Answer;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

#[derive(Serialize)]
struct AskRequest<'a> {
    question: &'a str,
}

/// Asks questions with `POST {"question": ...}`.
pub struct HttpAskClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl HttpAskClient {
    pub fn new(http: reqwest::Client, endpoint: Url) -> Self {
        Self { http, endpoint }
    }
}

#[async_trait]
impl Answerer for HttpAskClient {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn ask(&self, question: &str) -> Result<Answer, AskError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AskError::EmptyQuestion);
        }

        let response = self
            .http
            .post(self.endpoint.clone())
            .json(&AskRequest { question })
            .send()
            .await
            .map_err(|e| AskError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AskError::RequestFailed(format!(
                "collaborator returned {}",
                status
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| AskError::RequestFailed(format!("unreadable body: {}", e)))?;

        let answer = parse_answer_response(&body);
        debug!("Received answer ({} chars)", answer.as_str().len());
        Ok(answer)
    }
}

/// Extract the answer from `{"answer": "..."}` or `{"answer": {"result": "..."}}`.
///
/// A missing or empty answer yields the "not found" fallback.
pub fn parse_answer_response(body: &Value) -> Answer {
    let text = match body.get("answer") {
        Some(Value::String(text)) => Some(text.as_str()),
        Some(Value::Object(fields)) => fields.get("result").and_then(Value::as_str),
        _ => None,
    };

    match text {
        Some(text) if !text.is_empty() => Answer::new(text),
        _ => Answer::not_found(),
    }
}
