//! End-to-end session scenarios against a mock backend.

use serde_json::json;
use vidask::collaborator::Collaborators;
use vidask::config::{IngestPolicy, Settings};
use vidask::orchestrator::{AnalyzeOutcome, AskOutcome, IngestOutcome, SessionOrchestrator};
use vidask::session::{
    Answer, AskBlocked, IngestStatus, SessionPhase, ASK_FAILED_MESSAGE, INGEST_FAILED_MESSAGE,
    INVALID_URL_MESSAGE, NO_ANSWER_FALLBACK, TRANSCRIPT_FAILED_MESSAGE,
};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const VIDEO_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

fn orchestrator_for(server: &MockServer) -> SessionOrchestrator {
    let mut settings = Settings::default();
    settings.collaborators.base_url = server.uri();
    settings.collaborators.timeout_seconds = 5;

    let collaborators = Collaborators::from_settings(&settings).unwrap();
    SessionOrchestrator::new(collaborators, IngestPolicy::Transcript)
}

async fn mount_transcript(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/transcript"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "transcript": [{ "text": "hello", "start_time": "0:00", "link": "https://youtu.be/x?t=0" }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn analysis_then_question() {
    let server = MockServer::start().await;
    mount_transcript(&server).await;

    Mock::given(method("POST"))
        .and(path("/ingest"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "answer": { "result": "42" } })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let orchestrator = orchestrator_for(&server);

    let outcome = orchestrator.analyze(VIDEO_URL).await;
    assert_eq!(
        outcome,
        AnalyzeOutcome::Ready {
            segments: 1,
            questions_enabled: true
        }
    );

    let session = orchestrator.snapshot();
    assert_eq!(session.phase, SessionPhase::Ready);
    assert_eq!(session.transcript.len(), 1);
    assert_eq!(session.transcript.segments()[0].text, "hello");
    assert!(session.questions_enabled());
    assert!(!session.loading);

    let answer = orchestrator.ask_question("What is the answer?").await;
    assert_eq!(answer, AskOutcome::Answered(Answer::new("42")));
    assert_eq!(orchestrator.snapshot().answer_display(), Some("42"));
}

#[tokio::test]
async fn invalid_url_never_reaches_backend() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let orchestrator = orchestrator_for(&server);

    assert_eq!(orchestrator.analyze("not a url").await, AnalyzeOutcome::InvalidUrl);
    let session = orchestrator.snapshot();
    assert_eq!(session.phase, SessionPhase::Errored);
    assert_eq!(session.error.as_deref(), Some(INVALID_URL_MESSAGE));
    assert!(!session.loading);
}

#[tokio::test]
async fn ingest_failure_blocks_questions_until_retry() {
    let server = MockServer::start().await;
    mount_transcript(&server).await;

    Mock::given(method("POST"))
        .and(path("/ingest"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/ingest"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let orchestrator = orchestrator_for(&server);

    let outcome = orchestrator.analyze(VIDEO_URL).await;
    assert_eq!(
        outcome,
        AnalyzeOutcome::Ready {
            segments: 1,
            questions_enabled: false
        }
    );

    let session = orchestrator.snapshot();
    assert_eq!(session.transcript.len(), 1);
    assert_eq!(session.ingest, IngestStatus::Failed);
    assert_eq!(session.error.as_deref(), Some(INGEST_FAILED_MESSAGE));
    assert!(!session.loading);

    assert_eq!(
        orchestrator.ask_question("Anything?").await,
        AskOutcome::Blocked(AskBlocked::IngestUnavailable)
    );

    assert_eq!(orchestrator.retry_ingest().await, IngestOutcome::Indexed);
    assert!(orchestrator.snapshot().questions_enabled());

    assert_eq!(
        orchestrator.ask_question("Anything?").await,
        AskOutcome::Answered(Answer::new(NO_ANSWER_FALLBACK))
    );
}

#[tokio::test]
async fn ask_failure_keeps_session_usable() {
    let server = MockServer::start().await;
    mount_transcript(&server).await;

    Mock::given(method("POST"))
        .and(path("/ingest"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/ask"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let orchestrator = orchestrator_for(&server);
    orchestrator.analyze(VIDEO_URL).await;

    assert_eq!(orchestrator.ask_question("Why?").await, AskOutcome::Failed);

    let session = orchestrator.snapshot();
    assert_eq!(session.answer_display(), Some(ASK_FAILED_MESSAGE));
    assert_eq!(session.phase, SessionPhase::Ready);
    assert_eq!(session.transcript.len(), 1);
    assert!(session.questions_enabled());
}

#[tokio::test]
async fn blank_transcript_error_uses_generic_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transcript"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "transcript": { "error": "" } })),
        )
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/ingest"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let orchestrator = orchestrator_for(&server);

    assert_eq!(orchestrator.analyze(VIDEO_URL).await, AnalyzeOutcome::TranscriptFailed);
    let session = orchestrator.snapshot();
    assert_eq!(session.phase, SessionPhase::Errored);
    assert_eq!(session.error.as_deref(), Some(TRANSCRIPT_FAILED_MESSAGE));
    assert!(session.transcript.is_empty());
}
