//! Terminal rendering of session state.

use super::Output;
use crate::collaborator::Collaborators;
use crate::config::Settings;
use crate::orchestrator::{AnalyzeOutcome, AskOutcome, SessionOrchestrator};
use crate::session::{IngestStatus, Session};
use console::style;

/// Build an orchestrator backed by the configured HTTP collaborators.
pub(crate) fn build_orchestrator(settings: &Settings) -> crate::Result<SessionOrchestrator> {
    let collaborators = Collaborators::from_settings(settings)?;
    Ok(SessionOrchestrator::new(collaborators, settings.ingest.payload))
}

/// Run an analysis while a spinner follows the session's progress.
pub(crate) async fn analyze_with_progress(
    orchestrator: &SessionOrchestrator,
    url: &str,
) -> AnalyzeOutcome {
    let spinner = Output::spinner("Reading URL...");
    let mut updates = orchestrator.subscribe();

    let analysis = orchestrator.analyze(url);
    tokio::pin!(analysis);

    let outcome = loop {
        tokio::select! {
            outcome = &mut analysis => break outcome,
            Ok(()) = updates.changed() => {
                let message = progress_message(&updates.borrow_and_update());
                spinner.set_message(message);
            }
        }
    };

    spinner.finish_and_clear();
    outcome
}

fn progress_message(session: &Session) -> String {
    if !session.transcript.is_empty() {
        format!("Indexing {} segments...", session.transcript.len())
    } else if let Some(video) = &session.video_reference {
        format!("Fetching transcript for {}...", video)
    } else {
        "Reading URL...".to_string()
    }
}

/// Print the session after an analysis.
pub(crate) fn print_analysis(session: &Session, show_transcript: bool) {
    if let Some(video) = &session.video_reference {
        Output::header(&format!("Video {}", video));
        Output::kv("Player", &video.embed_url());
    }

    if show_transcript && !session.transcript.is_empty() {
        println!();
        Output::transcript(&session.transcript);
        println!();
    }

    if let Some(error) = &session.error {
        Output::error(error);
    }

    match session.ingest {
        IngestStatus::Indexed => Output::success(&format!(
            "Transcript ready ({} segments). Ask away.",
            session.transcript.len()
        )),
        IngestStatus::Failed => Output::info("Use ':retry' in a session to retry ingestion."),
        IngestStatus::NotStarted => {}
    }
}

/// Ask a question with a spinner and print whatever the session shows.
pub(crate) async fn ask_and_print(orchestrator: &SessionOrchestrator, question: &str) -> AskOutcome {
    let spinner = Output::spinner("Thinking...");
    let outcome = orchestrator.ask_question(question).await;
    spinner.finish_and_clear();

    match &outcome {
        AskOutcome::Answered(_) | AskOutcome::Failed => {
            if let Some(text) = orchestrator.snapshot().answer_display() {
                Output::answer(text);
            }
        }
        AskOutcome::Blocked(reason) => Output::warning(reason.guidance()),
        AskOutcome::Superseded => Output::warning("The session moved on before the answer arrived."),
    }

    outcome
}

/// Print a one-screen status summary.
pub(crate) fn print_status(session: &Session) {
    Output::header("Session");
    Output::kv("Phase", &session.phase.to_string());
    Output::kv("URL", if session.url.is_empty() { "-" } else { session.url.as_str() });
    Output::kv(
        "Video",
        &session
            .video_reference
            .as_ref()
            .map(|v| v.to_string())
            .unwrap_or_else(|| "-".to_string()),
    );
    Output::kv("Segments", &session.transcript.len().to_string());
    Output::kv(
        "Questions",
        if session.questions_enabled() {
            "enabled"
        } else {
            "disabled"
        },
    );
    if let Some(error) = &session.error {
        Output::kv("Error", &style(error).red().to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::{Transcript, TranscriptSegment};
    use crate::video::VideoReference;

    #[test]
    fn test_progress_message_follows_stages() {
        let mut session = Session::new();
        assert_eq!(progress_message(&session), "Reading URL...");

        session.video_reference = VideoReference::extract("https://youtu.be/dQw4w9WgXcQ");
        assert_eq!(progress_message(&session), "Fetching transcript for dQw4w9WgXcQ...");

        session.transcript = Transcript::new(vec![TranscriptSegment::new("a", "00:00", "l")]);
        assert_eq!(progress_message(&session), "Indexing 1 segments...");
    }
}
