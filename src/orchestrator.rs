//! Session orchestrator for Vidask.
//!
//! Drives one session through its phases:
//!
//! ```text
//! Idle/Ready/Errored --analyze--> Analyzing --> Ready | Errored
//! Ready --ask--> AwaitingAnswer --> Ready
//! ```
//!
//! Transcript fetch, ingestion, and asking run strictly in sequence. Every
//! stage failure is converted into session state; nothing escapes to the
//! caller as an error.
//!
//! A new analysis supersedes one still in flight: each analysis takes a
//! generation number, and writes from a stale generation are dropped.

use crate::collaborator::{Answerer, Collaborators, IngestPayload, Ingestor, TranscriptSource};
use crate::config::IngestPolicy;
use crate::error::TranscriptError;
use crate::session::{
    Answer, AskBlocked, IngestStatus, Session, SessionPhase, INVALID_URL_MESSAGE,
    TRANSCRIPT_FAILED_MESSAGE,
};
use crate::transcript::Transcript;
use crate::video::VideoReference;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

/// Result of an `analyze` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzeOutcome {
    /// The input held no video reference. No network call was made.
    InvalidUrl,
    /// The transcript could not be obtained; the message is in `Session::error`.
    TranscriptFailed,
    /// The transcript is available. Questions are enabled only if ingestion succeeded.
    Ready { segments: usize, questions_enabled: bool },
    /// A newer analysis started before this one finished.
    Superseded,
}

/// Result of a `retry_ingest` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestOutcome {
    Indexed,
    Failed,
    /// There is no transcript to ingest, or the session is busy.
    NotApplicable,
    Superseded,
}

/// Result of an `ask_question` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskOutcome {
    Answered(Answer),
    /// The request failed; the session shows the fixed failure message.
    Failed,
    /// The question was not sent.
    Blocked(AskBlocked),
    /// An analysis started while the question was in flight.
    Superseded,
}

/// The state machine composing transcript fetch, ingestion, and asking.
pub struct SessionOrchestrator {
    transcripts: Arc<dyn TranscriptSource>,
    ingestor: Arc<dyn Ingestor>,
    answerer: Arc<dyn Answerer>,
    ingest_policy: IngestPolicy,
    state: watch::Sender<Session>,
    generation: AtomicU64,
}

impl SessionOrchestrator {
    /// Create an orchestrator with a fresh idle session.
    pub fn new(collaborators: Collaborators, ingest_policy: IngestPolicy) -> Self {
        let (state, _) = watch::channel(Session::new());
        Self {
            transcripts: collaborators.transcripts,
            ingestor: collaborators.ingestor,
            answerer: collaborators.answerer,
            ingest_policy,
            state,
            generation: AtomicU64::new(0),
        }
    }

    fn session_id(&self) -> uuid::Uuid {
        self.state.borrow().id
    }

    /// A copy of the current session.
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Subscribe to session changes.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// Analyze a URL: parse the video reference, fetch the transcript, and ingest it.
    #[instrument(skip(self), fields(session = %self.session_id()))]
    pub async fn analyze(&self, url: &str) -> AnalyzeOutcome {
        let generation = self.begin(|session| session.begin_analysis(url));
        let mut loading = LoadingGuard {
            orchestrator: self,
            generation,
            ingesting: false,
        };

        let Some(video) = VideoReference::extract(url) else {
            info!("No video reference in input");
            self.update(generation, |session| session.fail(INVALID_URL_MESSAGE));
            return AnalyzeOutcome::InvalidUrl;
        };

        info!("Analyzing video {}", video);
        self.update(generation, |session| session.video_reference = Some(video));

        let fetched = self.transcripts.fetch_transcript(url).await;
        if !self.is_current(generation) {
            debug!("Analysis superseded during transcript fetch");
            return AnalyzeOutcome::Superseded;
        }

        let transcript = match fetched {
            Ok(transcript) => transcript,
            Err(e) => {
                let message = match &e {
                    TranscriptError::DomainError(message) => message.clone(),
                    TranscriptError::RequestFailed(_) | TranscriptError::InvalidFormat(_) => {
                        TRANSCRIPT_FAILED_MESSAGE.to_string()
                    }
                };
                warn!("Transcript unavailable: {}", e);
                self.update(generation, |session| session.fail(&message));
                return AnalyzeOutcome::TranscriptFailed;
            }
        };

        let segments = transcript.len();
        info!("Transcript fetched ({} segments)", segments);
        self.update(generation, |session| session.transcript = transcript.clone());
        loading.ingesting = true;

        match self.run_ingest(generation, url, transcript).await {
            IngestOutcome::Indexed => AnalyzeOutcome::Ready {
                segments,
                questions_enabled: true,
            },
            IngestOutcome::Failed => AnalyzeOutcome::Ready {
                segments,
                questions_enabled: false,
            },
            IngestOutcome::Superseded | IngestOutcome::NotApplicable => AnalyzeOutcome::Superseded,
        }
    }

    /// Resubmit the current transcript after a failed ingestion.
    #[instrument(skip(self), fields(session = %self.session_id()))]
    pub async fn retry_ingest(&self) -> IngestOutcome {
        let mut retry = None;
        self.state.send_if_modified(|session| {
            if session.phase != SessionPhase::Ready || session.ingest != IngestStatus::Failed {
                return false;
            }
            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            retry = Some((generation, session.url.clone(), session.transcript.clone()));
            session.begin_ingest_retry();
            true
        });

        let Some((generation, url, transcript)) = retry else {
            debug!("Nothing to retry");
            return IngestOutcome::NotApplicable;
        };
        let _loading = LoadingGuard {
            orchestrator: self,
            generation,
            ingesting: true,
        };

        info!("Retrying ingestion");
        self.run_ingest(generation, &url, transcript).await
    }

    /// Ask a question about the ingested transcript.
    #[instrument(skip(self), fields(session = %self.session_id()))]
    pub async fn ask_question(&self, question: &str) -> AskOutcome {
        let question = question.trim();
        if question.is_empty() {
            return AskOutcome::Blocked(AskBlocked::EmptyQuestion);
        }

        let mut admitted = Err(AskBlocked::NoVideo);
        self.state.send_if_modified(|session| {
            admitted = session
                .ask_readiness()
                .map(|()| self.generation.load(Ordering::SeqCst));
            if admitted.is_err() {
                return false;
            }
            session.begin_ask(question);
            true
        });
        let generation = match admitted {
            Ok(generation) => generation,
            Err(reason) => {
                debug!("Question not sent: {:?}", reason);
                return AskOutcome::Blocked(reason);
            }
        };

        let _in_flight = AskGuard {
            orchestrator: self,
            generation,
        };

        let result = self.answerer.ask(question).await;
        if !self.is_current(generation) {
            debug!("Answer discarded, session moved on");
            return AskOutcome::Superseded;
        }

        match result {
            Ok(answer) => {
                info!("Answer received");
                self.update(generation, |session| session.finish_ask(Some(answer.clone())));
                AskOutcome::Answered(answer)
            }
            Err(e) => {
                warn!("Ask failed: {}", e);
                self.update(generation, |session| session.finish_ask(None));
                AskOutcome::Failed
            }
        }
    }

    /// Submit the transcript (or URL, per policy) and record the outcome.
    async fn run_ingest(&self, generation: u64, url: &str, transcript: Transcript) -> IngestOutcome {
        let payload = match self.ingest_policy {
            IngestPolicy::Transcript => IngestPayload::Transcript { transcript },
            IngestPolicy::Url => IngestPayload::Url {
                url: url.to_string(),
            },
        };

        let result = self.ingestor.ingest(&payload).await;
        if !self.is_current(generation) {
            debug!("Analysis superseded during ingestion");
            return IngestOutcome::Superseded;
        }

        let indexed = match result {
            Ok(()) => {
                info!("Transcript ingested, questions enabled");
                true
            }
            Err(e) => {
                warn!("Ingestion failed, questions disabled: {}", e);
                false
            }
        };
        self.update(generation, |session| session.finish_ingest(indexed));

        if indexed {
            IngestOutcome::Indexed
        } else {
            IngestOutcome::Failed
        }
    }

    /// Start a new generation and apply its first transition atomically.
    fn begin(&self, transition: impl FnOnce(&mut Session)) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|session| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            transition(session);
        });
        generation
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Apply a transition only if `generation` is still current.
    fn update(&self, generation: u64, transition: impl FnOnce(&mut Session)) -> bool {
        self.state.send_if_modified(|session| {
            if !self.is_current(generation) {
                return false;
            }
            transition(session);
            true
        })
    }
}

/// Clears `loading` when an analysis ends, however it ends.
struct LoadingGuard<'a> {
    orchestrator: &'a SessionOrchestrator,
    generation: u64,
    /// Set once the transcript is in the session and ingestion has started.
    ingesting: bool,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let ingesting = self.ingesting;
        self.orchestrator
            .update(self.generation, |session| session.abandon_analysis(ingesting));
    }
}

/// Leaves `AwaitingAnswer` if an ask future is dropped before completing.
struct AskGuard<'a> {
    orchestrator: &'a SessionOrchestrator,
    generation: u64,
}

impl Drop for AskGuard<'_> {
    fn drop(&mut self) {
        self.orchestrator.state.send_if_modified(|session| {
            if !self.orchestrator.is_current(self.generation)
                || session.phase != SessionPhase::AwaitingAnswer
            {
                return false;
            }
            session.phase = SessionPhase::Ready;
            true
        });
    }
}
