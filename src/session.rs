//! Session state for one analyze/ask interaction context.
//!
//! The session is owned by the orchestrator and published to observers as a
//! whole value; fields are replaced wholesale on each transition.

use crate::transcript::Transcript;
use crate::video::VideoReference;
use serde::Serialize;
use uuid::Uuid;

/// Shown when the input does not contain a video reference.
pub const INVALID_URL_MESSAGE: &str = "Invalid YouTube URL";

/// Shown when the transcript could not be fetched or was malformed.
pub const TRANSCRIPT_FAILED_MESSAGE: &str = "Failed to fetch transcript.";

/// Shown next to the transcript when ingestion failed.
pub const INGEST_FAILED_MESSAGE: &str =
    "Ingest failed. Questions are unavailable until ingestion succeeds.";

/// Shown in the answer area when the ask request failed.
pub const ASK_FAILED_MESSAGE: &str = "Error fetching answer.";

/// Substituted when the collaborator's payload carries no answer.
pub const NO_ANSWER_FALLBACK: &str = "No answer found.";

/// An answer produced by the question-answering collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Answer(String);

impl Answer {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The fallback used when the collaborator returned no result.
    pub fn not_found() -> Self {
        Self(NO_ANSWER_FALLBACK.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where the session is in the analyze/ask cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    #[default]
    Idle,
    Analyzing,
    Ready,
    AwaitingAnswer,
    Errored,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionPhase::Idle => write!(f, "idle"),
            SessionPhase::Analyzing => write!(f, "analyzing"),
            SessionPhase::Ready => write!(f, "ready"),
            SessionPhase::AwaitingAnswer => write!(f, "awaiting answer"),
            SessionPhase::Errored => write!(f, "errored"),
        }
    }
}

/// Outcome of the most recent ingestion for the current video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IngestStatus {
    #[default]
    NotStarted,
    Indexed,
    Failed,
}

/// Why an ask request was not sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskBlocked {
    /// The question was empty or whitespace.
    EmptyQuestion,
    /// No video has been analyzed successfully.
    NoVideo,
    /// An analysis is running.
    Analyzing,
    /// The transcript is available but ingestion has not succeeded.
    IngestUnavailable,
    /// Another question is in flight.
    Busy,
}

impl AskBlocked {
    /// Guidance shown to the user.
    pub fn guidance(&self) -> &'static str {
        match self {
            AskBlocked::EmptyQuestion => "Type a question first.",
            AskBlocked::NoVideo => "Analyze a video before asking questions.",
            AskBlocked::Analyzing => "Wait for the analysis to finish.",
            AskBlocked::IngestUnavailable => {
                "Questions are unavailable until ingestion succeeds. Retry ingestion first."
            }
            AskBlocked::Busy => "A question is already being answered.",
        }
    }
}

/// The orchestrator's in-memory record of one interaction context.
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    /// Identifier used in log spans.
    pub id: Uuid,
    /// Raw URL as entered.
    pub url: String,
    pub video_reference: Option<VideoReference>,
    pub transcript: Transcript,
    pub question: String,
    pub answer: Option<Answer>,
    /// Answer-area message for a failed ask; exclusive with `answer`.
    pub ask_error: Option<String>,
    pub loading: bool,
    pub error: Option<String>,
    pub phase: SessionPhase,
    pub ingest: IngestStatus,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            url: String::new(),
            video_reference: None,
            transcript: Transcript::default(),
            question: String::new(),
            answer: None,
            ask_error: None,
            loading: false,
            error: None,
            phase: SessionPhase::Idle,
            ingest: IngestStatus::NotStarted,
        }
    }

    /// Whether a question may be sent right now.
    pub fn questions_enabled(&self) -> bool {
        self.phase == SessionPhase::Ready && self.ingest == IngestStatus::Indexed
    }

    /// Check whether a question may be sent, and why not.
    pub fn ask_readiness(&self) -> std::result::Result<(), AskBlocked> {
        match self.phase {
            SessionPhase::Ready if self.ingest == IngestStatus::Indexed => Ok(()),
            SessionPhase::Ready => Err(AskBlocked::IngestUnavailable),
            SessionPhase::AwaitingAnswer => Err(AskBlocked::Busy),
            SessionPhase::Analyzing => Err(AskBlocked::Analyzing),
            SessionPhase::Idle | SessionPhase::Errored => Err(AskBlocked::NoVideo),
        }
    }

    /// The text to show in the answer area, if any.
    pub fn answer_display(&self) -> Option<&str> {
        self.ask_error
            .as_deref()
            .or_else(|| self.answer.as_ref().map(|a| a.as_str()))
    }

    /// Enter `Analyzing`, dropping everything left over from the last cycle.
    pub(crate) fn begin_analysis(&mut self, url: &str) {
        self.url = url.to_string();
        self.video_reference = None;
        self.transcript = Transcript::default();
        self.question.clear();
        self.answer = None;
        self.ask_error = None;
        self.error = None;
        self.ingest = IngestStatus::NotStarted;
        self.loading = true;
        self.phase = SessionPhase::Analyzing;
    }

    /// Re-enter `Analyzing` to resubmit the current transcript.
    pub(crate) fn begin_ingest_retry(&mut self) {
        self.error = None;
        self.ingest = IngestStatus::NotStarted;
        self.loading = true;
        self.phase = SessionPhase::Analyzing;
    }

    pub(crate) fn fail(&mut self, message: &str) {
        self.error = Some(message.to_string());
        self.phase = SessionPhase::Errored;
    }

    pub(crate) fn finish_ingest(&mut self, indexed: bool) {
        if indexed {
            self.ingest = IngestStatus::Indexed;
            self.error = None;
        } else {
            self.ingest = IngestStatus::Failed;
            self.error = Some(INGEST_FAILED_MESSAGE.to_string());
        }
        self.phase = SessionPhase::Ready;
    }

    /// Settle the session when an analysis stops, finished or not.
    ///
    /// Dropped before the transcript arrived: back to `Idle` with no video.
    /// Dropped during ingestion: the transcript stays and ingestion counts as
    /// failed, so it can be retried.
    pub(crate) fn abandon_analysis(&mut self, ingesting: bool) {
        self.loading = false;
        if self.phase != SessionPhase::Analyzing {
            return;
        }
        if ingesting {
            self.finish_ingest(false);
        } else {
            self.video_reference = None;
            self.transcript = Transcript::default();
            self.phase = SessionPhase::Idle;
        }
    }

    pub(crate) fn begin_ask(&mut self, question: &str) {
        self.question = question.to_string();
        self.answer = None;
        self.ask_error = None;
        self.phase = SessionPhase::AwaitingAnswer;
    }

    pub(crate) fn finish_ask(&mut self, answer: Option<Answer>) {
        match answer {
            Some(answer) => {
                self.answer = Some(answer);
                self.ask_error = None;
            }
            None => {
                self.answer = None;
                self.ask_error = Some(ASK_FAILED_MESSAGE.to_string());
            }
        }
        self.phase = SessionPhase::Ready;
    }
}
