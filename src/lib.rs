//! Vidask - Ask questions about a video
//!
//! A CLI client that turns a pasted video URL into a question-answering session.
//!
//! # Overview
//!
//! Vidask:
//! - Extracts the video reference from a URL
//! - Fetches the video's transcript from a transcript service
//! - Submits the transcript to an ingestion service that builds a searchable index
//! - Relays questions to a question-answering service and shows the answers
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `video` - Video reference extraction
//! - `transcript` - Transcript model and export formats
//! - `collaborator` - HTTP clients for the transcript, ingest, and ask services
//! - `session` - Session state observed by the presentation layer
//! - `orchestrator` - The analyze/ask state machine
//!
//! # Example
//!
//! ```rust,no_run
//! use vidask::collaborator::Collaborators;
//! use vidask::config::Settings;
//! use vidask::orchestrator::{AskOutcome, SessionOrchestrator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let collaborators = Collaborators::from_settings(&settings)?;
//!     let orchestrator = SessionOrchestrator::new(collaborators, settings.ingest.payload);
//!
//!     orchestrator.analyze("https://www.youtube.com/watch?v=dQw4w9WgXcQ").await;
//!     if let AskOutcome::Answered(answer) = orchestrator.ask_question("What is this about?").await {
//!         println!("{}", answer);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod collaborator;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod session;
pub mod transcript;
pub mod video;

pub use error::{Result, VidaskError};
