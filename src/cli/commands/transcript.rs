//! Transcript command implementation.

use crate::cli::Output;
use crate::collaborator::{Collaborators, TranscriptSource};
use crate::config::Settings;
use crate::error::TranscriptError;
use crate::transcript::{format_transcript, OutputFormat};
use crate::video::VideoReference;
use anyhow::Result;

/// Run the transcript command: fetch and export, without ingestion.
pub async fn run_transcript(
    url: &str,
    output: Option<String>,
    format: &str,
    settings: Settings,
) -> Result<()> {
    let format: OutputFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let Some(video) = VideoReference::extract(url) else {
        Output::error("Invalid YouTube URL");
        anyhow::bail!("no video reference in {}", url);
    };

    let collaborators = Collaborators::from_settings(&settings)?;

    let spinner = Output::spinner(&format!("Fetching transcript for {}...", video));
    let result = collaborators.transcripts.fetch_transcript(url).await;
    spinner.finish_and_clear();

    let transcript = match result {
        Ok(transcript) => transcript,
        Err(TranscriptError::DomainError(message)) => {
            Output::error(&message);
            anyhow::bail!("transcript unavailable");
        }
        Err(e) => {
            Output::error(&format!("Failed to fetch transcript: {}", e));
            return Err(e.into());
        }
    };

    let formatted = format_transcript(&transcript, format);

    match output {
        Some(path) => {
            let path = Settings::expand_path(&path);
            std::fs::write(&path, formatted)?;
            Output::success(&format!(
                "Wrote {} segments to {}",
                transcript.len(),
                path.display()
            ));
        }
        None => print!("{}", formatted),
    }

    Ok(())
}
