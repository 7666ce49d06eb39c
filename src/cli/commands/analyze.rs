//! Analyze command implementation.

use crate::cli::view::{analyze_with_progress, ask_and_print, build_orchestrator, print_analysis};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::{AnalyzeOutcome, AskOutcome};
use anyhow::Result;

/// Run the analyze command.
pub async fn run_analyze(
    url: &str,
    questions: &[String],
    quiet: bool,
    settings: Settings,
) -> Result<()> {
    let orchestrator = build_orchestrator(&settings)?;

    Output::info(&format!("Analyzing: {}", url));
    let outcome = analyze_with_progress(&orchestrator, url).await;
    print_analysis(&orchestrator.snapshot(), !quiet);

    match outcome {
        AnalyzeOutcome::Ready {
            questions_enabled: true,
            ..
        } => {}
        AnalyzeOutcome::Ready {
            questions_enabled: false,
            ..
        } => {
            if !questions.is_empty() {
                anyhow::bail!("ingestion failed, {} question(s) not asked", questions.len());
            }
            return Ok(());
        }
        AnalyzeOutcome::InvalidUrl | AnalyzeOutcome::TranscriptFailed => {
            anyhow::bail!("analysis failed");
        }
        AnalyzeOutcome::Superseded => return Ok(()),
    }

    let mut failed = 0;
    for question in questions {
        println!("{} {}", console::style("Q:").green().bold(), question);
        if !matches!(ask_and_print(&orchestrator, question).await, AskOutcome::Answered(_)) {
            failed += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!("{} question(s) could not be answered", failed);
    }

    Ok(())
}
