//! Interactive question-answering session.

use crate::cli::view::{
    analyze_with_progress, ask_and_print, build_orchestrator, print_analysis, print_status,
};
use crate::cli::Output;
use crate::config::Settings;
use crate::orchestrator::{IngestOutcome, SessionOrchestrator};
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};

/// A line of user input.
#[derive(Debug, PartialEq)]
enum Input<'a> {
    Analyze(&'a str),
    Retry,
    Transcript,
    Status,
    Help,
    Exit,
    Question(&'a str),
    Unknown(&'a str),
    Empty,
}

fn parse_input(line: &str) -> Input<'_> {
    let line = line.trim();

    if line.is_empty() {
        return Input::Empty;
    }
    if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
        return Input::Exit;
    }

    let Some(command) = line.strip_prefix(':') else {
        return Input::Question(line);
    };

    let (name, argument) = match command.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, argument.trim()),
        None => (command, ""),
    };

    match name {
        "analyze" | "a" if !argument.is_empty() => Input::Analyze(argument),
        "retry" => Input::Retry,
        "transcript" | "t" => Input::Transcript,
        "status" | "s" => Input::Status,
        "help" | "h" => Input::Help,
        "exit" | "quit" | "q" => Input::Exit,
        _ => Input::Unknown(line),
    }
}

/// Run the interactive session command.
pub async fn run_session(url: Option<&str>, settings: Settings) -> Result<()> {
    let orchestrator = build_orchestrator(&settings)?;

    println!("\n{}", style("Vidask Session").bold().cyan());
    println!(
        "{}\n",
        style("Type a question, ':analyze <url>' to load a video, ':help' for commands, or 'exit' to quit.").dim()
    );

    if let Some(url) = url {
        analyze(&orchestrator, url).await;
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match parse_input(&line) {
            Input::Empty => continue,
            Input::Exit => {
                Output::info("Goodbye!");
                break;
            }
            Input::Analyze(url) => analyze(&orchestrator, url).await,
            Input::Retry => retry(&orchestrator).await,
            Input::Transcript => {
                let session = orchestrator.snapshot();
                if session.transcript.is_empty() {
                    Output::warning("No transcript yet. Use ':analyze <url>'.");
                } else {
                    Output::transcript(&session.transcript);
                }
            }
            Input::Status => print_status(&orchestrator.snapshot()),
            Input::Help => print_help(),
            Input::Question(question) => {
                ask_and_print(&orchestrator, question).await;
            }
            Input::Unknown(line) => {
                Output::warning(&format!("Unknown command: {}. Type ':help'.", line));
            }
        }
    }

    Ok(())
}

async fn analyze(orchestrator: &SessionOrchestrator, url: &str) {
    analyze_with_progress(orchestrator, url).await;
    print_analysis(&orchestrator.snapshot(), true);
}

async fn retry(orchestrator: &SessionOrchestrator) {
    let spinner = Output::spinner("Retrying ingestion...");
    let outcome = orchestrator.retry_ingest().await;
    spinner.finish_and_clear();

    match outcome {
        IngestOutcome::Indexed => Output::success("Transcript indexed. Questions are enabled."),
        IngestOutcome::Failed => {
            if let Some(error) = orchestrator.snapshot().error {
                Output::error(&error);
            }
        }
        IngestOutcome::NotApplicable => Output::info("Nothing to retry."),
        IngestOutcome::Superseded => {}
    }
}

fn print_help() {
    Output::header("Commands");
    Output::kv("<question>", "ask about the current video");
    Output::kv(":analyze <url>", "load a video (alias :a)");
    Output::kv(":retry", "retry a failed ingestion");
    Output::kv(":transcript", "print the transcript (alias :t)");
    Output::kv(":status", "show session state (alias :s)");
    Output::kv("exit", "leave the session");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_input(":analyze https://youtu.be/dQw4w9WgXcQ\n"),
            Input::Analyze("https://youtu.be/dQw4w9WgXcQ")
        );
        assert_eq!(parse_input(":a   https://youtu.be/x "), Input::Analyze("https://youtu.be/x"));
        assert_eq!(parse_input(":retry"), Input::Retry);
        assert_eq!(parse_input(":t"), Input::Transcript);
        assert_eq!(parse_input(":status"), Input::Status);
        assert_eq!(parse_input("QUIT"), Input::Exit);
        assert_eq!(parse_input(":q"), Input::Exit);
    }

    #[test]
    fn test_parse_questions_and_noise() {
        assert_eq!(parse_input("  What is this about?  "), Input::Question("What is this about?"));
        assert_eq!(parse_input("   \n"), Input::Empty);
        assert_eq!(parse_input(":analyze"), Input::Unknown(":analyze"));
        assert_eq!(parse_input(":frobnicate"), Input::Unknown(":frobnicate"));
    }
}
