//! Transcript output formatting (text, JSON, Markdown).
//!
//! Segment order is always preserved.

use super::Transcript;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(format!("Unknown format: {}. Use text, json, or markdown.", s)),
        }
    }
}

/// Format a transcript for output.
pub fn format_transcript(transcript: &Transcript, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_text(transcript),
        OutputFormat::Json => format_json(transcript),
        OutputFormat::Markdown => format_markdown(transcript),
    }
}

/// Format as `[start] text` lines.
fn format_text(transcript: &Transcript) -> String {
    let mut output = String::new();
    for segment in transcript {
        output.push_str(&format!("[{}] {}\n", segment.start_time, segment.text));
    }
    output
}

/// Format as a JSON array of segments, exactly as received.
fn format_json(transcript: &Transcript) -> String {
    serde_json::to_string_pretty(transcript).unwrap_or_else(|_| "[]".to_string())
}

/// Format as a Markdown list with timestamp links.
fn format_markdown(transcript: &Transcript) -> String {
    let mut output = String::new();
    for segment in transcript {
        output.push_str(&format!(
            "- [{}]({}) {}\n",
            segment.start_time, segment.link, segment.text
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::TranscriptSegment;

    fn sample_transcript() -> Transcript {
        Transcript::new(vec![
            TranscriptSegment::new(
                "Hello world.",
                "00:00",
                "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=0s",
            ),
            TranscriptSegment::new(
                "This is a test.",
                "00:03",
                "https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=3s",
            ),
        ])
    }

    #[test]
    fn test_format_text() {
        let text = format_transcript(&sample_transcript(), OutputFormat::Text);
        assert_eq!(text, "[00:00] Hello world.\n[00:03] This is a test.\n");
    }

    #[test]
    fn test_format_json_keeps_order() {
        let json = format_transcript(&sample_transcript(), OutputFormat::Json);
        let parsed: Transcript = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample_transcript());
        assert!(json.find("Hello world.").unwrap() < json.find("This is a test.").unwrap());
    }

    #[test]
    fn test_format_markdown() {
        let md = format_transcript(&sample_transcript(), OutputFormat::Markdown);
        assert!(md.starts_with(
            "- [00:00](https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=0s) Hello world.\n"
        ));
    }

    #[test]
    fn test_parse_format() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert!("srt".parse::<OutputFormat>().is_err());
    }
}
