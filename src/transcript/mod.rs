//! Transcript data model.
//!
//! A transcript is an ordered list of timestamped segments, kept exactly in the
//! order the transcript collaborator returned them.

mod format;

pub use format::{format_transcript, OutputFormat};

use serde::{Deserialize, Serialize};

/// One timestamped unit of spoken text with a deep link back into the video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    /// Spoken text.
    pub text: String,
    /// Display timestamp (e.g., "01:23").
    pub start_time: String,
    /// URL that opens the video at this segment.
    pub link: String,
}

impl TranscriptSegment {
    pub fn new(text: &str, start_time: &str, link: &str) -> Self {
        Self {
            text: text.to_string(),
            start_time: start_time.to_string(),
            link: link.to_string(),
        }
    }
}

/// An ordered sequence of transcript segments.
///
/// Replaced wholesale on each analysis, never mutated in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    segments: Vec<TranscriptSegment>,
}

impl Transcript {
    pub fn new(segments: Vec<TranscriptSegment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[TranscriptSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TranscriptSegment> {
        self.segments.iter()
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a TranscriptSegment;
    type IntoIter = std::slice::Iter<'a, TranscriptSegment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}
