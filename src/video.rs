//! Video reference extraction from free-form URLs.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// An 11-character token after `v=` or `/`. First match wins.
static VIDEO_ID_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:v=|/)([0-9A-Za-z_-]{11})").expect("Invalid regex"));

/// Canonical identifier of a video on its hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoReference(String);

impl VideoReference {
    /// Extract the video reference from a URL.
    ///
    /// No normalization is applied to the input: query parameters are not
    /// stripped and the scheme is not validated.
    pub fn extract(url: &str) -> Option<Self> {
        extract_video_id(url).map(|id| Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Embeddable player URL for this video.
    pub fn embed_url(&self) -> String {
        format!("https://www.youtube.com/embed/{}", self.0)
    }
}

impl std::fmt::Display for VideoReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the raw video ID slice from a URL, if present.
pub fn extract_video_id(url: &str) -> Option<&str> {
    VIDEO_ID_REGEX
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
