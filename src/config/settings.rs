//! Configuration settings for Vidask.

use crate::error::{Result, VidaskError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub collaborators: CollaboratorSettings,
    pub ingest: IngestSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
        }
    }
}

/// Where the transcript, ingest, and ask collaborators live.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollaboratorSettings {
    /// Base URL shared by all collaborator endpoints.
    pub base_url: String,
    /// Path of the transcript endpoint.
    pub transcript_path: String,
    /// Path of the ingestion endpoint.
    pub ingest_path: String,
    /// Path of the question-answering endpoint.
    pub ask_path: String,
    /// Path probed by `doctor`.
    pub health_path: String,
    /// Request timeout in seconds (0 disables the timeout).
    pub timeout_seconds: u64,
}

impl Default for CollaboratorSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            transcript_path: "/transcript".to_string(),
            ingest_path: "/ingest".to_string(),
            ask_path: "/ask".to_string(),
            health_path: "/".to_string(),
            timeout_seconds: 300, // 5 minutes
        }
    }
}

/// Resolved collaborator endpoint URLs.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub transcript: Url,
    pub ingest: Url,
    pub ask: Url,
    pub health: Url,
}

impl CollaboratorSettings {
    /// Resolve every endpoint against the base URL.
    pub fn endpoints(&self) -> Result<Endpoints> {
        let base = Url::parse(&self.base_url).map_err(|e| {
            VidaskError::Config(format!("Invalid collaborator base_url '{}': {}", self.base_url, e))
        })?;
        if base.cannot_be_a_base() {
            return Err(VidaskError::Config(format!(
                "Collaborator base_url '{}' cannot have paths",
                self.base_url
            )));
        }

        Ok(Endpoints {
            transcript: base.join(&self.transcript_path)?,
            ingest: base.join(&self.ingest_path)?,
            ask: base.join(&self.ask_path)?,
            health: base.join(&self.health_path)?,
        })
    }

    /// The request timeout, if enabled.
    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds))
    }
}

/// What is submitted to the ingestion collaborator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum IngestPolicy {
    /// Send the already-fetched transcript segments.
    #[default]
    Transcript,
    /// Send the raw video URL.
    Url,
}

impl std::str::FromStr for IngestPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "transcript" => Ok(IngestPolicy::Transcript),
            "url" => Ok(IngestPolicy::Url),
            _ => Err(format!("Unknown ingest payload: {}", s)),
        }
    }
}

impl std::fmt::Display for IngestPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngestPolicy::Transcript => write!(f, "transcript"),
            IngestPolicy::Url => write!(f, "url"),
        }
    }
}

/// Ingestion settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IngestSettings {
    /// Payload sent for ingestion (transcript, url).
    pub payload: IngestPolicy,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| VidaskError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("vidask")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoints() {
        let endpoints = Settings::default().collaborators.endpoints().unwrap();
        assert_eq!(endpoints.transcript.as_str(), "http://127.0.0.1:8000/transcript");
        assert_eq!(endpoints.ingest.as_str(), "http://127.0.0.1:8000/ingest");
        assert_eq!(endpoints.ask.as_str(), "http://127.0.0.1:8000/ask");
        assert_eq!(endpoints.health.as_str(), "http://127.0.0.1:8000/");
    }

    #[test]
    fn test_invalid_base_url() {
        let settings = CollaboratorSettings {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(settings.endpoints(), Err(VidaskError::Config(_))));
    }

    #[test]
    fn test_timeout_zero_disables() {
        let mut settings = CollaboratorSettings::default();
        assert_eq!(settings.timeout(), Some(Duration::from_secs(300)));
        settings.timeout_seconds = 0;
        assert_eq!(settings.timeout(), None);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[collaborators]\nbase_url = \"http://backend:9000\"\n\n[ingest]\npayload = \"url\"\n",
        )
        .unwrap();

        let settings = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(settings.collaborators.base_url, "http://backend:9000");
        assert_eq!(settings.collaborators.ask_path, "/ask");
        assert_eq!(settings.ingest.payload, IngestPolicy::Url);
        assert_eq!(settings.general.log_level, "warn");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(settings.ingest.payload, IngestPolicy::Transcript);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.collaborators.timeout_seconds = 30;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.collaborators.timeout_seconds, 30);
    }

    #[test]
    fn test_parse_ingest_policy() {
        assert_eq!("URL".parse::<IngestPolicy>().unwrap(), IngestPolicy::Url);
        assert!("both".parse::<IngestPolicy>().is_err());
    }
}
