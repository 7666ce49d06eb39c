//! Config command implementation.

use crate::cli::{ConfigAction, Output};
use crate::config::Settings;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: Settings, config_path: PathBuf) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let toml_str = toml::to_string_pretty(&settings)
                .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;
            println!("{}", toml_str);
        }

        ConfigAction::Edit => {
            // Create default config if it doesn't exist
            if !config_path.exists() {
                settings.save_to(&config_path)?;
                Output::info(&format!("Created default config at {:?}", config_path));
            }

            let editor = std::env::var("EDITOR").unwrap_or_else(|_| "vim".to_string());

            Output::info(&format!("Opening config in {}...", editor));

            let status = std::process::Command::new(&editor)
                .arg(&config_path)
                .status();

            match status {
                Ok(s) if s.success() => match validate_config(&config_path) {
                    Ok(settings) => {
                        Output::success("Config saved.");
                        Output::kv("Server", &settings.collaborators.base_url);
                        Output::kv("Ingest payload", &settings.ingest.payload.to_string());
                    }
                    Err(e) => {
                        Output::error(&format!("Config is not usable: {:#}", e));
                        Output::info("Run `vidask config edit` again to fix it.");
                        return Err(e);
                    }
                },
                Ok(_) => {
                    Output::warning("Editor exited with non-zero status.");
                }
                Err(e) => {
                    Output::error(&format!("Failed to open editor: {}", e));
                    Output::info(&format!("Config file is at: {:?}", config_path));
                }
            }
        }

        ConfigAction::Path => {
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

/// Load an edited config file back and check that its endpoints resolve.
fn validate_config(path: &Path) -> Result<Settings> {
    let settings = Settings::load_from(Some(&path.to_path_buf()))
        .with_context(|| format!("failed to read {}", path.display()))?;
    settings.collaborators.endpoints()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_edited_server() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[collaborators]\nbase_url = \"http://10.0.0.5:9000\"\n\n[ingest]\npayload = \"url\"\n",
        )
        .unwrap();

        let settings = validate_config(&path).unwrap();
        assert_eq!(settings.collaborators.base_url, "http://10.0.0.5:9000");
        assert_eq!(settings.ingest.payload.to_string(), "url");
    }

    #[test]
    fn test_validate_rejects_broken_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[collaborators\nbase_url = ").unwrap();

        assert!(validate_config(&path).is_err());
    }

    #[test]
    fn test_validate_rejects_unusable_server() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[collaborators]\nbase_url = \"not a url\"\n").unwrap();

        let error = validate_config(&path).unwrap_err();
        assert!(error.to_string().contains("base_url"));
    }
}
