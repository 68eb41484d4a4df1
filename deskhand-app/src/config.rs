use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable holding the Gemini API key.
pub const API_KEY_VAR: &str = "DESKHAND_API_KEY";

/// Environment variable overriding the configured model id.
pub const MODEL_VAR: &str = "DESKHAND_MODEL";

const CONFIG_FILE: &str = "deskhand.toml";

/// Process-level configuration. Read once at startup; no runtime
/// reconfiguration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: String,
    pub max_retries: u32,
    pub retry_delay_secs: u64,
    pub audit_log: PathBuf,
    pub transcripts_dir: PathBuf,
    /// Directory file searches start from; home directory when unset.
    pub search_root: Option<PathBuf>,
    pub max_concurrent_actions: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: deskhand_providers::DEFAULT_MODEL.to_string(),
            max_retries: 3,
            retry_delay_secs: 2,
            audit_log: PathBuf::from("deskhand_actions.log"),
            transcripts_dir: PathBuf::from("transcripts"),
            search_root: None,
            max_concurrent_actions: 4,
        }
    }
}

impl Config {
    /// Load `deskhand.toml` from the working directory, falling back to
    /// defaults when the file does not exist.
    pub fn load_or_default() -> Result<Self> {
        let path = PathBuf::from(CONFIG_FILE);
        let mut config: Self = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {CONFIG_FILE}"))?;
            toml::from_str(&content).with_context(|| format!("Failed to parse {CONFIG_FILE}"))?
        } else {
            Self::default()
        };

        if let Ok(model) = std::env::var(MODEL_VAR) {
            if !model.trim().is_empty() {
                config.model = model;
            }
        }
        Ok(config)
    }

    pub fn api_key() -> Option<String> {
        std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }

    /// Where `search` walks from: configured root, else the home directory,
    /// else the working directory.
    pub fn search_root(&self) -> PathBuf {
        self.search_root
            .clone()
            .or_else(|| std::env::var_os("HOME").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
