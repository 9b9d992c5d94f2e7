use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable supplying the metadata-lookup API key.
pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Root directory for exported transcripts
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,

    /// Preferred caption language code
    #[serde(default = "default_language")]
    pub language: String,

    /// Metadata API key, read once from the environment at startup.
    /// Never written to the config file; absence is not an error here,
    /// API-backed calls fail with an authorization error at call time.
    #[serde(skip)]
    pub api_key: Option<String>,
}

fn default_output_root() -> PathBuf {
    PathBuf::from("transcripts")
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_root: default_output_root(),
            language: default_language(),
            api_key: None,
        }
    }
}

impl Config {
    /// Load configuration from file, or fall back to defaults, then pick up
    /// the API key from the environment.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Some(path) if path.exists() => {
                let content = fs_err::read_to_string(&path).context("Failed to read config file")?;
                serde_yaml::from_str(&content).context("Failed to parse config file")?
            }
            _ => Self::default(),
        };

        config.api_key = std::env::var(API_KEY_VAR).ok().filter(|key| !key.is_empty());
        Ok(config)
    }

    /// Get configuration file path
    fn config_path() -> Option<PathBuf> {
        // First try current directory for easy testing
        let local_config = PathBuf::from("config.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir().map(|dir| dir.join("yt-transcripts").join("config.yaml"))
    }
}
