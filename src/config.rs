use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default base URL of the spending service.
fn default_service_url() -> String {
    "http://localhost:8000".to_string()
}

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the spending service.
    #[serde(default = "default_service_url")]
    pub service_url: String,

    /// User id sent with every request, when the caller does not supply one.
    pub user_id: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service_url: default_service_url(),
            user_id: None,
        }
    }
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load config from a file, or return default config if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }
}

/// Returns the default config file path.
///
/// Resolution order:
/// 1. `./spendwallet.toml` if it exists in current directory
/// 2. `~/.config/spendwallet/spendwallet.toml` (platform config directory)
pub fn default_config_path() -> PathBuf {
    let local_config = PathBuf::from("spendwallet.toml");
    if local_config.exists() {
        return local_config;
    }

    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("spendwallet").join("spendwallet.toml");
    }

    local_config
}
