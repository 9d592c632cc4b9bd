use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, warn};

use dialer_core::DEFAULT_DELAY_MS;

pub const CONFIG_FILE: &str = "dialer.toml";
pub const DEFAULT_PORT: u16 = 3001;

/// Non-secret settings read from `dialer.toml`. Credentials stay in the
/// environment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DialerConfig {
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub gateway: GatewaySection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_port")]
    pub port: u16,
    /// Directory holding the dashboard's static files.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_dir: Option<PathBuf>,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            app_dir: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewaySection {
    /// Overrides the public gateway URL. `VAPI_BASE_URL` wins over this.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default = "default_delay_ms")]
    pub default_delay_ms: u64,
}

impl Default for GatewaySection {
    fn default() -> Self {
        Self {
            base_url: None,
            default_delay_ms: DEFAULT_DELAY_MS,
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_delay_ms() -> u64 {
    DEFAULT_DELAY_MS
}

impl DialerConfig {
    /// Read config from `dir`, falling back to defaults when the file is
    /// missing or unreadable.
    pub async fn read(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);

        if !config_path.exists() {
            debug!(path = %config_path.display(), "Config file does not exist, using defaults");
            return Self::default();
        }

        match fs::read_to_string(&config_path).await {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    debug!(path = %config_path.display(), "Config loaded successfully");
                    config
                }
                Err(e) => {
                    warn!(path = %config_path.display(), error = %e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = %config_path.display(), error = %e, "Failed to read config file, using defaults");
                Self::default()
            }
        }
    }

    pub async fn write(&self, dir: &Path) -> std::io::Result<()> {
        let config_path = dir.join(CONFIG_FILE);

        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        fs::write(&config_path, content).await?;
        debug!(path = %config_path.display(), "Config saved successfully");

        Ok(())
    }
}
