use crate::player::SearchConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const CONFIG_PATH: &str = "tactic_config.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub save_path: PathBuf,
    pub log_path: PathBuf,
    /// Pause before a bot move is applied.
    pub thinking_delay_ms: u64,
    pub search: SearchConfig,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let config_str = std::fs::read_to_string(CONFIG_PATH)?;
        let config: AppConfig = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|_| Self::default())
    }

    pub fn thinking_delay(&self) -> Duration {
        Duration::from_millis(self.thinking_delay_ms)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            save_path: PathBuf::from("tactic_infinity_save.json"),
            log_path: PathBuf::from("tactic_infinity.log"),
            thinking_delay_ms: 700,
            search: SearchConfig::default(),
        }
    }
}
