use crate::error::{PhotoLabelError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub display_count: usize,
    pub save_freq: usize,
    pub time_format: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PhotoLabelError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("photo-label").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            display_count: 5,
            save_freq: 5,
            // ファイル名から撮影時刻を読む場合のフォーマット（例: 20231114_182809）
            time_format: "%Y%m%d_%H%M%S".into(),
        }
    }
}
