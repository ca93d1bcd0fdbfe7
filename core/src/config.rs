use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{GridSize, TileColor};

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV: &str = "MATCHING_GAME_CONFIG";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// How long a mismatched pair stays face-up.
    pub hide_delay_ms: u64,
    /// Pause between the final match and the completion dialog.
    pub victory_delay_ms: u64,
    pub palette: Vec<TileColor>,
    /// Square grid sizes offered on the selection screen.
    pub presets: Vec<u8>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            hide_delay_ms: 2000,
            victory_delay_ms: 500,
            palette: TileColor::ALL.to_vec(),
            presets: vec![4, 6, 8],
        }
    }
}

impl GameConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Loads the file named by [`CONFIG_ENV`], or the defaults when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => {
                tracing::debug!(path = ?path, "loading config");
                Self::load(Path::new(&path))
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.hide_delay_ms == 0 {
            return Err(ConfigError::ZeroHideDelay);
        }
        if self.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        self.preset_sizes().map(|_| ())
    }

    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }

    pub fn victory_delay(&self) -> Duration {
        Duration::from_millis(self.victory_delay_ms)
    }

    pub fn preset_sizes(&self) -> Result<Vec<GridSize>, ConfigError> {
        self.presets
            .iter()
            .map(|&size| {
                GridSize::square(size).map_err(|source| ConfigError::InvalidPreset { size, source })
            })
            .collect()
    }
}
