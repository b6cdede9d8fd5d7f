//! Roster configuration.
//!
//! Stored at `~/.config/dutyroster/config.json`. `DUTYROSTER_DATA` and
//! `DUTYROSTER_EPOCH` override the file when set.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::rotation::{default_epoch, parse_date, RotationCalendar};
use crate::standby::DEFAULT_GROUP_SIZE;

/// Application name used for config/data directory paths
const APP_NAME: &str = "dutyroster";

const CONFIG_FILE: &str = "config.json";

const DATA_FILE: &str = "roster.json";

pub const DATA_ENV: &str = "DUTYROSTER_DATA";
pub const EPOCH_ENV: &str = "DUTYROSTER_EPOCH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// First day of the 21-day cycle for track 123.
    #[serde(default = "default_epoch")]
    pub rotation_epoch: NaiveDate,
    #[serde(default = "default_group_size")]
    pub standby_group_size: usize,
    #[serde(default)]
    pub data_file: Option<PathBuf>,
}

fn default_group_size() -> usize {
    DEFAULT_GROUP_SIZE
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            rotation_epoch: default_epoch(),
            standby_group_size: DEFAULT_GROUP_SIZE,
            data_file: None,
        }
    }
}

impl RosterConfig {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Invalid config in {}", path.display()))?;
        if config.standby_group_size == 0 {
            anyhow::bail!("standby_group_size must be at least 1");
        }
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Roster data file, falling back to `<data dir>/dutyroster/roster.json`.
    pub fn data_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.data_file {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find data directory"))?;
        Ok(data_dir.join(APP_NAME).join(DATA_FILE))
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(path) = lookup(DATA_ENV).filter(|v| !v.trim().is_empty()) {
            self.data_file = Some(PathBuf::from(path));
        }
        if let Some(epoch) = lookup(EPOCH_ENV).filter(|v| !v.trim().is_empty()) {
            self.rotation_epoch =
                parse_date(&epoch).with_context(|| format!("Invalid {}", EPOCH_ENV))?;
        }
        Ok(())
    }

    pub fn calendar(&self) -> RotationCalendar {
        RotationCalendar::new(self.rotation_epoch)
    }
}
