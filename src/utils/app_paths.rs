use anyhow::{anyhow, Result};
use std::fs;
use std::path::PathBuf;

/// Central resolution of the application's on-disk locations.
pub struct AppPaths;

impl AppPaths {
    /// Data directory holding collection snapshots and the log file.
    pub fn data_dir() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| anyhow!("Cannot determine data directory"))?
            .join("mymanager");

        fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    pub fn config_file() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow!("Cannot determine config directory"))?;

        Ok(config_dir.join("mymanager").join("config.toml"))
    }

    pub fn log_file() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("mymanager.log"))
    }

    /// Directory for collection snapshot files, creating it if needed.
    pub fn store_dir() -> Result<PathBuf> {
        let dir = Self::data_dir()?.join("store");
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }
}
