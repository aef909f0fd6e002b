use crate::utils::app_paths::AppPaths;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub behavior: BehaviorConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Rows per table page.
    pub page_size: usize,

    /// Show the key-hint line under the table.
    pub show_key_hints: bool,

    /// Use Unicode glyphs for sort markers and status badges.
    pub use_glyphs: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    /// Override for the snapshot store directory.
    pub data_dir: Option<PathBuf>,

    /// Hours before a login session expires.
    pub session_max_age_hours: u64,

    /// Language used when none has been persisted yet ("en" or "fr").
    pub default_language: String,

    /// Screen shown on startup when no route argument is given.
    pub default_route: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub username: String,

    /// Hex SHA-256 digest of the password. Default credentials are
    /// admin/admin; change them by writing a new digest here.
    pub password_sha256: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            behavior: BehaviorConfig::default(),
            auth: AuthConfig::default(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            show_key_hints: true,
            use_glyphs: true,
        }
    }
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            session_max_age_hours: 24,
            default_language: "en".to_string(),
            default_route: "/dashboard".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            // sha256("admin")
            password_sha256: "8c6976e5b5410415bde908bd4dee15dfb167a9c873fc4bb8a81f6f2ab448a918"
                .to_string(),
        }
    }
}

impl Config {
    /// Load config from the default location, creating it on first run.
    pub fn load() -> Result<Self> {
        let config_path = AppPaths::config_file()?;

        if !config_path.exists() {
            let default_config = Self::default();
            default_config.save()?;
            return Ok(default_config);
        }

        let contents = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<()> {
        let config_path = AppPaths::config_file()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Default config file contents with explanatory comments, for
    /// `--generate-config`.
    pub fn create_default_with_comments() -> String {
        r#"# mymanager configuration file
# Location: ~/.config/mymanager/config.toml (Linux/macOS)
#           %APPDATA%\mymanager\config.toml (Windows)

[display]
# Rows shown per table page
page_size = 10

# Show the key-hint line under the table
show_key_hints = true

# Use Unicode glyphs for sort markers and status badges
# Set to false for ASCII-only terminals
use_glyphs = true

[behavior]
# Override the snapshot store directory (defaults to the platform data dir)
# data_dir = "/path/to/store"

# Hours before a login session expires
session_max_age_hours = 24

# Language used when none has been persisted yet: "en" or "fr"
default_language = "en"

# Screen shown on startup when no route argument is given
default_route = "/dashboard"

[auth]
# Login credentials. The password is stored as a hex SHA-256 digest;
# the default pair is admin/admin.
username = "admin"
password_sha256 = "8c6976e5b5410415bde908bd4dee15dfb167a9c873fc4bb8a81f6f2ab448a918"
"#
        .to_string()
    }
}
