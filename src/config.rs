//! Configuration module for twd
//!
//! Holds the bookmark file location, logging settings and the picker's
//! display preferences. Configuration is stored as TOML in the user's
//! config directory; `TWD_CONFIG` points somewhere else.

use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "TWD_CONFIG";

/// How the path column is shortened in the picker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathDisplayMode {
    /// Whole path
    #[default]
    Full,
    /// First two and last two segments
    Medium,
    /// First and last segment
    Short,
}

impl PathDisplayMode {
    /// Next mode in the `full -> medium -> short` cycle
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Full => Self::Medium,
            Self::Medium => Self::Short,
            Self::Short => Self::Full,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Medium => "medium",
            Self::Short => "short",
        }
    }
}

/// Field the picker sorts by
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortCriteria {
    Alias,
    Id,
    Path,
    /// Creation time; matches insertion order for bookmarks made by twd
    #[default]
    Created,
}

impl SortCriteria {
    /// Next criteria in the `alias -> id -> path -> created` cycle
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Alias => Self::Id,
            Self::Id => Self::Path,
            Self::Path => Self::Created,
            Self::Created => Self::Alias,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Alias => "alias",
            Self::Id => "id",
            Self::Path => "path",
            Self::Created => "created",
        }
    }
}

/// Picker display preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_id_column: bool,
    pub show_created_column: bool,
    pub path_display_mode: PathDisplayMode,
    pub sort_criteria: SortCriteria,
    pub sort_descending: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_id_column: true,
            show_created_column: true,
            path_display_mode: PathDisplayMode::Full,
            sort_criteria: SortCriteria::Created,
            sort_descending: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Application configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwdConfig {
    /// Bookmark JSON file; defaults to the user's local data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,

    /// Directory for rolling log files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Default log filter when `TWD_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub display: DisplayConfig,
}

impl Default for TwdConfig {
    fn default() -> Self {
        Self {
            data_file: None,
            log_dir: None,
            log_level: default_log_level(),
            display: DisplayConfig::default(),
        }
    }
}

fn data_dir() -> Result<PathBuf, ConfigError> {
    dirs::data_local_dir()
        .map(|dir| dir.join("twd"))
        .ok_or_else(|| ConfigError::Message("Could not determine data directory".to_string()))
}

impl TwdConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `TWD_CONFIG` is unset and the system config
    /// directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }

        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("twd").join("config.toml"))
    }

    /// Load configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let default_config = Self::default();
            default_config.save_to(path)?;
            return Ok(default_config);
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the configuration cannot be serialized or written.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Bookmark file location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no `data_file` is configured and the data
    /// directory cannot be determined.
    pub fn data_file_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("bookmarks.json")),
        }
    }

    /// Log directory location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if no `log_dir` is configured and the data
    /// directory cannot be determined.
    pub fn log_dir_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.log_dir {
            Some(path) => Ok(path.clone()),
            None => Ok(data_dir()?.join("logs")),
        }
    }
}
