use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use derive_more::From;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use scimitar::{Configuration, Direction};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod theme;

/// Name of the settings file inside the configuration directory
pub const SETTINGS_FILE: &str = "settings.toml";

/// Prefix of the environment variables that override settings
pub const ENV_PREFIX: &str = "DUOTYPE_";

/// Environment variable holding the log filter. Not a setting.
pub const LOG_ENV: &str = "DUOTYPE_LOG";

/// Log filter used when neither the settings nor the environment give one
pub const DEFAULT_LOG_FILTER: &str = "duotype=info,scimitar=info";

/// Direction of the reference text
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

impl From<TextDirection> for Direction {
    fn from(value: TextDirection) -> Self {
        match value {
            TextDirection::Ltr => Self::Ltr,
            TextDirection::Rtl => Self::Rtl,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct LogSettings {
    /// Write a log file even when `DUOTYPE_LOG` is unset
    pub enabled: bool,
    /// Directory of the log file. Defaults to the platform's local data directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            directory: None,
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub theme: theme::Theme,
    pub direction: TextDirection,
    /// File holding the initial reference text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<PathBuf>,
    /// Break words that don't fit on a line instead of moving them to the next one
    pub wrap_words: bool,
    /// Interval between clock refreshes while typing, in milliseconds
    pub tick_interval_ms: u64,
    pub log: LogSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: theme::Theme::default(),
            direction: TextDirection::default(),
            text: None,
            wrap_words: false,
            tick_interval_ms: 1000,
            log: LogSettings::default(),
        }
    }
}

impl Settings {
    /// The session configuration these settings describe
    pub fn configuration(&self) -> Configuration {
        Configuration {
            tick_interval: Duration::from_millis(self.tick_interval_ms.max(1)),
        }
    }
}

#[derive(Debug, From, Error)]
pub enum ConfigError {
    #[error("No configuration directory on this platform. Pass one with `--config <dir>`")]
    NoDirectory,

    #[error("Could not create the configuration directory: {0}")]
    CreateDirectory(std::io::Error),

    #[error("Invalid settings: {0}")]
    Parse(Box<figment::Error>),
}

#[derive(Debug)]
pub struct Config {
    pub settings: Settings,
    pub config_dir: PathBuf,
    /// Platform directory for application data, if one could be determined
    pub data_dir: Option<PathBuf>,
}

impl Config {
    pub fn get(override_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let project_dirs = ProjectDirs::from("com", "Duotype", "Duotype");

        let config_dir = override_path
            .or_else(|| {
                project_dirs
                    .as_ref()
                    .map(|dirs| dirs.config_dir().to_path_buf())
            })
            .ok_or(ConfigError::NoDirectory)?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir)?;
        }

        let settings = Self::figment(&config_dir).extract().map_err(Box::new)?;

        Ok(Self {
            settings,
            data_dir: project_dirs.map(|dirs| dirs.data_local_dir().to_path_buf()),
            config_dir,
        })
    }

    /// Defaults, then `settings.toml`, then `DUOTYPE_*` environment variables
    ///
    /// Nested keys are separated by a double underscore, e.g. `DUOTYPE_LOG__ENABLED`.
    pub fn figment(config_dir: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Settings::default()));

        let settings_toml = config_dir.join(SETTINGS_FILE);
        if settings_toml.exists() {
            figment = figment.merge(Toml::file(settings_toml));
        }

        let log_env = LOG_ENV.trim_start_matches(ENV_PREFIX);
        figment.merge(
            Env::prefixed(ENV_PREFIX)
                .split("__")
                .filter(move |key| !key.as_str().eq_ignore_ascii_case(log_env)),
        )
    }

    /// Directory the log file is written to
    ///
    /// A relative `log.directory` is taken from the configuration directory, like `text`.
    pub fn log_dir(&self) -> PathBuf {
        self.settings
            .log
            .directory
            .as_ref()
            .map(|directory| self.config_dir.join(directory))
            .or_else(|| self.data_dir.clone())
            .unwrap_or_else(|| self.config_dir.clone())
    }
}
