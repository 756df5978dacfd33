//! Host configuration, read from `host.json` in the config directory.

use std::fs;
use std::io;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid colour {0:?}, expected #rgb or #rrggbb")]
    Color(String),
    #[error("invalid log level {0:?}")]
    LogLevel(String),
}

/// Initial attributes of the embedded widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetAttributes {
    pub button: String,
    pub label: String,
    pub placeholder: String,
    pub value: String,
}

impl Default for WidgetAttributes {
    fn default() -> Self {
        Self {
            button: "I'm a button".to_string(),
            label: "I'm a label".to_string(),
            placeholder: "Search...".to_string(),
            value: "Hello World".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub widget: WidgetAttributes,
    /// Value for `--search-input-border-color`, e.g. `"#5f3993"`.
    pub input_border_color: Option<String>,
    pub log_level: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            widget: WidgetAttributes::default(),
            input_border_color: None,
            log_level: "debug".to_string(),
        }
    }
}

impl HostConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err.into()),
        }
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(contents)?;
        config.log_level()?;
        config.input_border_color()?;
        Ok(config)
    }

    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level).map_err(|_| ConfigError::LogLevel(self.log_level.clone()))
    }

    pub fn input_border_color(&self) -> Result<Option<shadowdom::Color>, ConfigError> {
        self.input_border_color
            .as_deref()
            .map(|hex| shadowdom::Color::hex(hex).ok_or_else(|| ConfigError::Color(hex.to_string())))
            .transpose()
    }
}
