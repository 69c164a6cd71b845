// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Runtime configuration
//!
//! Values come from an optional JSON file and are then overridden by
//! environment variables. A key path such as `materializer.max_rows` maps to
//! `MEDACCOUNT_MATERIALIZER_MAX_ROWS`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::materialize::{ListStrategy, MaterializeOptions};

pub const ENV_PREFIX: &str = "MEDACCOUNT";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid value for {key}: {message}")]
    InvalidEnv { key: String, message: String },
}

/// Log line layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// `error`, `warn`, `info`, `debug`, `trace` or `off`
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

impl LoggerConfig {
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or(log::LevelFilter::Info)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterializerConfig {
    pub list_strategy: ListStrategy,
    /// Abort a read after this many rows; unbounded when absent
    pub max_rows: Option<usize>,
}

impl MaterializerConfig {
    pub fn options(&self) -> MaterializeOptions {
        MaterializeOptions {
            list_strategy: self.list_strategy,
            max_rows: self.max_rows,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logger: LoggerConfig,
    pub materializer: MaterializerConfig,
}

impl Config {
    /// Parse a JSON config file; missing keys keep their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// File (when given) then environment
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env()?;
        Ok(config)
    }

    /// Override fields from `MEDACCOUNT_*` variables
    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Some(level) = env_var("logger.level") {
            level
                .parse::<log::LevelFilter>()
                .map_err(|e| invalid("logger.level", e))?;
            self.logger.level = level;
        }
        if let Some(format) = env_var("logger.format") {
            self.logger.format = format.parse().map_err(|e| invalid("logger.format", e))?;
        }
        if let Some(strategy) = env_var("materializer.list_strategy") {
            self.materializer.list_strategy = strategy
                .parse()
                .map_err(|e| invalid("materializer.list_strategy", e))?;
        }
        if let Some(max_rows) = env_var("materializer.max_rows") {
            self.materializer.max_rows = Some(
                max_rows
                    .parse()
                    .map_err(|e| invalid("materializer.max_rows", e))?,
            );
        }
        Ok(())
    }
}

/// `logger.level` -> `MEDACCOUNT_LOGGER_LEVEL`
pub fn env_key(key: &str) -> String {
    format!("{}_{}", ENV_PREFIX, key.replace('.', "_").to_uppercase())
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(env_key(key)).ok().filter(|v| !v.is_empty())
}

fn invalid(key: &str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::InvalidEnv {
        key: env_key(key),
        message: err.to_string(),
    }
}
