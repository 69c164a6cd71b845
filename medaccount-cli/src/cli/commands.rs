// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command definitions for MedAccount

use clap::{Parser, Subcommand, ValueEnum};
use medaccount::storage::Entity;
use medaccount::ListStrategy;
use std::path::PathBuf;

/// Logger verbosity for a single invocation
///
/// Overrides `logger.level` from the config file and `MEDACCOUNT_LOGGER_LEVEL`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Failed reads only
    Error,
    /// Rejected rows and fixtures
    Warn,
    /// One line per materialized read
    Info,
    /// Contract names, row counts and strategies
    Debug,
    /// Every absorbed row and attached child
    Trace,
    /// Silence the logger
    Off,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Off => log::LevelFilter::Off,
        }
    }
}

/// MedAccount CLI - inspect profile queries and materialize row fixtures
#[derive(Parser)]
#[command(name = "medaccount")]
#[command(about = "MedAccount - account, patient and specialist profile read path")]
#[command(version)]
pub struct Cli {
    /// JSON config file (MEDACCOUNT_* variables override it)
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Logger verbosity, falling back to MEDACCOUNT_LOG
    #[arg(
        short = 'l',
        long = "log-level",
        env = "MEDACCOUNT_LOG",
        global = true,
        value_enum
    )]
    pub log_level: Option<LogLevel>,

    /// Shorthand for --log-level debug
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show detailed version information
    Version,

    /// List readable entities
    Entities,

    /// Show the column contract of an entity's query
    Columns {
        /// Entity name (account, accounts, specialist, ...)
        entity: Entity,

        /// Print the rendered SELECT instead of the column list
        #[arg(long)]
        sql: bool,

        /// ORDER BY for paged lists (root column, optional asc/desc)
        #[arg(long, default_value = "id")]
        order_by: String,

        /// Page size for paged lists
        #[arg(long, default_value_t = 10)]
        limit: u64,

        /// Page number for paged lists (1-based)
        #[arg(long, default_value_t = 1)]
        page: u64,

        /// Output format
        #[arg(short, long, default_value = "table")]
        format: OutputFormat,
    },

    /// Materialize a JSON row fixture into profile aggregates
    Materialize {
        /// Entity name (account, accounts, specialist, ...)
        entity: Entity,

        /// Fixture file: a JSON array of rows in contract order
        #[arg(short, long)]
        rows: PathBuf,

        /// List strategy, overriding the config
        #[arg(long)]
        strategy: Option<ListStrategy>,

        /// Row guard, overriding the config
        #[arg(long)]
        max_rows: Option<usize>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,
    },
}

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}
