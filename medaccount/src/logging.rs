// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! env_logger setup

use std::io::Write;

use crate::config::{LogFormat, LoggerConfig};

/// Install the global logger
///
/// `RUST_LOG` still refines the configured level per module. Returns false if
/// a logger was already installed.
pub fn init(config: &LoggerConfig) -> bool {
    init_with_level(config.level_filter(), config.format)
}

fn init_with_level(level: log::LevelFilter, format: LogFormat) -> bool {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    if format == LogFormat::Json {
        builder.format(|buf, record| {
            let line = serde_json::json!({
                "ts": buf.timestamp_millis().to_string(),
                "level": record.level().to_string(),
                "target": record.target(),
                "msg": record.args().to_string(),
            });
            writeln!(buf, "{}", line)
        });
    }

    builder.try_init().is_ok()
}
