// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! MedAccount command-line entry point

mod cli;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use medaccount::model::ListRequest;
use medaccount::Config;

fn main() {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            std::process::exit(1);
        }
    };

    // --log-level (or MEDACCOUNT_LOG) wins over --verbose, which wins over the config
    let mut logger = config.logger.clone();
    match (cli.log_level, cli.verbose) {
        (Some(level), _) => logger.level = log::LevelFilter::from(level).to_string(),
        (None, true) => logger.level = log::LevelFilter::Debug.to_string(),
        (None, false) => {}
    }
    medaccount::logging::init(&logger);

    let result = match cli.command {
        Commands::Version => {
            cli::handle_version();
            Ok(())
        }
        Commands::Entities => {
            cli::handle_entities();
            Ok(())
        }
        Commands::Columns {
            entity,
            sql,
            order_by,
            limit,
            page,
            format,
        } => {
            let request = ListRequest {
                order_by,
                limit,
                page,
                id_list: Vec::new(),
            };
            cli::handle_columns(entity, sql, request, format)
        }
        Commands::Materialize {
            entity,
            rows,
            strategy,
            max_rows,
            format,
        } => cli::handle_materialize(&config, entity, rows, strategy, max_rows, format),
    };

    if let Err(e) = result {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}
