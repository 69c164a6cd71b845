// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI command handlers for MedAccount

use colored::Colorize;
use std::path::PathBuf;

use super::commands::OutputFormat;
use super::output::{format_aggregate, format_contract};
use medaccount::model::ListRequest;
use medaccount::row::cursor_from_file;
use medaccount::storage::Entity;
use medaccount::{Config, ListStrategy, ProfileReader, StorageError};

/// Handle the version command
pub fn handle_version() {
    println!("{} {}", "MedAccount".bold().green(), medaccount::VERSION);
    println!("Profile read path: LEFT JOIN row streams to nested aggregates");
}

/// Handle the entities command
pub fn handle_entities() {
    println!("{}", "Readable entities:".bold());
    for entity in Entity::ALL {
        let kind = if entity.is_list() { "list" } else { "single" };
        println!(
            "  {:<12} {:>3} columns  {}",
            entity.name(),
            entity.contract().width(),
            kind.dimmed()
        );
    }
}

/// Handle the columns command
pub fn handle_columns(
    entity: Entity,
    sql: bool,
    request: ListRequest,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    if sql {
        println!("{}", entity.select_sql(&request)?);
        return Ok(());
    }

    println!("{}", format_contract(entity.contract(), format));
    Ok(())
}

/// Handle the materialize command
pub fn handle_materialize(
    config: &Config,
    entity: Entity,
    rows: PathBuf,
    strategy: Option<ListStrategy>,
    max_rows: Option<usize>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut options = config.materializer.options();
    if let Some(strategy) = strategy {
        options.list_strategy = strategy;
    }
    if max_rows.is_some() {
        options.max_rows = max_rows;
    }

    let cursor = cursor_from_file(entity.contract(), &rows)?;
    log::info!(
        "Materializing {} from {:?} ({} rows, {} strategy)",
        entity,
        rows,
        cursor.remaining(),
        options.list_strategy
    );

    match ProfileReader::new(options).read_json(entity, cursor) {
        Ok(value) => {
            println!("{}", format_aggregate(&value, format));
            Ok(())
        }
        Err(StorageError::NotFound) => {
            eprintln!("{}", format!("No {} found in {:?}", entity, rows).yellow());
            Err(StorageError::NotFound.into())
        }
        Err(e) => Err(e.into()),
    }
}
