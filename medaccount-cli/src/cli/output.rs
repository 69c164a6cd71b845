// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Output formatting for contracts and materialized aggregates

use comfy_table::{ContentArrangement, Table};
use medaccount::row::ColumnContract;
use serde_json::{json, Value};

use super::commands::OutputFormat;

/// Render a column contract as a table or a JSON array
pub fn format_contract(contract: &ColumnContract, format: OutputFormat) -> String {
    let rows: Vec<(usize, String, String, bool, bool)> = contract
        .segments()
        .iter()
        .flat_map(|segment| {
            segment
                .columns()
                .iter()
                .enumerate()
                .map(move |(offset, column)| {
                    (
                        segment.start() + offset,
                        format!("{}.{}", segment.table(), column.name),
                        column.ty.to_string(),
                        column.nullable,
                        segment.sentinel_index() == segment.start() + offset,
                    )
                })
        })
        .collect();

    match format {
        OutputFormat::Json => {
            let columns: Vec<Value> = rows
                .iter()
                .map(|(index, name, ty, nullable, sentinel)| {
                    json!({
                        "index": index,
                        "column": name,
                        "type": ty,
                        "nullable": nullable,
                        "sentinel": sentinel,
                    })
                })
                .collect();
            pretty(&Value::Array(columns))
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["#", "column", "type", "nullable", "sentinel"]);
            for (index, name, ty, nullable, sentinel) in rows {
                table.add_row(vec![
                    index.to_string(),
                    name,
                    ty,
                    yes_no(nullable).to_string(),
                    yes_no(sentinel).to_string(),
                ]);
            }
            table.to_string()
        }
    }
}

/// Render a materialized aggregate (object) or list (array of objects)
pub fn format_aggregate(value: &Value, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => pretty(value),
        OutputFormat::Table => match value {
            Value::Array(items) => list_table(items),
            Value::Object(map) => {
                let mut table = Table::new();
                table.set_content_arrangement(ContentArrangement::Dynamic);
                table.set_header(vec!["field", "value"]);
                for (key, field) in map {
                    table.add_row(vec![key.clone(), cell(field)]);
                }
                table.to_string()
            }
            other => cell(other),
        },
    }
}

/// One row per aggregate; columns from the keys of all items in first-seen order
fn list_table(items: &[Value]) -> String {
    let mut headers: Vec<String> = Vec::new();
    for item in items {
        if let Value::Object(map) = item {
            for key in map.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(headers.clone());
    for item in items {
        let row: Vec<String> = headers
            .iter()
            .map(|key| item.get(key).map(cell).unwrap_or_default())
            .collect();
        table.add_row(row);
    }
    table.to_string()
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Array(items) if items.is_empty() => String::new(),
        Value::Array(items) => format!("[{} items] {}", items.len(), value_compact(value)),
        other => value_compact(other),
    }
}

fn value_compact(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        ""
    }
}
