// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! JSON row fixtures
//!
//! A fixture is a JSON array of arrays; each inner array is one row in
//! contract order. Cells are typed using the contract's declared column types.
//! Only reading the file is a cursor failure; a document that does not have
//! this shape is a decode failure like any other malformed row.

use std::path::Path;

use super::{ColumnContract, MemoryCursor, Row, Value};
use crate::error::{CursorError, DecodeError, MaterializeError};

fn malformed(column: impl Into<String>, message: impl Into<String>) -> DecodeError {
    DecodeError::Malformed {
        column: column.into(),
        message: message.into(),
    }
}

/// Parse a fixture document into rows typed by `contract`
pub fn rows_from_json(
    contract: &ColumnContract,
    document: &serde_json::Value,
) -> Result<Vec<Row>, MaterializeError> {
    let rows = document
        .as_array()
        .ok_or_else(|| malformed(contract.name(), "row fixture must be a JSON array of rows"))?;

    let mut out = Vec::with_capacity(rows.len());
    for (row_idx, row) in rows.iter().enumerate() {
        let cells = row.as_array().ok_or_else(|| {
            malformed(
                format!("{}[{}]", contract.name(), row_idx),
                "row is not a JSON array",
            )
        })?;

        if cells.len() != contract.width() {
            return Err(DecodeError::ColumnCount {
                expected: contract.width(),
                actual: cells.len(),
            }
            .into());
        }

        let mut values = Vec::with_capacity(cells.len());
        for (idx, cell) in cells.iter().enumerate() {
            let (table, column) = contract.column(idx).ok_or(DecodeError::ColumnCount {
                expected: contract.width(),
                actual: cells.len(),
            })?;
            let name = format!("{}.{}", table, column.name);
            values.push(Value::from_json(&name, cell, column.ty)?);
        }
        out.push(Row::new(values));
    }

    Ok(out)
}

/// Read a fixture file into an in-memory cursor
pub fn cursor_from_file(
    contract: &ColumnContract,
    path: impl AsRef<Path>,
) -> Result<MemoryCursor, MaterializeError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| {
        CursorError::with_source(format!("failed to read {}", path.display()), e)
    })?;
    let document: serde_json::Value = serde_json::from_str(&text)
        .map_err(|e| malformed(path.display().to_string(), e.to_string()))?;

    log::debug!(
        "Loaded fixture {} for contract '{}'",
        path.display(),
        contract.name()
    );

    rows_from_json(contract, &document).map(MemoryCursor::new)
}
