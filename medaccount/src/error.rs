// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Error types for row decoding and materialization

use thiserror::Error;

use crate::row::ColumnType;

/// Result type alias for materializer operations
pub type Result<T> = std::result::Result<T, MaterializeError>;

/// A row could not be bound to the expected column contract
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// Row width differs from the contract width
    #[error("row has {actual} columns, contract expects {expected}")]
    ColumnCount { expected: usize, actual: usize },

    /// Value variant does not match the declared column type
    #[error("column '{column}' expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: ColumnType,
        found: &'static str,
    },

    /// A non-nullable column of a matched segment was NULL
    #[error("column '{column}' is NULL inside a matched segment")]
    UnexpectedNull { column: String },

    /// Column name not part of the segment being decoded
    #[error("column '{column}' is not projected by segment '{table}'")]
    UnknownColumn { table: String, column: String },

    /// Text could not be parsed into the declared type
    #[error("column '{column}' is malformed: {message}")]
    Malformed { column: String, message: String },

    /// A nested segment matched although its parent segment did not
    #[error("segment '{table}' matched under an unmatched parent '{parent}'")]
    OrphanSegment { table: String, parent: String },

    /// Single-aggregate stream carried rows for more than one root
    #[error("root id changed from {expected} to {found} within a single-aggregate stream")]
    RootMismatch { expected: i64, found: i64 },

    /// Grouped list stream revisited a root after its group was closed
    #[error("root id {0} reappeared after its group was finalized")]
    RootReappeared(i64),
}

/// Failure reported by the underlying row cursor (I/O, cancellation)
#[derive(Error, Debug)]
#[error("{message}")]
pub struct CursorError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CursorError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Main error type for materialization
///
/// `NotFound` is an expected outcome (empty stream). Every other variant is a
/// contract or infrastructure defect and must never be downgraded to
/// `NotFound`.
#[derive(Error, Debug)]
pub enum MaterializeError {
    /// The row stream was empty
    #[error("not found")]
    NotFound,

    /// Row values could not be bound to the contract
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Cursor failed while reading
    #[error("cursor error: {0}")]
    Cursor(#[from] CursorError),

    /// The configured row guard was exceeded
    #[error("row limit exceeded: more than {limit} rows")]
    RowLimitExceeded { limit: usize },
}

impl MaterializeError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, MaterializeError::NotFound)
    }
}
