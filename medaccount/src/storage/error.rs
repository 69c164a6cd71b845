// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Storage error taxonomy

use thiserror::Error;

use crate::error::MaterializeError;

/// Postgres SQLSTATE for foreign key violations
pub const SQLSTATE_FOREIGN_KEY_VIOLATION: &str = "23503";
/// Postgres SQLSTATE for unique violations
pub const SQLSTATE_UNIQUE_VIOLATION: &str = "23505";

/// Errors handed to the service layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("foreign key constraint violation: {0}")]
    ForeignKeyConstraint(String),

    #[error("unique constraint violation: {0}")]
    UniqueConstraint(String),

    /// Rejected list parameter
    #[error("invalid order by: {0}")]
    InvalidOrderBy(String),

    #[error("internal storage error: {0}")]
    Internal(String),
}

impl StorageError {
    /// Map a database error by its SQLSTATE code
    pub fn from_sql_state(code: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        match code {
            SQLSTATE_FOREIGN_KEY_VIOLATION => StorageError::ForeignKeyConstraint(message),
            SQLSTATE_UNIQUE_VIOLATION => StorageError::UniqueConstraint(message),
            _ => StorageError::Internal(format!("{} (SQLSTATE {})", message, code)),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound)
    }
}

impl From<MaterializeError> for StorageError {
    fn from(err: MaterializeError) -> Self {
        match err {
            MaterializeError::NotFound => StorageError::NotFound,
            other => {
                log::error!("materialization failed: {}", other);
                StorageError::Internal(other.to_string())
            }
        }
    }
}
