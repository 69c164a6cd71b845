// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Uploaded account file

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A stored file owned by an account
///
/// Timestamps and owner are internal and not part of the response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct File {
    pub id: i64,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing)]
    pub account_id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
