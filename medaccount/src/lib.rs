// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! MedAccount - profile read path over wide LEFT JOIN queries
//!
//! An account, patient or specialist profile is stored across a root table
//! and many optional child tables. It is read with one SELECT that LEFT JOINs
//! every child, so the result has one row per combination of child rows and
//! NULLs wherever a child is absent. This crate turns such a row stream back
//! into nested aggregates without duplicates.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  storage (ProfileReader, Entity)        │
//! │  - entity layouts and SQL               │
//! │  - StorageError mapping                 │
//! └─────────────────────────────────────────┘
//!                  │
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │  materialize                            │
//! │  - binder (nullable segments)           │
//! │  - dedup / nested collection slots      │
//! │  - Materializer (one / list)            │
//! └─────────────────────────────────────────┘
//!                  │
//!                  ▼
//! ┌─────────────────────────────────────────┐
//! │  row                                    │
//! │  - ColumnContract (segments, SQL)       │
//! │  - RowCursor, JSON fixtures             │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use medaccount::storage::{Entity, ProfileReader};
//! use medaccount::row::cursor_from_file;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let cursor = cursor_from_file(Entity::Specialist.contract(), "specialist.json")?;
//! let specialist = ProfileReader::default().specialist(cursor)?;
//! println!("{}", serde_json::to_string_pretty(&specialist)?);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod logging;
pub mod materialize;
pub mod model;
pub mod row;
pub mod storage;

pub use config::{Config, ConfigError};
pub use error::{CursorError, DecodeError, MaterializeError, Result};
pub use materialize::{ListStrategy, MaterializeOptions, Materializer};
pub use storage::{Entity, ProfileReader, StorageError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
