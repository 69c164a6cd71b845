// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Row-level data contract
//!
//! This module provides:
//! - Typed cell values and typed extraction
//! - Column contracts (ordered projection of a wide query)
//! - Forward-only row cursors
//! - JSON row fixtures

pub mod value;
pub mod contract;
pub mod cursor;
pub mod json;

pub use value::{ColumnType, FromValue, Value};
pub use contract::{ColumnContract, ColumnDef, ContractBuilder, Segment, SegmentDef, SegmentId};
pub use cursor::{MemoryCursor, Row, RowCursor};
pub use json::{cursor_from_file, rows_from_json};
