// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! CLI module for MedAccount
//!
//! Provides commands for inspecting the column contract of every profile
//! query and for materializing JSON row fixtures into aggregates.

pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{Cli, Commands};
pub use handlers::{handle_columns, handle_entities, handle_materialize, handle_version};
