// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Multi-join result materialization
//!
//! Flow per row: cursor -> nullable join binder -> dedup index / nested
//! attacher -> aggregate builder. Everything here is per call; no state is
//! shared between materializations.

pub mod binder;
pub mod dedup;
pub mod engine;
pub mod nested;

pub use binder::{bind, bind_with, JoinDecode, SegmentView};
pub use dedup::{CollectionSlot, DedupIndex, FirstNonNull};
pub use engine::{AggregateBuilder, EntityLayout, ListStrategy, MaterializeOptions, Materializer};
pub use nested::{NestedSlot, TwoLevel};
