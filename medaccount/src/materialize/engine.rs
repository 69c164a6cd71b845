// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Materializer
//!
//! Drives a row cursor to completion and folds the flat, fanned-out row
//! stream of one wide query into finished aggregates. One pass, no
//! backtracking; the first decode or cursor error aborts the whole call and no
//! partial aggregate is returned.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::binder::SegmentView;
use crate::error::{DecodeError, MaterializeError, Result};
use crate::row::{ColumnContract, Row, RowCursor};

/// Column contract plus the segment handles one aggregate needs
pub trait EntityLayout {
    type Builder: AggregateBuilder<Layout = Self>;

    fn contract(&self) -> &ColumnContract;
}

/// In-progress aggregate for one root id
///
/// `start` reads the root scalars from the first row only; every row,
/// including the first, is then passed to `absorb` for the collections.
pub trait AggregateBuilder: Sized {
    type Layout;
    type Output;

    fn start(layout: &Self::Layout, row: &Row) -> std::result::Result<Self, DecodeError>;

    fn root_id(&self) -> i64;

    fn absorb(&mut self, layout: &Self::Layout, row: &Row) -> std::result::Result<(), DecodeError>;

    fn finish(self) -> Self::Output;
}

/// How list streams are grouped into roots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListStrategy {
    /// Any row order; finalize every root after the stream is exhausted
    #[default]
    Buffered,
    /// Rows ordered by root id; finalize each root when the id changes
    Grouped,
}

impl fmt::Display for ListStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListStrategy::Buffered => write!(f, "buffered"),
            ListStrategy::Grouped => write!(f, "grouped"),
        }
    }
}

impl FromStr for ListStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "buffered" => Ok(ListStrategy::Buffered),
            "grouped" => Ok(ListStrategy::Grouped),
            _ => Err(format!(
                "Invalid list strategy: {}. Valid options: buffered, grouped",
                s
            )),
        }
    }
}

/// Per-call materializer options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeOptions {
    pub list_strategy: ListStrategy,
    /// Abort once more rows than this were read
    pub max_rows: Option<usize>,
}

/// Lifecycle of one root within a single pass
enum State<B> {
    Uninitialized,
    Accumulating(B),
}

/// Generic materializer over one entity layout
pub struct Materializer<'l, L: EntityLayout> {
    layout: &'l L,
    options: MaterializeOptions,
}

impl<'l, L: EntityLayout> Materializer<'l, L> {
    pub fn new(layout: &'l L) -> Self {
        Self {
            layout,
            options: MaterializeOptions::default(),
        }
    }

    pub fn with_options(layout: &'l L, options: MaterializeOptions) -> Self {
        Self { layout, options }
    }

    pub fn options(&self) -> &MaterializeOptions {
        &self.options
    }

    /// Read the next row, enforcing the row guard and the contract shape
    fn next_row<C: RowCursor>(&self, cursor: &mut C, read: &mut usize) -> Result<Option<Row>> {
        let Some(row) = cursor.next_row()? else {
            return Ok(None);
        };

        *read += 1;
        if let Some(limit) = self.options.max_rows {
            if *read > limit {
                log::warn!(
                    "{}: row limit {} exceeded, aborting",
                    self.layout.contract().name(),
                    limit
                );
                return Err(MaterializeError::RowLimitExceeded { limit });
            }
        }

        self.layout.contract().check_row(&row)?;
        Ok(Some(row))
    }

    fn root_id(&self, row: &Row) -> Result<i64> {
        let contract = self.layout.contract();
        Ok(SegmentView::new(row, contract.root()).sentinel::<i64>()?)
    }

    fn open(&self, row: &Row) -> Result<L::Builder> {
        let mut builder = L::Builder::start(self.layout, row)?;
        builder.absorb(self.layout, row)?;
        Ok(builder)
    }

    /// Materialize exactly one aggregate
    ///
    /// An empty stream is [`MaterializeError::NotFound`]. Rows for more than
    /// one root id are a [`DecodeError::RootMismatch`].
    pub fn materialize_one<C: RowCursor>(
        &self,
        mut cursor: C,
    ) -> Result<<L::Builder as AggregateBuilder>::Output> {
        let name = self.layout.contract().name();
        let mut read = 0usize;
        let mut state = State::Uninitialized;

        while let Some(row) = self.next_row(&mut cursor, &mut read)? {
            let id = self.root_id(&row)?;
            state = match state {
                State::Uninitialized => {
                    log::trace!("{}: root {} opened", name, id);
                    State::Accumulating(self.open(&row)?)
                }
                State::Accumulating(mut builder) => {
                    if builder.root_id() != id {
                        return Err(DecodeError::RootMismatch {
                            expected: builder.root_id(),
                            found: id,
                        }
                        .into());
                    }
                    builder.absorb(self.layout, &row)?;
                    State::Accumulating(builder)
                }
            };
        }

        match state {
            State::Uninitialized => {
                log::debug!("{}: empty stream, not found", name);
                Err(MaterializeError::NotFound)
            }
            State::Accumulating(builder) => {
                log::debug!("{}: materialized root {} from {} rows", name, builder.root_id(), read);
                Ok(builder.finish())
            }
        }
    }

    /// Materialize every root of a list stream in first-appearance order
    ///
    /// An empty stream yields an empty list.
    pub fn materialize_list<C: RowCursor>(
        &self,
        cursor: C,
    ) -> Result<Vec<<L::Builder as AggregateBuilder>::Output>> {
        log::debug!(
            "{}: list materialization, strategy={}",
            self.layout.contract().name(),
            self.options.list_strategy
        );
        match self.options.list_strategy {
            ListStrategy::Buffered => self.list_buffered(cursor),
            ListStrategy::Grouped => self.list_grouped(cursor),
        }
    }

    fn list_buffered<C: RowCursor>(
        &self,
        mut cursor: C,
    ) -> Result<Vec<<L::Builder as AggregateBuilder>::Output>> {
        let mut positions: HashMap<i64, usize> = HashMap::new();
        let mut builders: Vec<L::Builder> = Vec::new();
        let mut read = 0usize;

        while let Some(row) = self.next_row(&mut cursor, &mut read)? {
            let id = self.root_id(&row)?;
            match positions.get(&id) {
                Some(&position) => builders[position].absorb(self.layout, &row)?,
                None => {
                    positions.insert(id, builders.len());
                    builders.push(self.open(&row)?);
                }
            }
        }

        log::debug!(
            "{}: materialized {} roots from {} rows",
            self.layout.contract().name(),
            builders.len(),
            read
        );
        Ok(builders.into_iter().map(AggregateBuilder::finish).collect())
    }

    fn list_grouped<C: RowCursor>(
        &self,
        mut cursor: C,
    ) -> Result<Vec<<L::Builder as AggregateBuilder>::Output>> {
        let mut finished = Vec::new();
        let mut closed: HashSet<i64> = HashSet::new();
        let mut state: State<L::Builder> = State::Uninitialized;
        let mut read = 0usize;

        while let Some(row) = self.next_row(&mut cursor, &mut read)? {
            let id = self.root_id(&row)?;
            state = match state {
                State::Accumulating(mut builder) if builder.root_id() == id => {
                    builder.absorb(self.layout, &row)?;
                    State::Accumulating(builder)
                }
                previous => {
                    if let State::Accumulating(builder) = previous {
                        closed.insert(builder.root_id());
                        finished.push(builder.finish());
                    }
                    if closed.contains(&id) {
                        return Err(DecodeError::RootReappeared(id).into());
                    }
                    State::Accumulating(self.open(&row)?)
                }
            };
        }

        if let State::Accumulating(builder) = state {
            finished.push(builder.finish());
        }

        log::debug!(
            "{}: materialized {} roots from {} rows",
            self.layout.contract().name(),
            finished.len(),
            read
        );
        Ok(finished)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materialize::dedup::CollectionSlot;
    use crate::row::{ColumnDef, ColumnType, MemoryCursor, SegmentDef, SegmentId, Value};

    static OWNERS: SegmentDef = SegmentDef {
        table: "owners",
        columns: &[
            ColumnDef::required("id", ColumnType::Int),
            ColumnDef::required("name", ColumnType::Text),
        ],
        sentinel: 0,
    };

    static ITEMS: SegmentDef = SegmentDef {
        table: "items",
        columns: &[ColumnDef::required("id", ColumnType::Int)],
        sentinel: 0,
    };

    struct OwnerLayout {
        contract: ColumnContract,
        items: SegmentId,
    }

    impl OwnerLayout {
        fn new() -> Self {
            let mut builder = ColumnContract::builder("owner", &OWNERS);
            let items = builder.join(&ITEMS, "items.owner_id = owners.id");
            Self {
                contract: builder.build(),
                items,
            }
        }
    }

    #[derive(Debug, PartialEq)]
    struct Owner {
        id: i64,
        name: String,
        items: Vec<i64>,
    }

    struct OwnerBuilder {
        id: i64,
        name: String,
        items: CollectionSlot<i64, i64>,
    }

    impl EntityLayout for OwnerLayout {
        type Builder = OwnerBuilder;

        fn contract(&self) -> &ColumnContract {
            &self.contract
        }
    }

    impl AggregateBuilder for OwnerBuilder {
        type Layout = OwnerLayout;
        type Output = Owner;

        fn start(layout: &OwnerLayout, row: &Row) -> std::result::Result<Self, DecodeError> {
            let view = SegmentView::new(row, layout.contract.root());
            Ok(OwnerBuilder {
                id: view.get("id")?,
                name: view.get("name")?,
                items: CollectionSlot::new(),
            })
        }

        fn root_id(&self) -> i64 {
            self.id
        }

        fn absorb(&mut self, layout: &OwnerLayout, row: &Row) -> std::result::Result<(), DecodeError> {
            self.items.absorb_with(
                row,
                layout.contract.segment(layout.items),
                |v| v.get::<i64>("id"),
                |id| *id,
            )?;
            Ok(())
        }

        fn finish(self) -> Owner {
            Owner {
                id: self.id,
                name: self.name,
                items: self.items.into_vec(),
            }
        }
    }

    fn row(owner: i64, name: &str, item: Option<i64>) -> Row {
        Row::new(vec![Value::Int(owner), Value::from(name), item.into()])
    }

    #[test]
    fn test_materialize_one() {
        let layout = OwnerLayout::new();
        let cursor = MemoryCursor::new(vec![
            row(1, "a", Some(5)),
            row(1, "a", Some(6)),
            row(1, "a", Some(5)),
        ]);
        let owner = Materializer::new(&layout).materialize_one(cursor).unwrap();
        assert_eq!(
            owner,
            Owner {
                id: 1,
                name: "a".into(),
                items: vec![5, 6]
            }
        );
    }

    #[test]
    fn test_materialize_one_empty_is_not_found() {
        let layout = OwnerLayout::new();
        let err = Materializer::new(&layout)
            .materialize_one(MemoryCursor::empty())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_materialize_one_rejects_second_root() {
        let layout = OwnerLayout::new();
        let cursor = MemoryCursor::new(vec![row(1, "a", None), row(2, "b", None)]);
        let err = Materializer::new(&layout).materialize_one(cursor).unwrap_err();
        assert!(matches!(
            err,
            MaterializeError::Decode(DecodeError::RootMismatch {
                expected: 1,
                found: 2
            })
        ));
    }

    #[test]
    fn test_null_root_id_is_decode_error() {
        let layout = OwnerLayout::new();
        let cursor = MemoryCursor::new(vec![Row::new(vec![
            Value::Null,
            Value::from("a"),
            Value::Null,
        ])]);
        let err = Materializer::new(&layout).materialize_one(cursor).unwrap_err();
        assert!(matches!(
            err,
            MaterializeError::Decode(DecodeError::UnexpectedNull { .. })
        ));
    }

    #[test]
    fn test_list_buffered_interleaved() {
        let layout = OwnerLayout::new();
        let cursor = MemoryCursor::new(vec![
            row(2, "b", Some(1)),
            row(1, "a", Some(1)),
            row(2, "b", Some(2)),
            row(1, "a", None),
        ]);
        let owners = Materializer::new(&layout).materialize_list(cursor).unwrap();
        assert_eq!(owners.len(), 2);
        assert_eq!(owners[0].id, 2);
        assert_eq!(owners[0].items, vec![1, 2]);
        assert_eq!(owners[1].items, vec![1]);
    }

    #[test]
    fn test_list_grouped_rejects_reappearing_root() {
        let layout = OwnerLayout::new();
        let options = MaterializeOptions {
            list_strategy: ListStrategy::Grouped,
            max_rows: None,
        };
        let ordered = MemoryCursor::new(vec![
            row(1, "a", Some(1)),
            row(1, "a", Some(2)),
            row(2, "b", None),
        ]);
        let owners = Materializer::with_options(&layout, options)
            .materialize_list(ordered)
            .unwrap();
        assert_eq!(owners.len(), 2);
        assert_eq!(owners[0].items, vec![1, 2]);

        let unordered = MemoryCursor::new(vec![row(1, "a", None), row(2, "b", None), row(1, "a", None)]);
        let err = Materializer::with_options(&layout, options)
            .materialize_list(unordered)
            .unwrap_err();
        assert!(matches!(
            err,
            MaterializeError::Decode(DecodeError::RootReappeared(1))
        ));
    }

    #[test]
    fn test_list_empty_stream() {
        let layout = OwnerLayout::new();
        let owners = Materializer::new(&layout)
            .materialize_list(MemoryCursor::empty())
            .unwrap();
        assert!(owners.is_empty());
    }

    #[test]
    fn test_row_limit() {
        let layout = OwnerLayout::new();
        let options = MaterializeOptions {
            list_strategy: ListStrategy::Buffered,
            max_rows: Some(2),
        };
        let cursor = MemoryCursor::new(vec![
            row(1, "a", Some(1)),
            row(1, "a", Some(2)),
            row(1, "a", Some(3)),
        ]);
        let err = Materializer::with_options(&layout, options)
            .materialize_one(cursor)
            .unwrap_err();
        assert!(matches!(err, MaterializeError::RowLimitExceeded { limit: 2 }));
    }

    #[test]
    fn test_width_checked_on_every_row() {
        let layout = OwnerLayout::new();
        let cursor = MemoryCursor::new(vec![
            row(1, "a", Some(1)),
            Row::new(vec![Value::Int(1), Value::from("a")]),
        ]);
        let err = Materializer::new(&layout).materialize_one(cursor).unwrap_err();
        assert!(matches!(
            err,
            MaterializeError::Decode(DecodeError::ColumnCount { expected: 3, actual: 2 })
        ));
    }

    #[test]
    fn test_cursor_failure_aborts() {
        struct Failing(usize);
        impl RowCursor for Failing {
            fn next_row(&mut self) -> std::result::Result<Option<Row>, crate::error::CursorError> {
                if self.0 == 0 {
                    return Err(crate::error::CursorError::new("context canceled"));
                }
                self.0 -= 1;
                Ok(Some(row(1, "a", Some(self.0 as i64))))
            }
        }

        let layout = OwnerLayout::new();
        let err = Materializer::new(&layout)
            .materialize_one(Failing(2))
            .unwrap_err();
        assert!(matches!(err, MaterializeError::Cursor(_)));
    }

    #[test]
    fn test_list_strategy_from_str() {
        assert_eq!("Grouped".parse::<ListStrategy>(), Ok(ListStrategy::Grouped));
        assert!("sorted".parse::<ListStrategy>().is_err());
    }
}
