// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Column contracts
//!
//! A [`ColumnContract`] is the ordered projection of one wide query: the root
//! table's columns followed by the columns of every LEFT JOINed table, in
//! declaration order. The same contract renders the SQL projection and drives
//! row decoding, so the SELECT list and the scan destinations cannot drift
//! apart.

use serde::Serialize;

use super::{ColumnType, Row};
use crate::error::DecodeError;

/// One projected column of a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub ty: ColumnType,
    /// Whether the column may be NULL in its own table
    pub nullable: bool,
}

impl ColumnDef {
    pub const fn required(name: &'static str, ty: ColumnType) -> Self {
        Self {
            name,
            ty,
            nullable: false,
        }
    }

    pub const fn nullable(name: &'static str, ty: ColumnType) -> Self {
        Self {
            name,
            ty,
            nullable: true,
        }
    }
}

/// Projection of one table inside a wide query
///
/// `sentinel` is the offset of the column whose NULL means the LEFT JOIN did
/// not match. It is normally the primary key; tables without a surrogate key
/// use their business key instead.
#[derive(Debug, PartialEq, Eq)]
pub struct SegmentDef {
    pub table: &'static str,
    pub columns: &'static [ColumnDef],
    pub sentinel: usize,
}

impl SegmentDef {
    pub fn position(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == column)
    }

    pub fn sentinel_column(&self) -> Option<&ColumnDef> {
        self.columns.get(self.sentinel)
    }
}

/// Handle to a segment within one contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentId(usize);

impl SegmentId {
    /// The root segment is always the first one
    pub const ROOT: SegmentId = SegmentId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

/// Link table joined ahead of a segment without projecting any columns
#[derive(Debug, Clone)]
struct Via {
    table: &'static str,
    on: String,
}

/// A segment placed at a fixed column range of the contract
#[derive(Debug)]
pub struct Segment {
    def: &'static SegmentDef,
    start: usize,
    join: Option<String>,
    via: Option<Via>,
}

impl Segment {
    pub fn table(&self) -> &'static str {
        self.def.table
    }

    pub fn columns(&self) -> &'static [ColumnDef] {
        self.def.columns
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.start + self.def.columns.len()
    }

    /// Absolute row index of the sentinel column
    pub fn sentinel_index(&self) -> usize {
        self.start + self.def.sentinel
    }

    /// Absolute row index of a named column
    pub fn index_of(&self, column: &str) -> Result<usize, DecodeError> {
        self.def
            .position(column)
            .map(|offset| self.start + offset)
            .ok_or_else(|| DecodeError::UnknownColumn {
                table: self.def.table.to_string(),
                column: column.to_string(),
            })
    }

    pub fn join_condition(&self) -> Option<&str> {
        self.join.as_deref()
    }

    pub fn is_root(&self) -> bool {
        self.join.is_none()
    }

    fn render_join(&self, sql: &mut String) {
        if let Some(via) = &self.via {
            sql.push_str(&format!(" LEFT JOIN {} ON {}", via.table, via.on));
        }
        if let Some(on) = &self.join {
            sql.push_str(&format!(" LEFT JOIN {} ON {}", self.def.table, on));
        }
    }
}

/// Ordered column layout of one wide query
#[derive(Debug)]
pub struct ColumnContract {
    name: &'static str,
    segments: Vec<Segment>,
    width: usize,
}

/// Builder assembling a contract segment by segment
pub struct ContractBuilder {
    name: &'static str,
    segments: Vec<Segment>,
    width: usize,
}

impl ContractBuilder {
    /// Append a LEFT JOINed table; `on` is the join condition
    pub fn join(&mut self, def: &'static SegmentDef, on: impl Into<String>) -> SegmentId {
        self.push(def, on.into(), None)
    }

    /// Append a table reached through an unprojected link table
    ///
    /// Renders `LEFT JOIN link ON link_on LEFT JOIN def ON on`.
    pub fn join_through(
        &mut self,
        link: &'static str,
        link_on: impl Into<String>,
        def: &'static SegmentDef,
        on: impl Into<String>,
    ) -> SegmentId {
        let via = Via {
            table: link,
            on: link_on.into(),
        };
        self.push(def, on.into(), Some(via))
    }

    fn push(&mut self, def: &'static SegmentDef, on: String, via: Option<Via>) -> SegmentId {
        let id = SegmentId(self.segments.len());
        self.segments.push(Segment {
            def,
            start: self.width,
            join: Some(on),
            via,
        });
        self.width += def.columns.len();
        id
    }

    pub fn build(self) -> ColumnContract {
        ColumnContract {
            name: self.name,
            segments: self.segments,
            width: self.width,
        }
    }
}

impl ColumnContract {
    /// Start a contract rooted at `root`; the root is [`SegmentId::ROOT`]
    pub fn builder(name: &'static str, root: &'static SegmentDef) -> ContractBuilder {
        ContractBuilder {
            name,
            segments: vec![Segment {
                def: root,
                start: 0,
                join: None,
                via: None,
            }],
            width: root.columns.len(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of projected columns
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn segment(&self, id: SegmentId) -> &Segment {
        &self.segments[id.0]
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn root(&self) -> &Segment {
        &self.segments[SegmentId::ROOT.0]
    }

    /// Column definition at an absolute row index, with its table
    pub fn column(&self, index: usize) -> Option<(&'static str, &ColumnDef)> {
        self.segments
            .iter()
            .find(|s| index >= s.start() && index < s.end())
            .map(|s| (s.table(), &s.columns()[index - s.start()]))
    }

    /// Qualified `table.column` names in projection order
    pub fn qualified_columns(&self) -> Vec<String> {
        self.segments
            .iter()
            .flat_map(|s| s.columns().iter().map(move |c| format!("{}.{}", s.table(), c.name)))
            .collect()
    }

    /// Render the wide SELECT whose projection is this contract
    pub fn select_sql(&self, where_clause: Option<&str>) -> String {
        let mut sql = format!(
            "SELECT {} FROM {}",
            self.qualified_columns().join(", "),
            self.root().table()
        );
        for segment in self.segments.iter().skip(1) {
            segment.render_join(&mut sql);
        }
        if let Some(filter) = where_clause {
            sql.push_str(" WHERE ");
            sql.push_str(filter);
        }
        sql
    }

    /// Check a row's width and per-column types against the contract
    pub fn check_row(&self, row: &Row) -> Result<(), DecodeError> {
        if row.len() != self.width {
            return Err(DecodeError::ColumnCount {
                expected: self.width,
                actual: row.len(),
            });
        }

        for segment in &self.segments {
            for (offset, column) in segment.columns().iter().enumerate() {
                let value = &row.values()[segment.start() + offset];
                if !value.fits(column.ty) {
                    return Err(DecodeError::TypeMismatch {
                        column: format!("{}.{}", segment.table(), column.name),
                        expected: column.ty,
                        found: value.type_name(),
                    });
                }
            }
        }

        Ok(())
    }
}
