// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Nullable join binder
//!
//! Decides per row whether a LEFT JOINed segment matched, using the segment's
//! sentinel column, and decodes the child value when it did.

use crate::error::DecodeError;
use crate::row::{FromValue, Row, Segment, Value};

/// One segment's columns within one row
#[derive(Debug, Clone, Copy)]
pub struct SegmentView<'r> {
    row: &'r Row,
    segment: &'r Segment,
}

impl<'r> SegmentView<'r> {
    pub fn new(row: &'r Row, segment: &'r Segment) -> Self {
        Self { row, segment }
    }

    pub fn table(&self) -> &'static str {
        self.segment.table()
    }

    fn cell(&self, index: usize) -> Result<&'r Value, DecodeError> {
        self.row.get(index).ok_or(DecodeError::ColumnCount {
            expected: self.segment.end(),
            actual: self.row.len(),
        })
    }

    /// Whether the LEFT JOIN matched for this row
    pub fn is_matched(&self) -> Result<bool, DecodeError> {
        Ok(!self.cell(self.segment.sentinel_index())?.is_null())
    }

    /// Typed value of a named column of this segment
    pub fn get<T: FromValue>(&self, column: &str) -> Result<T, DecodeError> {
        let value = self.cell(self.segment.index_of(column)?)?;
        T::from_value(column, value).map_err(|e| qualify(e, self.segment.table()))
    }

    /// Typed value of the sentinel column
    pub fn sentinel<T: FromValue>(&self) -> Result<T, DecodeError> {
        let index = self.segment.sentinel_index();
        let name = self
            .segment
            .columns()
            .get(index - self.segment.start())
            .map_or("?", |c| c.name);
        T::from_value(name, self.cell(index)?).map_err(|e| qualify(e, self.segment.table()))
    }
}

fn qualify(err: DecodeError, table: &str) -> DecodeError {
    match err {
        DecodeError::UnexpectedNull { column } => DecodeError::UnexpectedNull {
            column: format!("{}.{}", table, column),
        },
        DecodeError::TypeMismatch {
            column,
            expected,
            found,
        } => DecodeError::TypeMismatch {
            column: format!("{}.{}", table, column),
            expected,
            found,
        },
        DecodeError::Malformed { column, message } => DecodeError::Malformed {
            column: format!("{}.{}", table, column),
            message,
        },
        other => other,
    }
}

/// Decode a child value from a segment that is known to have matched
pub trait JoinDecode: Sized {
    fn decode(view: &SegmentView<'_>) -> Result<Self, DecodeError>;
}

/// Bind a LEFT JOINed segment: `None` when the join did not match
pub fn bind<T: JoinDecode>(row: &Row, segment: &Segment) -> Result<Option<T>, DecodeError> {
    bind_with(row, segment, T::decode)
}

/// [`bind`] with an explicit decoder, for values that are not [`JoinDecode`]
pub fn bind_with<T, F>(row: &Row, segment: &Segment, decode: F) -> Result<Option<T>, DecodeError>
where
    F: FnOnce(&SegmentView<'_>) -> Result<T, DecodeError>,
{
    let view = SegmentView::new(row, segment);
    if !view.is_matched()? {
        return Ok(None);
    }
    decode(&view).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::{ColumnContract, ColumnDef, ColumnType, SegmentDef, SegmentId};

    static OWNERS: SegmentDef = SegmentDef {
        table: "owners",
        columns: &[ColumnDef::required("id", ColumnType::Int)],
        sentinel: 0,
    };

    static TAGS: SegmentDef = SegmentDef {
        table: "tags",
        columns: &[
            ColumnDef::required("id", ColumnType::Int),
            ColumnDef::required("label", ColumnType::Text),
            ColumnDef::nullable("note", ColumnType::Text),
        ],
        sentinel: 0,
    };

    #[derive(Debug, PartialEq)]
    struct Tag {
        id: i64,
        label: String,
        note: Option<String>,
    }

    impl JoinDecode for Tag {
        fn decode(view: &SegmentView<'_>) -> Result<Self, DecodeError> {
            Ok(Tag {
                id: view.get("id")?,
                label: view.get("label")?,
                note: view.get("note")?,
            })
        }
    }

    fn contract() -> (ColumnContract, SegmentId) {
        let mut builder = ColumnContract::builder("owner", &OWNERS);
        let tags = builder.join(&TAGS, "tags.owner_id = owners.id");
        (builder.build(), tags)
    }

    #[test]
    fn test_unmatched_join_is_absent() {
        let (contract, tags) = contract();
        let row = Row::new(vec![Value::Int(1), Value::Null, Value::Null, Value::Null]);
        let tag: Option<Tag> = bind(&row, contract.segment(tags)).unwrap();
        assert!(tag.is_none());
    }

    #[test]
    fn test_matched_join_decodes() {
        let (contract, tags) = contract();
        let row = Row::new(vec![
            Value::Int(1),
            Value::Int(9),
            Value::Text("x".into()),
            Value::Null,
        ]);
        let tag: Option<Tag> = bind(&row, contract.segment(tags)).unwrap();
        assert_eq!(
            tag,
            Some(Tag {
                id: 9,
                label: "x".into(),
                note: None
            })
        );
    }

    #[test]
    fn test_null_in_matched_segment_is_fatal() {
        let (contract, tags) = contract();
        let row = Row::new(vec![Value::Int(1), Value::Int(9), Value::Null, Value::Null]);
        let err = bind::<Tag>(&row, contract.segment(tags)).unwrap_err();
        assert_eq!(
            err,
            DecodeError::UnexpectedNull {
                column: "tags.label".into()
            }
        );
    }

    #[test]
    fn test_bind_with_scalar_value() {
        let (contract, tags) = contract();
        let row = Row::new(vec![
            Value::Int(1),
            Value::Int(4),
            Value::Text("y".into()),
            Value::Null,
        ]);
        let id = bind_with(&row, contract.segment(tags), |v| v.sentinel::<i64>()).unwrap();
        assert_eq!(id, Some(4));
    }
}
