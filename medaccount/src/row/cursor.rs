// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Rows and forward-only row cursors

use std::collections::VecDeque;

use super::Value;
use crate::error::CursorError;

/// One projected row, values in column contract order
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<Value>> for Row {
    fn from(values: Vec<Value>) -> Self {
        Row::new(values)
    }
}

/// Sequential, forward-only stream of rows
///
/// End of stream is `Ok(None)`. Read failures, including cancellation of the
/// surrounding request, surface as `Err` on the next read.
pub trait RowCursor {
    fn next_row(&mut self) -> Result<Option<Row>, CursorError>;
}

impl<C: RowCursor + ?Sized> RowCursor for &mut C {
    fn next_row(&mut self) -> Result<Option<Row>, CursorError> {
        (**self).next_row()
    }
}

impl<C: RowCursor + ?Sized> RowCursor for Box<C> {
    fn next_row(&mut self) -> Result<Option<Row>, CursorError> {
        (**self).next_row()
    }
}

/// In-memory cursor over already decoded rows
#[derive(Debug, Default, Clone)]
pub struct MemoryCursor {
    rows: VecDeque<Row>,
}

impl MemoryCursor {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows: rows.into() }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl RowCursor for MemoryCursor {
    fn next_row(&mut self) -> Result<Option<Row>, CursorError> {
        Ok(self.rows.pop_front())
    }
}

impl FromIterator<Row> for MemoryCursor {
    fn from_iter<I: IntoIterator<Item = Row>>(iter: I) -> Self {
        Self {
            rows: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_cursor_drains_in_order() {
        let mut cursor = MemoryCursor::new(vec![
            Row::new(vec![Value::Int(1)]),
            Row::new(vec![Value::Int(2)]),
        ]);
        assert_eq!(cursor.remaining(), 2);
        assert_eq!(cursor.next_row().unwrap().unwrap().get(0), Some(&Value::Int(1)));
        assert_eq!(cursor.next_row().unwrap().unwrap().get(0), Some(&Value::Int(2)));
        assert!(cursor.next_row().unwrap().is_none());
        assert!(cursor.next_row().unwrap().is_none());
    }

    #[test]
    fn test_cursor_by_mutable_reference() {
        fn drain(mut cursor: impl RowCursor) -> usize {
            let mut n = 0;
            while let Ok(Some(_)) = cursor.next_row() {
                n += 1;
            }
            n
        }

        let mut cursor: MemoryCursor = (0..3).map(|i| Row::new(vec![Value::Int(i)])).collect();
        assert_eq!(drain(&mut cursor), 3);
        assert_eq!(cursor.remaining(), 0);
    }
}
