// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Nested attacher for two-level collections
//!
//! A two-level child (an education owning files, an experience owning
//! specialization tags) is resolved by its parent id within the current root,
//! created lazily from the first row that carries it, and then receives
//! grandchildren deduplicated under a seen-set private to that parent. The
//! same grandchild key may therefore appear once under each of several
//! parents.

use std::collections::HashMap;
use std::hash::Hash;

use super::binder::{JoinDecode, SegmentView};
use super::dedup::DedupIndex;
use crate::error::DecodeError;
use crate::row::{Row, Segment};

/// A child that owns a nested collection of its own
pub trait TwoLevel: JoinDecode {
    type Child;
    type ChildKey: Eq + Hash + Clone;

    fn decode_child(view: &SegmentView<'_>) -> Result<Self::Child, DecodeError>;

    fn child_key(child: &Self::Child) -> Self::ChildKey;

    fn children_mut(&mut self) -> &mut Vec<Self::Child>;
}

/// Two-level collection slot of one root
pub struct NestedSlot<P: TwoLevel> {
    positions: HashMap<i64, usize>,
    parents: Vec<P>,
    children_seen: Vec<DedupIndex<P::ChildKey>>,
}

impl<P: TwoLevel> NestedSlot<P> {
    pub fn new() -> Self {
        Self {
            positions: HashMap::new(),
            parents: Vec::new(),
            children_seen: Vec::new(),
        }
    }

    /// Absorb one row: resolve the parent, then attach its grandchild
    pub fn attach(
        &mut self,
        row: &Row,
        parent: &Segment,
        child: &Segment,
    ) -> Result<(), DecodeError> {
        let parent_view = SegmentView::new(row, parent);
        let child_view = SegmentView::new(row, child);

        if !parent_view.is_matched()? {
            if child_view.is_matched()? {
                return Err(DecodeError::OrphanSegment {
                    table: child.table().to_string(),
                    parent: parent.table().to_string(),
                });
            }
            return Ok(());
        }

        let parent_id: i64 = parent_view.sentinel()?;
        let position = match self.positions.get(&parent_id) {
            Some(&position) => position,
            None => {
                let value = P::decode(&parent_view)?;
                let position = self.parents.len();
                self.parents.push(value);
                self.children_seen.push(DedupIndex::new());
                self.positions.insert(parent_id, position);
                log::trace!("{}: new parent {}", parent.table(), parent_id);
                position
            }
        };

        if !child_view.is_matched()? {
            return Ok(());
        }

        let value = P::decode_child(&child_view)?;
        if self.children_seen[position].mark_seen(P::child_key(&value)) {
            self.parents[position].children_mut().push(value);
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Close the slot; children were already deduplicated per parent on attach
    pub fn finalize(self) -> Vec<P> {
        self.parents
    }
}

impl<P: TwoLevel> Default for NestedSlot<P> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row::{ColumnContract, ColumnDef, ColumnType, SegmentDef, SegmentId, Value};

    static ROOTS: SegmentDef = SegmentDef {
        table: "roots",
        columns: &[ColumnDef::required("id", ColumnType::Int)],
        sentinel: 0,
    };

    static PARENTS: SegmentDef = SegmentDef {
        table: "parents",
        columns: &[
            ColumnDef::required("id", ColumnType::Int),
            ColumnDef::required("name", ColumnType::Text),
        ],
        sentinel: 0,
    };

    static LEAVES: SegmentDef = SegmentDef {
        table: "leaves",
        columns: &[ColumnDef::required("id", ColumnType::Int)],
        sentinel: 0,
    };

    #[derive(Debug)]
    struct Parent {
        id: i64,
        name: String,
        leaves: Vec<i64>,
    }

    impl JoinDecode for Parent {
        fn decode(view: &SegmentView<'_>) -> Result<Self, DecodeError> {
            Ok(Parent {
                id: view.get("id")?,
                name: view.get("name")?,
                leaves: Vec::new(),
            })
        }
    }

    impl TwoLevel for Parent {
        type Child = i64;
        type ChildKey = i64;

        fn decode_child(view: &SegmentView<'_>) -> Result<i64, DecodeError> {
            view.get("id")
        }

        fn child_key(child: &i64) -> i64 {
            *child
        }

        fn children_mut(&mut self) -> &mut Vec<i64> {
            &mut self.leaves
        }
    }

    fn contract() -> (ColumnContract, SegmentId, SegmentId) {
        let mut builder = ColumnContract::builder("roots", &ROOTS);
        let parents = builder.join(&PARENTS, "parents.root_id = roots.id");
        let leaves = builder.join(&LEAVES, "leaves.parent_id = parents.id");
        (builder.build(), parents, leaves)
    }

    fn row(parent: Option<i64>, leaf: Option<i64>) -> Row {
        Row::new(vec![
            Value::Int(1),
            parent.into(),
            parent.map(|p| format!("p{}", p)).into(),
            leaf.into(),
        ])
    }

    #[test]
    fn test_grandchildren_scoped_per_parent() {
        let (contract, parents, leaves) = contract();
        let mut slot = NestedSlot::<Parent>::new();
        for r in [
            row(Some(1), Some(10)),
            row(Some(1), Some(11)),
            row(Some(2), Some(10)),
            row(Some(2), Some(11)),
            row(Some(1), Some(10)),
        ] {
            slot.attach(&r, contract.segment(parents), contract.segment(leaves))
                .unwrap();
        }

        let out = slot.finalize();
        assert_eq!(out.len(), 2);
        assert_eq!((out[0].id, out[0].name.as_str()), (1, "p1"));
        assert_eq!(out[0].leaves, vec![10, 11]);
        assert_eq!(out[1].leaves, vec![10, 11]);
    }

    #[test]
    fn test_attach_keeps_first_seen_order_without_final_pass() {
        let (contract, parents, leaves) = contract();
        let mut slot = NestedSlot::<Parent>::new();
        for leaf in [12, 10, 12, 11, 10, 12, 11] {
            slot.attach(&row(Some(1), Some(leaf)), contract.segment(parents), contract.segment(leaves))
                .unwrap();
        }
        assert_eq!(slot.parents[0].leaves, vec![12, 10, 11]);

        let out = slot.finalize();
        assert_eq!(out[0].leaves, vec![12, 10, 11]);
    }

    #[test]
    fn test_parent_without_children() {
        let (contract, parents, leaves) = contract();
        let mut slot = NestedSlot::<Parent>::new();
        slot.attach(&row(Some(3), None), contract.segment(parents), contract.segment(leaves))
            .unwrap();
        slot.attach(&row(None, None), contract.segment(parents), contract.segment(leaves))
            .unwrap();
        let out = slot.finalize();
        assert_eq!(out.len(), 1);
        assert!(out[0].leaves.is_empty());
    }

    #[test]
    fn test_orphan_grandchild_is_rejected() {
        let (contract, parents, leaves) = contract();
        let mut slot = NestedSlot::<Parent>::new();
        let err = slot
            .attach(&row(None, Some(5)), contract.segment(parents), contract.segment(leaves))
            .unwrap_err();
        assert!(matches!(err, DecodeError::OrphanSegment { .. }));
    }
}
