// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Dedup indices and ordered collection slots

use std::collections::HashSet;
use std::hash::Hash;

use super::binder::{bind_with, JoinDecode, SegmentView};
use crate::error::DecodeError;
use crate::row::{Row, Segment};

/// Seen-set for one collection of one root
#[derive(Debug, Clone)]
pub struct DedupIndex<K> {
    seen: HashSet<K>,
}

impl<K: Eq + Hash> DedupIndex<K> {
    pub fn new() -> Self {
        Self {
            seen: HashSet::new(),
        }
    }

    pub fn seen(&self, key: &K) -> bool {
        self.seen.contains(key)
    }

    /// Record `key`; returns `true` if it was not seen before
    pub fn mark_seen(&mut self, key: K) -> bool {
        self.seen.insert(key)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

impl<K: Eq + Hash> Default for DedupIndex<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered, deduplicated child collection of one root
///
/// Elements keep the order in which their keys were first seen.
#[derive(Debug, Clone)]
pub struct CollectionSlot<K, V> {
    index: DedupIndex<K>,
    items: Vec<V>,
}

impl<K: Eq + Hash, V> CollectionSlot<K, V> {
    pub fn new() -> Self {
        Self {
            index: DedupIndex::new(),
            items: Vec::new(),
        }
    }

    /// Append `value` unless `key` was already recorded
    pub fn push(&mut self, key: K, value: V) -> bool {
        if self.index.mark_seen(key) {
            self.items.push(value);
            true
        } else {
            false
        }
    }

    /// Bind `segment` for this row and append the child if it matched and is new
    pub fn absorb(
        &mut self,
        row: &Row,
        segment: &Segment,
        key: impl FnOnce(&V) -> K,
    ) -> Result<bool, DecodeError>
    where
        V: JoinDecode,
    {
        self.absorb_with(row, segment, V::decode, key)
    }

    pub fn absorb_with<D>(
        &mut self,
        row: &Row,
        segment: &Segment,
        decode: D,
        key: impl FnOnce(&V) -> K,
    ) -> Result<bool, DecodeError>
    where
        D: FnOnce(&SegmentView<'_>) -> Result<V, DecodeError>,
    {
        match bind_with(row, segment, decode)? {
            Some(value) => {
                let key = key(&value);
                Ok(self.push(key, value))
            }
            None => Ok(false),
        }
    }

    pub fn items(&self) -> &[V] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_vec(self) -> Vec<V> {
        self.items
    }
}

impl<K: Eq + Hash, V> Default for CollectionSlot<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Scalar surfaced through a join, set by the first row that carries it
#[derive(Debug, Clone, PartialEq)]
pub struct FirstNonNull<T>(Option<T>);

impl<T> FirstNonNull<T> {
    pub fn new() -> Self {
        Self(None)
    }

    /// Offer a candidate; ignored once a value is set or when `None`
    pub fn offer(&mut self, candidate: Option<T>) -> bool {
        if self.0.is_none() && candidate.is_some() {
            self.0 = candidate;
            true
        } else {
            false
        }
    }

    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    pub fn get(&self) -> Option<&T> {
        self.0.as_ref()
    }

    pub fn into_inner(self) -> Option<T> {
        self.0
    }
}

impl<T> Default for FirstNonNull<T> {
    fn default() -> Self {
        Self::new()
    }
}
