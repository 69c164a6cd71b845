// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! SQL rendering for single and paged reads

use super::StorageError;
use crate::model::ListRequest;
use crate::row::ColumnContract;

/// Validate `order_by` against the root table's columns
///
/// Accepts `column`, `column asc` or `column desc`, case-insensitive
/// direction. Returns the qualified ORDER BY term.
pub fn order_term(contract: &ColumnContract, order_by: &str) -> Result<String, StorageError> {
    let root = contract.root();
    let mut parts = order_by.split_whitespace();
    let column = parts
        .next()
        .ok_or_else(|| StorageError::InvalidOrderBy(order_by.to_string()))?;
    let direction = match parts.next().map(|d| d.to_ascii_lowercase()) {
        None => None,
        Some(d) if d == "asc" || d == "desc" => Some(d.to_uppercase()),
        Some(_) => return Err(StorageError::InvalidOrderBy(order_by.to_string())),
    };
    if parts.next().is_some() || root.index_of(column).is_err() {
        return Err(StorageError::InvalidOrderBy(order_by.to_string()));
    }

    Ok(match direction {
        Some(direction) => format!("{}.{} {}", root.table(), column, direction),
        None => format!("{}.{}", root.table(), column),
    })
}

/// ORDER BY list that is total over roots
///
/// A non-id term gets the root id appended so roots with equal values keep
/// a fixed order across pages.
fn total_order(root: &str, order: &str) -> String {
    let id = format!("{}.id", root);
    match order.strip_prefix(id.as_str()) {
        Some("") | Some(" ASC") | Some(" DESC") => order.to_string(),
        _ => format!("{}, {}", order, id),
    }
}

/// Render a paged list query
///
/// Paging applies to root rows, not to the fanned-out joined rows: the page
/// of root ids is selected in a subquery and the outer query repeats the same
/// total order, so every root's rows are contiguous.
pub fn list_sql(contract: &ColumnContract, req: &ListRequest) -> Result<String, StorageError> {
    let mut req = req.clone();
    req.prepare();

    let root = contract.root().table();
    let order = total_order(root, &order_term(contract, &req.order_by)?);
    let filter = if req.id_list.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}.id = ANY($1)", root)
    };
    let page = format!(
        "{root}.id IN (SELECT {root}.id FROM {root}{filter} ORDER BY {order} LIMIT {limit} OFFSET {offset})",
        root = root,
        filter = filter,
        order = order,
        limit = req.limit,
        offset = req.offset(),
    );

    Ok(format!(
        "{} ORDER BY {}",
        contract.select_sql(Some(&page)),
        order
    ))
}
