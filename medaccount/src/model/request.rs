// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Paging parameters for list reads

use serde::{Deserialize, Serialize};

pub const DEFAULT_ORDER_BY: &str = "id";
pub const DEFAULT_LIMIT: u64 = 10;
pub const DEFAULT_PAGE: u64 = 1;

/// Paging and filter parameters of a list read
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListRequest {
    pub order_by: String,
    pub limit: u64,
    pub page: u64,
    /// Restrict to these root ids; empty means no filter
    pub id_list: Vec<i64>,
}

impl ListRequest {
    /// Fill unset fields with their defaults
    pub fn prepare(&mut self) {
        if self.order_by.is_empty() {
            self.order_by = DEFAULT_ORDER_BY.to_string();
        }
        if self.limit == 0 {
            self.limit = DEFAULT_LIMIT;
        }
        if self.page == 0 {
            self.page = DEFAULT_PAGE;
        }
    }

    pub fn offset(&self) -> u64 {
        self.limit.saturating_mul(self.page.saturating_sub(1))
    }
}
