// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Shared helpers for building wide rows by table and column name

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use medaccount::row::{ColumnContract, MemoryCursor, Row, Value};

pub type Cells = Vec<(&'static str, &'static str, Value)>;

/// Builds one row of `contract`; unset columns are NULL
pub struct RowBuilder<'c> {
    contract: &'c ColumnContract,
    values: Vec<Value>,
}

impl<'c> RowBuilder<'c> {
    pub fn new(contract: &'c ColumnContract) -> Self {
        Self {
            contract,
            values: vec![Value::Null; contract.width()],
        }
    }

    pub fn set(mut self, table: &str, column: &str, value: impl Into<Value>) -> Self {
        let segment = self
            .contract
            .segments()
            .iter()
            .find(|s| s.table() == table)
            .unwrap_or_else(|| panic!("no segment for table {}", table));
        let index = segment
            .index_of(column)
            .unwrap_or_else(|e| panic!("{}", e));
        self.values[index] = value.into();
        self
    }

    pub fn with(mut self, cells: &Cells) -> Self {
        for (table, column, value) in cells {
            self = self.set(table, column, value.clone());
        }
        self
    }

    pub fn build(self) -> Row {
        Row::new(self.values)
    }
}

/// One row per combination of the given segment groups, first group outermost
///
/// An empty group stands for an unmatched LEFT JOIN and contributes NULLs.
pub fn cartesian(contract: &ColumnContract, root: &Cells, groups: &[Vec<Cells>]) -> Vec<Row> {
    let mut partial: Vec<Cells> = vec![root.clone()];
    for group in groups {
        if group.is_empty() {
            continue;
        }
        let mut next = Vec::with_capacity(partial.len() * group.len());
        for prefix in &partial {
            for cells in group {
                let mut combined = prefix.clone();
                combined.extend(cells.iter().cloned());
                next.push(combined);
            }
        }
        partial = next;
    }
    partial
        .iter()
        .map(|cells| RowBuilder::new(contract).with(cells).build())
        .collect()
}

pub fn cursor(rows: Vec<Row>) -> MemoryCursor {
    MemoryCursor::new(rows)
}

pub fn ts(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("bad day {}", day))
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

// accounts

pub fn account(id: i64, login: &'static str) -> Cells {
    vec![
        ("accounts", "id", id.into()),
        ("accounts", "created_at", ts(1).into()),
        ("accounts", "updated_at", ts(2).into()),
        ("accounts", "login", login.into()),
        ("accounts", "password", "hashed".into()),
        ("accounts", "first_name", "Olena".into()),
        ("accounts", "last_name", "Koval".into()),
    ]
}

pub fn email(id: i64, address: &'static str) -> Cells {
    vec![
        ("account_emails", "id", id.into()),
        ("account_emails", "account_id", 1i64.into()),
        ("account_emails", "type", "personal".into()),
        ("account_emails", "email", address.into()),
        ("account_emails", "verified", true.into()),
        ("account_emails", "open", false.into()),
    ]
}

pub fn phone(id: i64, code: &'static str, number: &'static str) -> Cells {
    vec![
        ("account_phones", "id", id.into()),
        ("account_phones", "account_id", 1i64.into()),
        ("account_phones", "type", "mobile".into()),
        ("account_phones", "code", code.into()),
        ("account_phones", "phone", number.into()),
        ("account_phones", "verified", false.into()),
        ("account_phones", "open", true.into()),
    ]
}

pub fn address(id: i64, city_id: i64, text: &'static str) -> Cells {
    vec![
        ("account_addresses", "id", id.into()),
        ("account_addresses", "account_id", 1i64.into()),
        ("account_addresses", "type", "home".into()),
        ("account_addresses", "city_id", city_id.into()),
        ("account_addresses", "address", text.into()),
        ("account_addresses", "open", false.into()),
    ]
}

pub fn language(code: &'static str, level: &'static str) -> Cells {
    vec![
        ("account_languages", "account_id", 1i64.into()),
        ("account_languages", "language", code.into()),
        ("account_languages", "level", level.into()),
    ]
}

// specialists

pub fn specialist(id: i64) -> Cells {
    vec![
        ("specialist_profiles", "id", id.into()),
        ("specialist_profiles", "updated_at", ts(3).into()),
        ("specialist_profiles", "about", "Cardiologist".into()),
        ("specialist_profiles", "treats_adults", true.into()),
        ("specialist_profiles", "treats_children", false.into()),
        ("accounts", "first_name", "Taras".into()),
        ("accounts", "last_name", "Shevchuk".into()),
    ]
}

pub fn specialization(id: i64) -> Cells {
    vec![
        ("specialist_specializations", "specialization_id", id.into()),
        ("specialist_specializations", "start", date(2015, 9, 1).into()),
    ]
}

pub fn education(id: i64) -> Cells {
    vec![
        ("specialist_educations", "id", id.into()),
        ("specialist_educations", "profile_id", 1i64.into()),
        ("specialist_educations", "institution_id", (100 + id).into()),
        ("specialist_educations", "graduation", date(2010, 6, 30).into()),
        ("specialist_educations", "verified", true.into()),
    ]
}

pub fn file(id: i64) -> Cells {
    vec![
        ("account_files", "id", id.into()),
        ("account_files", "created_at", ts(4).into()),
        ("account_files", "updated_at", ts(4).into()),
        ("account_files", "account_id", 1i64.into()),
        ("account_files", "name", "diploma.pdf".into()),
    ]
}

pub fn experience(id: i64, finish: Option<NaiveDate>) -> Cells {
    vec![
        ("specialist_experiences", "id", id.into()),
        ("specialist_experiences", "profile_id", 1i64.into()),
        ("specialist_experiences", "company", "City Hospital".into()),
        ("specialist_experiences", "start", date(2012, 1, 1).into()),
        ("specialist_experiences", "finish", finish.into()),
    ]
}

pub fn experience_tag(specialization_id: i64) -> Cells {
    vec![(
        "specialist_experience_specializations",
        "specialization_id",
        specialization_id.into(),
    )]
}

pub fn concat(parts: &[Cells]) -> Cells {
    parts.iter().flat_map(|p| p.iter().cloned()).collect()
}
