// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Account aggregate and its contact collections

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
    pub login: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub father_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sex: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub emails: Vec<Email>,
    pub phones: Vec<Phone>,
    pub addresses: Vec<Address>,
    pub languages: Vec<Language>,
    pub profiles: Profiles,
}

/// Profile ids linked to an account, surfaced through joins
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Profiles {
    pub patient_profile_id: Option<i64>,
    pub specialist_profile_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Email {
    pub id: i64,
    #[serde(skip_serializing)]
    pub account_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "value")]
    pub email: String,
    pub verified: bool,
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Phone {
    pub id: i64,
    #[serde(skip_serializing)]
    pub account_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub code: String,
    #[serde(rename = "value")]
    pub phone: String,
    pub verified: bool,
    pub open: bool,
}

impl Phone {
    /// Country code followed by the number, as used for display and dedup
    pub fn full_number(&self) -> String {
        format!("{}{}", self.code, self.phone)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    pub id: i64,
    #[serde(skip_serializing)]
    pub account_id: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub city_id: i64,
    pub address: String,
    pub open: bool,
}

/// Spoken language; identified by its code, there is no surrogate id
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Language {
    #[serde(skip_serializing)]
    pub account_id: i64,
    pub language: String,
    pub level: String,
}
