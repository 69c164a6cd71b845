// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Specialist profile aggregate

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::File;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Specialist {
    pub id: i64,
    pub updated_at: DateTime<Utc>,
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
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
    pub medical_category: Option<String>,
    pub cures_diseases: Vec<i64>,
    pub services: Vec<i64>,
    pub treats_adults: bool,
    pub treats_children: bool,
    pub specializations: Vec<Specialization>,
    pub educations: Vec<Education>,
    pub experiences: Vec<Experience>,
    pub associations: Vec<Association>,
    pub patents: Vec<Patent>,
    pub publication_links: Vec<PublicationLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Specialization {
    pub specialization_id: i64,
    pub start: NaiveDate,
}

/// Education entry; owns the diploma and certificate files
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Education {
    pub id: i64,
    #[serde(skip_serializing)]
    pub profile_id: i64,
    pub institution_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub faculty_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub degree_id: Option<i64>,
    pub graduation: NaiveDate,
    pub verified: bool,
    pub files: Vec<File>,
}

/// Work experience; tagged with specialization ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Experience {
    pub id: i64,
    #[serde(skip_serializing)]
    pub profile_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    pub company: String,
    pub start: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish: Option<NaiveDate>,
    pub specializations: Vec<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Association {
    pub id: i64,
    #[serde(skip_serializing)]
    pub profile_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub association_id: Option<i64>,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Patent {
    pub id: i64,
    #[serde(skip_serializing)]
    pub profile_id: i64,
    pub number: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublicationLink {
    pub id: i64,
    #[serde(skip_serializing)]
    pub profile_id: i64,
    pub title: String,
    pub link: String,
}
