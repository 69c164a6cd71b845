// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Patient profile aggregate

use chrono::NaiveDate;
use serde::Serialize;

use super::File;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Patient {
    pub id: i64,
    #[serde(skip_serializing)]
    pub account_id: i64,
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
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub body: Body,
    #[serde(flatten)]
    pub blood: Blood,
    #[serde(flatten)]
    pub vision: Vision,
    #[serde(flatten)]
    pub disability: Disability,
    #[serde(flatten)]
    pub lifestyle: Lifestyle,
    pub metal_components: Vec<MetalComponent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Body {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Blood {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rh: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Vision {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left_eye: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right_eye: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Disability {
    #[serde(rename = "disability_group", skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(rename = "disability_reason", skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(rename = "disability_document_num", skip_serializing_if = "Option::is_none")]
    pub document_num: Option<String>,
    #[serde(rename = "disability_files", skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<File>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Lifestyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work: Option<String>,
}

/// Metal implant recorded for a patient
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetalComponent {
    pub id: i64,
    #[serde(skip_serializing)]
    pub patient_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metal: Option<String>,
    pub organ_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
