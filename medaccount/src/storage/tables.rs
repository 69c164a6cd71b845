// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Table names and per-table projections of the profile schema

use crate::row::{ColumnDef, ColumnType, SegmentDef};

pub const ACCOUNTS: &str = "accounts";
pub const ACCOUNT_FILES: &str = "account_files";
pub const ACCOUNT_EMAILS: &str = "account_emails";
pub const ACCOUNT_PHONES: &str = "account_phones";
pub const ACCOUNT_ADDRESSES: &str = "account_addresses";
pub const ACCOUNT_LANGUAGES: &str = "account_languages";

pub const PATIENT_PROFILES: &str = "patient_profiles";
pub const PATIENT_DISABILITY_FILES: &str = "patient_disability_files";
pub const PATIENT_METAL_COMPONENTS: &str = "patient_metal_components";

pub const SPECIALIST_PROFILES: &str = "specialist_profiles";
pub const SPECIALIST_SPECIALIZATIONS: &str = "specialist_specializations";
pub const SPECIALIST_CURES_DISEASES: &str = "specialist_cures_diseases";
pub const SPECIALIST_SERVICES: &str = "specialist_services";
pub const SPECIALIST_EDUCATIONS: &str = "specialist_educations";
pub const SPECIALIST_EDUCATION_FILES: &str = "specialist_education_files";
pub const SPECIALIST_EXPERIENCES: &str = "specialist_experiences";
pub const SPECIALIST_EXPERIENCE_SPECIALIZATIONS: &str = "specialist_experience_specializations";
pub const SPECIALIST_ASSOCIATIONS: &str = "specialist_associations";
pub const SPECIALIST_PATENTS: &str = "specialist_patents";
pub const SPECIALIST_PUBLICATION_LINKS: &str = "specialist_publication_links";

use ColumnType::{Bool, Date, Float, Int, Text, Timestamp};

const fn req(name: &'static str, ty: ColumnType) -> ColumnDef {
    ColumnDef::required(name, ty)
}

const fn opt(name: &'static str, ty: ColumnType) -> ColumnDef {
    ColumnDef::nullable(name, ty)
}

// accounts

pub static ACCOUNT_MAIN: SegmentDef = SegmentDef {
    table: ACCOUNTS,
    columns: &[
        req("id", Int),
        req("created_at", Timestamp),
        req("updated_at", Timestamp),
        opt("deleted_at", Timestamp),
        req("login", Text),
        req("password", Text),
        opt("first_name", Text),
        opt("father_name", Text),
        opt("last_name", Text),
        opt("sex", Text),
        opt("photo", Text),
        opt("birthday", Date),
        opt("language", Text),
        opt("country", Text),
    ],
    sentinel: 0,
};

pub static EMAILS: SegmentDef = SegmentDef {
    table: ACCOUNT_EMAILS,
    columns: &[
        req("id", Int),
        req("account_id", Int),
        req("type", Text),
        req("email", Text),
        req("verified", Bool),
        req("open", Bool),
    ],
    sentinel: 0,
};

pub static PHONES: SegmentDef = SegmentDef {
    table: ACCOUNT_PHONES,
    columns: &[
        req("id", Int),
        req("account_id", Int),
        req("type", Text),
        req("code", Text),
        req("phone", Text),
        req("verified", Bool),
        req("open", Bool),
    ],
    sentinel: 0,
};

pub static ADDRESSES: SegmentDef = SegmentDef {
    table: ACCOUNT_ADDRESSES,
    columns: &[
        req("id", Int),
        req("account_id", Int),
        req("type", Text),
        req("city_id", Int),
        req("address", Text),
        req("open", Bool),
    ],
    sentinel: 0,
};

/// No surrogate key; the language code marks a match
pub static LANGUAGES: SegmentDef = SegmentDef {
    table: ACCOUNT_LANGUAGES,
    columns: &[
        req("account_id", Int),
        req("language", Text),
        req("level", Text),
    ],
    sentinel: 1,
};

pub static PATIENT_PROFILE_REF: SegmentDef = SegmentDef {
    table: PATIENT_PROFILES,
    columns: &[req("id", Int)],
    sentinel: 0,
};

pub static SPECIALIST_PROFILE_REF: SegmentDef = SegmentDef {
    table: SPECIALIST_PROFILES,
    columns: &[req("id", Int)],
    sentinel: 0,
};

/// Account columns shown on a specialist profile
pub static SPECIALIST_ACCOUNT: SegmentDef = SegmentDef {
    table: ACCOUNTS,
    columns: &[
        opt("first_name", Text),
        opt("father_name", Text),
        opt("last_name", Text),
        opt("sex", Text),
        opt("photo", Text),
    ],
    sentinel: 0,
};

/// Account columns shown on a patient profile
pub static PATIENT_ACCOUNT: SegmentDef = SegmentDef {
    table: ACCOUNTS,
    columns: &[
        opt("first_name", Text),
        opt("father_name", Text),
        opt("last_name", Text),
        opt("sex", Text),
        opt("photo", Text),
        opt("birthday", Date),
    ],
    sentinel: 0,
};

/// Contact phone referenced by a profile
pub static PHONE_REF: SegmentDef = SegmentDef {
    table: ACCOUNT_PHONES,
    columns: &[req("code", Text), req("phone", Text)],
    sentinel: 1,
};

/// Contact email referenced by a profile
pub static EMAIL_REF: SegmentDef = SegmentDef {
    table: ACCOUNT_EMAILS,
    columns: &[req("email", Text)],
    sentinel: 0,
};

pub static FILES: SegmentDef = SegmentDef {
    table: ACCOUNT_FILES,
    columns: &[
        req("id", Int),
        req("created_at", Timestamp),
        req("updated_at", Timestamp),
        req("account_id", Int),
        req("name", Text),
        opt("description", Text),
    ],
    sentinel: 0,
};

// specialists

pub static SPECIALIST_MAIN: SegmentDef = SegmentDef {
    table: SPECIALIST_PROFILES,
    columns: &[
        req("id", Int),
        req("updated_at", Timestamp),
        opt("about", Text),
        opt("medical_category", Text),
        req("treats_adults", Bool),
        req("treats_children", Bool),
    ],
    sentinel: 0,
};

pub static SPECIALIZATIONS: SegmentDef = SegmentDef {
    table: SPECIALIST_SPECIALIZATIONS,
    columns: &[req("specialization_id", Int), req("start", Date)],
    sentinel: 0,
};

pub static CURES_DISEASES: SegmentDef = SegmentDef {
    table: SPECIALIST_CURES_DISEASES,
    columns: &[req("disease_id", Int)],
    sentinel: 0,
};

pub static SERVICES: SegmentDef = SegmentDef {
    table: SPECIALIST_SERVICES,
    columns: &[req("service_id", Int)],
    sentinel: 0,
};

pub static EDUCATIONS: SegmentDef = SegmentDef {
    table: SPECIALIST_EDUCATIONS,
    columns: &[
        req("id", Int),
        req("profile_id", Int),
        req("institution_id", Int),
        opt("faculty_id", Int),
        opt("department_id", Int),
        opt("form_id", Int),
        opt("degree_id", Int),
        req("graduation", Date),
        req("verified", Bool),
    ],
    sentinel: 0,
};

pub static EXPERIENCES: SegmentDef = SegmentDef {
    table: SPECIALIST_EXPERIENCES,
    columns: &[
        req("id", Int),
        req("profile_id", Int),
        opt("company_id", Int),
        req("company", Text),
        req("start", Date),
        opt("finish", Date),
    ],
    sentinel: 0,
};

pub static EXPERIENCE_SPECIALIZATIONS: SegmentDef = SegmentDef {
    table: SPECIALIST_EXPERIENCE_SPECIALIZATIONS,
    columns: &[req("specialization_id", Int)],
    sentinel: 0,
};

pub static ASSOCIATIONS: SegmentDef = SegmentDef {
    table: SPECIALIST_ASSOCIATIONS,
    columns: &[
        req("id", Int),
        req("profile_id", Int),
        opt("association_id", Int),
        req("name", Text),
        opt("job_title", Text),
    ],
    sentinel: 0,
};

pub static PATENTS: SegmentDef = SegmentDef {
    table: SPECIALIST_PATENTS,
    columns: &[
        req("id", Int),
        req("profile_id", Int),
        req("number", Text),
        req("name", Text),
        opt("link", Text),
    ],
    sentinel: 0,
};

pub static PUBLICATION_LINKS: SegmentDef = SegmentDef {
    table: SPECIALIST_PUBLICATION_LINKS,
    columns: &[
        req("id", Int),
        req("profile_id", Int),
        req("title", Text),
        req("link", Text),
    ],
    sentinel: 0,
};

// patients

pub static PATIENT_MAIN: SegmentDef = SegmentDef {
    table: PATIENT_PROFILES,
    columns: &[
        req("id", Int),
        req("account_id", Int),
        opt("height", Float),
        opt("weight", Float),
        opt("body_type", Text),
        opt("blood_type", Text),
        opt("rh", Bool),
        opt("left_eye", Float),
        opt("right_eye", Float),
        opt("disability_group", Text),
        opt("disability_reason", Text),
        opt("disability_document_num", Text),
        opt("activity", Text),
        opt("nutrition", Text),
        opt("work", Text),
    ],
    sentinel: 0,
};

/// Patient list rows carry only the id from the profile table
pub static PATIENT_LIST_MAIN: SegmentDef = SegmentDef {
    table: PATIENT_PROFILES,
    columns: &[req("id", Int)],
    sentinel: 0,
};

pub static METAL_COMPONENTS: SegmentDef = SegmentDef {
    table: PATIENT_METAL_COMPONENTS,
    columns: &[
        req("id", Int),
        req("profile_id", Int),
        opt("metal", Text),
        req("organ_id", Int),
        opt("description", Text),
    ],
    sentinel: 0,
};

/// Every segment definition, for consistency checks and the CLI
pub static ALL: &[&SegmentDef] = &[
    &ACCOUNT_MAIN,
    &EMAILS,
    &PHONES,
    &ADDRESSES,
    &LANGUAGES,
    &PATIENT_PROFILE_REF,
    &SPECIALIST_PROFILE_REF,
    &SPECIALIST_ACCOUNT,
    &PATIENT_ACCOUNT,
    &PHONE_REF,
    &EMAIL_REF,
    &FILES,
    &SPECIALIST_MAIN,
    &SPECIALIZATIONS,
    &CURES_DISEASES,
    &SERVICES,
    &EDUCATIONS,
    &EXPERIENCES,
    &EXPERIENCE_SPECIALIZATIONS,
    &ASSOCIATIONS,
    &PATENTS,
    &PUBLICATION_LINKS,
    &PATIENT_MAIN,
    &PATIENT_LIST_MAIN,
    &METAL_COMPONENTS,
];
