// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Readable entities by name

use std::fmt;
use std::str::FromStr;

use super::account::{ACCOUNT_LAYOUT, ACCOUNT_LIST_LAYOUT};
use super::education::{EDUCATION_LAYOUT, EXPERIENCE_LAYOUT};
use super::patient::{PATIENT_LAYOUT, PATIENT_LIST_LAYOUT};
use super::query::list_sql;
use super::specialist::{SPECIALIST_LAYOUT, SPECIALIST_LIST_LAYOUT};
use super::StorageError;
use crate::materialize::EntityLayout;
use crate::model::ListRequest;
use crate::row::ColumnContract;

/// One wide query the readers know how to materialize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Account,
    Accounts,
    Specialist,
    Specialists,
    Patient,
    Patients,
    Education,
    Educations,
    Experience,
    Experiences,
}

impl Entity {
    pub const ALL: [Entity; 10] = [
        Entity::Account,
        Entity::Accounts,
        Entity::Specialist,
        Entity::Specialists,
        Entity::Patient,
        Entity::Patients,
        Entity::Education,
        Entity::Educations,
        Entity::Experience,
        Entity::Experiences,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Entity::Account => "account",
            Entity::Accounts => "accounts",
            Entity::Specialist => "specialist",
            Entity::Specialists => "specialists",
            Entity::Patient => "patient",
            Entity::Patients => "patients",
            Entity::Education => "education",
            Entity::Educations => "educations",
            Entity::Experience => "experience",
            Entity::Experiences => "experiences",
        }
    }

    /// Whether the read yields many roots
    pub fn is_list(self) -> bool {
        matches!(
            self,
            Entity::Accounts
                | Entity::Specialists
                | Entity::Patients
                | Entity::Educations
                | Entity::Experiences
        )
    }

    pub fn contract(self) -> &'static ColumnContract {
        match self {
            Entity::Account => ACCOUNT_LAYOUT.contract(),
            Entity::Accounts => ACCOUNT_LIST_LAYOUT.contract(),
            Entity::Specialist => SPECIALIST_LAYOUT.contract(),
            Entity::Specialists => SPECIALIST_LIST_LAYOUT.contract(),
            Entity::Patient => PATIENT_LAYOUT.contract(),
            Entity::Patients => PATIENT_LIST_LAYOUT.contract(),
            Entity::Education | Entity::Educations => EDUCATION_LAYOUT.contract(),
            Entity::Experience | Entity::Experiences => EXPERIENCE_LAYOUT.contract(),
        }
    }

    /// SQL whose projection is this entity's contract
    ///
    /// Single reads filter by `$1`; paged lists use `req`. Educations and
    /// experiences are listed by owning profile and are not paged.
    pub fn select_sql(self, req: &ListRequest) -> Result<String, StorageError> {
        match self {
            Entity::Account => Ok(ACCOUNT_LAYOUT.by_id_sql()),
            Entity::Specialist => Ok(SPECIALIST_LAYOUT.by_id_sql()),
            Entity::Patient => Ok(PATIENT_LAYOUT.by_id_sql()),
            Entity::Education => Ok(EDUCATION_LAYOUT.by_id_sql()),
            Entity::Educations => Ok(EDUCATION_LAYOUT.by_profile_sql()),
            Entity::Experience => Ok(EXPERIENCE_LAYOUT.by_id_sql()),
            Entity::Experiences => Ok(EXPERIENCE_LAYOUT.by_profile_sql()),
            Entity::Accounts | Entity::Specialists | Entity::Patients => {
                list_sql(self.contract(), req)
            }
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Entity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Entity::ALL
            .into_iter()
            .find(|e| e.name() == lower)
            .ok_or_else(|| {
                let names: Vec<_> = Entity::ALL.iter().map(|e| e.name()).collect();
                format!("Unknown entity: {}. Valid options: {}", s, names.join(", "))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_round_trips_by_name() {
        for entity in Entity::ALL {
            assert_eq!(entity.name().parse::<Entity>(), Ok(entity));
        }
        assert!("doctor".parse::<Entity>().is_err());
    }

    #[test]
    fn test_list_entities_render_paged_sql() {
        let sql = Entity::Specialists
            .select_sql(&ListRequest::default())
            .unwrap();
        assert!(sql.contains("LIMIT 10 OFFSET 0"));
        assert!(sql.ends_with(") ORDER BY specialist_profiles.id"));
    }

    #[test]
    fn test_every_contract_is_non_empty() {
        for entity in Entity::ALL {
            assert!(entity.contract().width() > 0, "{}", entity);
        }
    }
}
