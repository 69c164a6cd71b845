// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Profile storage read path
//!
//! Entity layouts (column contracts plus segment handles) for every wide
//! query of the profile schema, and [`ProfileReader`], which materializes a
//! row cursor for one of them and maps the outcome onto [`StorageError`].
//! Connections, transactions and writes belong to the caller.

pub mod account;
pub mod education;
pub mod entity;
pub mod error;
pub mod patient;
pub mod query;
pub mod specialist;
pub mod tables;

pub use entity::Entity;
pub use error::StorageError;

use serde::Serialize;

use self::account::{ACCOUNT_LAYOUT, ACCOUNT_LIST_LAYOUT};
use self::education::{EDUCATION_LAYOUT, EXPERIENCE_LAYOUT};
use self::patient::{PATIENT_LAYOUT, PATIENT_LIST_LAYOUT};
use self::specialist::{SPECIALIST_LAYOUT, SPECIALIST_LIST_LAYOUT};
use crate::config::MaterializerConfig;
use crate::materialize::{EntityLayout, MaterializeOptions, Materializer};
use crate::model::{Account, Education, Experience, Patient, Specialist};
use crate::row::RowCursor;

/// Materializes profile reads from row cursors
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileReader {
    options: MaterializeOptions,
}

impl ProfileReader {
    pub fn new(options: MaterializeOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &MaterializerConfig) -> Self {
        Self::new(config.options())
    }

    fn materializer<'l, L: EntityLayout>(&self, layout: &'l L) -> Materializer<'l, L> {
        Materializer::with_options(layout, self.options)
    }

    pub fn account<C: RowCursor>(&self, cursor: C) -> Result<Account, StorageError> {
        Ok(self.materializer(&*ACCOUNT_LAYOUT).materialize_one(cursor)?)
    }

    pub fn accounts<C: RowCursor>(&self, cursor: C) -> Result<Vec<Account>, StorageError> {
        Ok(self.materializer(&*ACCOUNT_LIST_LAYOUT).materialize_list(cursor)?)
    }

    pub fn specialist<C: RowCursor>(&self, cursor: C) -> Result<Specialist, StorageError> {
        Ok(self.materializer(&*SPECIALIST_LAYOUT).materialize_one(cursor)?)
    }

    /// Every specialist of the page, including those without specializations
    pub fn specialists<C: RowCursor>(&self, cursor: C) -> Result<Vec<Specialist>, StorageError> {
        Ok(self
            .materializer(&*SPECIALIST_LIST_LAYOUT)
            .materialize_list(cursor)?)
    }

    pub fn patient<C: RowCursor>(&self, cursor: C) -> Result<Patient, StorageError> {
        Ok(self.materializer(&*PATIENT_LAYOUT).materialize_one(cursor)?)
    }

    pub fn patients<C: RowCursor>(&self, cursor: C) -> Result<Vec<Patient>, StorageError> {
        Ok(self.materializer(&*PATIENT_LIST_LAYOUT).materialize_list(cursor)?)
    }

    pub fn educations<C: RowCursor>(&self, cursor: C) -> Result<Vec<Education>, StorageError> {
        Ok(self.materializer(&*EDUCATION_LAYOUT).materialize_list(cursor)?)
    }

    /// Single education; an empty stream is `NotFound`
    pub fn education<C: RowCursor>(&self, cursor: C) -> Result<Education, StorageError> {
        Ok(self.materializer(&*EDUCATION_LAYOUT).materialize_one(cursor)?)
    }

    pub fn experiences<C: RowCursor>(&self, cursor: C) -> Result<Vec<Experience>, StorageError> {
        Ok(self.materializer(&*EXPERIENCE_LAYOUT).materialize_list(cursor)?)
    }

    /// Single experience; an empty stream is `NotFound`
    pub fn experience<C: RowCursor>(&self, cursor: C) -> Result<Experience, StorageError> {
        Ok(self.materializer(&*EXPERIENCE_LAYOUT).materialize_one(cursor)?)
    }

    /// Materialize `entity` and serialize the result to JSON
    pub fn read_json<C: RowCursor>(
        &self,
        entity: Entity,
        cursor: C,
    ) -> Result<serde_json::Value, StorageError> {
        match entity {
            Entity::Account => to_json(self.account(cursor)?),
            Entity::Accounts => to_json(self.accounts(cursor)?),
            Entity::Specialist => to_json(self.specialist(cursor)?),
            Entity::Specialists => to_json(self.specialists(cursor)?),
            Entity::Patient => to_json(self.patient(cursor)?),
            Entity::Patients => to_json(self.patients(cursor)?),
            Entity::Education => to_json(self.education(cursor)?),
            Entity::Educations => to_json(self.educations(cursor)?),
            Entity::Experience => to_json(self.experience(cursor)?),
            Entity::Experiences => to_json(self.experiences(cursor)?),
        }
    }
}

fn to_json<T: Serialize>(value: T) -> Result<serde_json::Value, StorageError> {
    serde_json::to_value(value).map_err(|e| StorageError::Internal(e.to_string()))
}
