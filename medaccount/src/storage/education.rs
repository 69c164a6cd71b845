// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Specialist educations and experiences
//!
//! Both are two-level children of a specialist: an education owns files and
//! an experience owns specialization tags. They are also read on their own,
//! by profile or by id, with the child as the query root.

use once_cell::sync::Lazy;

use super::tables::{
    self, ACCOUNT_FILES, SPECIALIST_EDUCATIONS, SPECIALIST_EDUCATION_FILES,
    SPECIALIST_EXPERIENCES, SPECIALIST_EXPERIENCE_SPECIALIZATIONS,
};
use crate::error::DecodeError;
use crate::materialize::{
    AggregateBuilder, CollectionSlot, EntityLayout, JoinDecode, SegmentView, TwoLevel,
};
use crate::model::{Education, Experience, File};
use crate::row::{ColumnContract, ContractBuilder, Row, SegmentId};

pub static EDUCATION_LAYOUT: Lazy<EducationLayout> = Lazy::new(EducationLayout::new);
pub static EXPERIENCE_LAYOUT: Lazy<ExperienceLayout> = Lazy::new(ExperienceLayout::new);

impl JoinDecode for File {
    fn decode(view: &SegmentView<'_>) -> Result<Self, DecodeError> {
        Ok(File {
            id: view.get("id")?,
            created_at: view.get("created_at")?,
            updated_at: view.get("updated_at")?,
            account_id: view.get("account_id")?,
            name: view.get("name")?,
            description: view.get("description")?,
        })
    }
}

impl JoinDecode for Education {
    fn decode(view: &SegmentView<'_>) -> Result<Self, DecodeError> {
        Ok(Education {
            id: view.get("id")?,
            profile_id: view.get("profile_id")?,
            institution_id: view.get("institution_id")?,
            faculty_id: view.get("faculty_id")?,
            department_id: view.get("department_id")?,
            form_id: view.get("form_id")?,
            degree_id: view.get("degree_id")?,
            graduation: view.get("graduation")?,
            verified: view.get("verified")?,
            files: Vec::new(),
        })
    }
}

impl TwoLevel for Education {
    type Child = File;
    type ChildKey = i64;

    fn decode_child(view: &SegmentView<'_>) -> Result<File, DecodeError> {
        File::decode(view)
    }

    fn child_key(child: &File) -> i64 {
        child.id
    }

    fn children_mut(&mut self) -> &mut Vec<File> {
        &mut self.files
    }
}

impl JoinDecode for Experience {
    fn decode(view: &SegmentView<'_>) -> Result<Self, DecodeError> {
        Ok(Experience {
            id: view.get("id")?,
            profile_id: view.get("profile_id")?,
            company_id: view.get("company_id")?,
            company: view.get("company")?,
            start: view.get("start")?,
            finish: view.get("finish")?,
            specializations: Vec::new(),
        })
    }
}

impl TwoLevel for Experience {
    type Child = i64;
    type ChildKey = i64;

    fn decode_child(view: &SegmentView<'_>) -> Result<i64, DecodeError> {
        view.get("specialization_id")
    }

    fn child_key(child: &i64) -> i64 {
        *child
    }

    fn children_mut(&mut self) -> &mut Vec<i64> {
        &mut self.specializations
    }
}

/// Join education files (through the link table) onto `specialist_educations`
pub(crate) fn join_education_files(builder: &mut ContractBuilder) -> SegmentId {
    builder.join_through(
        SPECIALIST_EDUCATION_FILES,
        format!(
            "{}.education_id = {}.id",
            SPECIALIST_EDUCATION_FILES, SPECIALIST_EDUCATIONS
        ),
        &tables::FILES,
        format!("{}.id = {}.file_id", ACCOUNT_FILES, SPECIALIST_EDUCATION_FILES),
    )
}

/// Join specialization tags onto `specialist_experiences`
pub(crate) fn join_experience_tags(builder: &mut ContractBuilder) -> SegmentId {
    builder.join(
        &tables::EXPERIENCE_SPECIALIZATIONS,
        format!(
            "{}.experience_id = {}.id",
            SPECIALIST_EXPERIENCE_SPECIALIZATIONS, SPECIALIST_EXPERIENCES
        ),
    )
}

pub struct EducationLayout {
    contract: ColumnContract,
    files: SegmentId,
}

impl EducationLayout {
    fn new() -> Self {
        let mut builder = ColumnContract::builder("educations", &tables::EDUCATIONS);
        let files = join_education_files(&mut builder);
        Self {
            contract: builder.build(),
            files,
        }
    }

    pub fn by_profile_sql(&self) -> String {
        self.contract
            .select_sql(Some("specialist_educations.profile_id = $1"))
    }

    pub fn by_id_sql(&self) -> String {
        self.contract.select_sql(Some("specialist_educations.id = $1"))
    }
}

impl EntityLayout for EducationLayout {
    type Builder = EducationBuilder;

    fn contract(&self) -> &ColumnContract {
        &self.contract
    }
}

pub struct EducationBuilder {
    education: Education,
    files: CollectionSlot<i64, File>,
}

impl AggregateBuilder for EducationBuilder {
    type Layout = EducationLayout;
    type Output = Education;

    fn start(layout: &EducationLayout, row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            education: Education::decode(&SegmentView::new(row, layout.contract.root()))?,
            files: CollectionSlot::new(),
        })
    }

    fn root_id(&self) -> i64 {
        self.education.id
    }

    fn absorb(&mut self, layout: &EducationLayout, row: &Row) -> Result<(), DecodeError> {
        self.files
            .absorb(row, layout.contract.segment(layout.files), |f: &File| f.id)?;
        Ok(())
    }

    fn finish(self) -> Education {
        let mut education = self.education;
        education.files = self.files.into_vec();
        education
    }
}

pub struct ExperienceLayout {
    contract: ColumnContract,
    specializations: SegmentId,
}

impl ExperienceLayout {
    fn new() -> Self {
        let mut builder = ColumnContract::builder("experiences", &tables::EXPERIENCES);
        let specializations = join_experience_tags(&mut builder);
        Self {
            contract: builder.build(),
            specializations,
        }
    }

    pub fn by_profile_sql(&self) -> String {
        self.contract
            .select_sql(Some("specialist_experiences.profile_id = $1"))
    }

    pub fn by_id_sql(&self) -> String {
        self.contract.select_sql(Some("specialist_experiences.id = $1"))
    }
}

impl EntityLayout for ExperienceLayout {
    type Builder = ExperienceBuilder;

    fn contract(&self) -> &ColumnContract {
        &self.contract
    }
}

pub struct ExperienceBuilder {
    experience: Experience,
    specializations: CollectionSlot<i64, i64>,
}

impl AggregateBuilder for ExperienceBuilder {
    type Layout = ExperienceLayout;
    type Output = Experience;

    fn start(layout: &ExperienceLayout, row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            experience: Experience::decode(&SegmentView::new(row, layout.contract.root()))?,
            specializations: CollectionSlot::new(),
        })
    }

    fn root_id(&self) -> i64 {
        self.experience.id
    }

    fn absorb(&mut self, layout: &ExperienceLayout, row: &Row) -> Result<(), DecodeError> {
        self.specializations.absorb_with(
            row,
            layout.contract.segment(layout.specializations),
            Experience::decode_child,
            |id| *id,
        )?;
        Ok(())
    }

    fn finish(self) -> Experience {
        let mut experience = self.experience;
        experience.specializations = self.specializations.into_vec();
        experience
    }
}
