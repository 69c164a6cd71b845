// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Specialist reads
//!
//! The full specialist query LEFT JOINs eleven tables onto
//! `specialist_profiles`, two of them nested under educations and
//! experiences. Phone and email come from single-row references; the first
//! row carrying them wins.

use chrono::NaiveDate;
use once_cell::sync::Lazy;

use super::account::{decode_email_ref, decode_phone_ref};
use super::education::{join_education_files, join_experience_tags};
use super::tables::{
    self, ACCOUNTS, ACCOUNT_EMAILS, ACCOUNT_PHONES, SPECIALIST_ASSOCIATIONS,
    SPECIALIST_CURES_DISEASES, SPECIALIST_EDUCATIONS, SPECIALIST_EXPERIENCES,
    SPECIALIST_PATENTS, SPECIALIST_PROFILES, SPECIALIST_PUBLICATION_LINKS,
    SPECIALIST_SERVICES, SPECIALIST_SPECIALIZATIONS,
};
use crate::error::DecodeError;
use crate::materialize::{
    bind_with, AggregateBuilder, CollectionSlot, EntityLayout, FirstNonNull, JoinDecode,
    NestedSlot, SegmentView,
};
use crate::model::{
    Association, Education, Experience, Patent, PublicationLink, Specialist, Specialization,
};
use crate::row::{ColumnContract, ContractBuilder, Row, SegmentId};

pub static SPECIALIST_LAYOUT: Lazy<SpecialistLayout> = Lazy::new(SpecialistLayout::new);
pub static SPECIALIST_LIST_LAYOUT: Lazy<SpecialistListLayout> =
    Lazy::new(SpecialistListLayout::new);

fn on_profile(table: &str) -> String {
    format!("{}.profile_id = {}.id", table, SPECIALIST_PROFILES)
}

/// Segments shared by the full and the list query
struct Head {
    account: SegmentId,
    phone: SegmentId,
    email: SegmentId,
    specializations: SegmentId,
}

impl Head {
    fn join(builder: &mut ContractBuilder) -> Self {
        let account = builder.join(
            &tables::SPECIALIST_ACCOUNT,
            format!("{}.id = {}.account_id", ACCOUNTS, SPECIALIST_PROFILES),
        );
        let phone = builder.join(
            &tables::PHONE_REF,
            format!(
                "{phones}.id = {p}.phone_id AND {p}.phone_id IS NOT NULL",
                phones = ACCOUNT_PHONES,
                p = SPECIALIST_PROFILES
            ),
        );
        let email = builder.join(
            &tables::EMAIL_REF,
            format!(
                "{emails}.id = {p}.email_id AND {p}.email_id IS NOT NULL",
                emails = ACCOUNT_EMAILS,
                p = SPECIALIST_PROFILES
            ),
        );
        let specializations = builder.join(
            &tables::SPECIALIZATIONS,
            on_profile(SPECIALIST_SPECIALIZATIONS),
        );
        Self {
            account,
            phone,
            email,
            specializations,
        }
    }
}

/// Root scalars: profile columns plus the account's name columns
fn decode_specialist(
    contract: &ColumnContract,
    head: &Head,
    row: &Row,
) -> Result<Specialist, DecodeError> {
    let main = SegmentView::new(row, contract.root());
    let account = SegmentView::new(row, contract.segment(head.account));
    Ok(Specialist {
        id: main.get("id")?,
        updated_at: main.get("updated_at")?,
        first_name: account.get("first_name")?,
        father_name: account.get("father_name")?,
        last_name: account.get("last_name")?,
        sex: account.get("sex")?,
        photo: account.get("photo")?,
        phone: None,
        email: None,
        about: main.get("about")?,
        medical_category: main.get("medical_category")?,
        cures_diseases: Vec::new(),
        services: Vec::new(),
        treats_adults: main.get("treats_adults")?,
        treats_children: main.get("treats_children")?,
        specializations: Vec::new(),
        educations: Vec::new(),
        experiences: Vec::new(),
        associations: Vec::new(),
        patents: Vec::new(),
        publication_links: Vec::new(),
    })
}

impl JoinDecode for Specialization {
    fn decode(view: &SegmentView<'_>) -> Result<Self, DecodeError> {
        Ok(Specialization {
            specialization_id: view.get("specialization_id")?,
            start: view.get::<NaiveDate>("start")?,
        })
    }
}

impl JoinDecode for Association {
    fn decode(view: &SegmentView<'_>) -> Result<Self, DecodeError> {
        Ok(Association {
            id: view.get("id")?,
            profile_id: view.get("profile_id")?,
            association_id: view.get("association_id")?,
            name: view.get("name")?,
            job_title: view.get("job_title")?,
        })
    }
}

impl JoinDecode for Patent {
    fn decode(view: &SegmentView<'_>) -> Result<Self, DecodeError> {
        Ok(Patent {
            id: view.get("id")?,
            profile_id: view.get("profile_id")?,
            number: view.get("number")?,
            name: view.get("name")?,
            link: view.get("link")?,
        })
    }
}

impl JoinDecode for PublicationLink {
    fn decode(view: &SegmentView<'_>) -> Result<Self, DecodeError> {
        Ok(PublicationLink {
            id: view.get("id")?,
            profile_id: view.get("profile_id")?,
            title: view.get("title")?,
            link: view.get("link")?,
        })
    }
}

/// Decoder for a single-column id segment
fn int_column(column: &'static str) -> impl Fn(&SegmentView<'_>) -> Result<i64, DecodeError> {
    move |view| view.get(column)
}

/// Contact fields and specializations, common to both builders
struct Contacts {
    phone: FirstNonNull<String>,
    email: FirstNonNull<String>,
    specializations: CollectionSlot<i64, Specialization>,
}

impl Contacts {
    fn new() -> Self {
        Self {
            phone: FirstNonNull::new(),
            email: FirstNonNull::new(),
            specializations: CollectionSlot::new(),
        }
    }

    fn absorb(&mut self, contract: &ColumnContract, head: &Head, row: &Row) -> Result<(), DecodeError> {
        self.phone
            .offer(bind_with(row, contract.segment(head.phone), decode_phone_ref)?);
        self.email
            .offer(bind_with(row, contract.segment(head.email), decode_email_ref)?);
        self.specializations.absorb(
            row,
            contract.segment(head.specializations),
            |s: &Specialization| s.specialization_id,
        )?;
        Ok(())
    }

    fn apply(self, specialist: &mut Specialist) {
        specialist.phone = self.phone.into_inner();
        specialist.email = self.email.into_inner();
        specialist.specializations = self.specializations.into_vec();
    }
}

pub struct SpecialistLayout {
    contract: ColumnContract,
    head: Head,
    cures: SegmentId,
    services: SegmentId,
    educations: SegmentId,
    education_files: SegmentId,
    experiences: SegmentId,
    experience_specializations: SegmentId,
    associations: SegmentId,
    patents: SegmentId,
    publication_links: SegmentId,
}

impl SpecialistLayout {
    fn new() -> Self {
        let mut builder = ColumnContract::builder("specialist", &tables::SPECIALIST_MAIN);
        let head = Head::join(&mut builder);
        let cures = builder.join(&tables::CURES_DISEASES, on_profile(SPECIALIST_CURES_DISEASES));
        let services = builder.join(&tables::SERVICES, on_profile(SPECIALIST_SERVICES));
        let educations = builder.join(&tables::EDUCATIONS, on_profile(SPECIALIST_EDUCATIONS));
        let education_files = join_education_files(&mut builder);
        let experiences = builder.join(&tables::EXPERIENCES, on_profile(SPECIALIST_EXPERIENCES));
        let experience_specializations = join_experience_tags(&mut builder);
        let associations =
            builder.join(&tables::ASSOCIATIONS, on_profile(SPECIALIST_ASSOCIATIONS));
        let patents = builder.join(&tables::PATENTS, on_profile(SPECIALIST_PATENTS));
        let publication_links = builder.join(
            &tables::PUBLICATION_LINKS,
            on_profile(SPECIALIST_PUBLICATION_LINKS),
        );

        Self {
            contract: builder.build(),
            head,
            cures,
            services,
            educations,
            education_files,
            experiences,
            experience_specializations,
            associations,
            patents,
            publication_links,
        }
    }

    pub fn by_id_sql(&self) -> String {
        self.contract.select_sql(Some(
            "specialist_profiles.id = $1 AND accounts.deleted_at IS NULL",
        ))
    }
}

impl EntityLayout for SpecialistLayout {
    type Builder = SpecialistBuilder;

    fn contract(&self) -> &ColumnContract {
        &self.contract
    }
}

pub struct SpecialistBuilder {
    specialist: Specialist,
    contacts: Contacts,
    cures: CollectionSlot<i64, i64>,
    services: CollectionSlot<i64, i64>,
    educations: NestedSlot<Education>,
    experiences: NestedSlot<Experience>,
    associations: CollectionSlot<i64, Association>,
    patents: CollectionSlot<i64, Patent>,
    publication_links: CollectionSlot<i64, PublicationLink>,
}

impl AggregateBuilder for SpecialistBuilder {
    type Layout = SpecialistLayout;
    type Output = Specialist;

    fn start(layout: &SpecialistLayout, row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            specialist: decode_specialist(&layout.contract, &layout.head, row)?,
            contacts: Contacts::new(),
            cures: CollectionSlot::new(),
            services: CollectionSlot::new(),
            educations: NestedSlot::new(),
            experiences: NestedSlot::new(),
            associations: CollectionSlot::new(),
            patents: CollectionSlot::new(),
            publication_links: CollectionSlot::new(),
        })
    }

    fn root_id(&self) -> i64 {
        self.specialist.id
    }

    fn absorb(&mut self, layout: &SpecialistLayout, row: &Row) -> Result<(), DecodeError> {
        let contract = &layout.contract;

        self.contacts.absorb(contract, &layout.head, row)?;
        self.cures.absorb_with(
            row,
            contract.segment(layout.cures),
            int_column("disease_id"),
            |id| *id,
        )?;
        self.services.absorb_with(
            row,
            contract.segment(layout.services),
            int_column("service_id"),
            |id| *id,
        )?;
        self.educations.attach(
            row,
            contract.segment(layout.educations),
            contract.segment(layout.education_files),
        )?;
        self.experiences.attach(
            row,
            contract.segment(layout.experiences),
            contract.segment(layout.experience_specializations),
        )?;
        self.associations
            .absorb(row, contract.segment(layout.associations), |a: &Association| a.id)?;
        self.patents
            .absorb(row, contract.segment(layout.patents), |p: &Patent| p.id)?;
        self.publication_links.absorb(
            row,
            contract.segment(layout.publication_links),
            |l: &PublicationLink| l.id,
        )?;

        Ok(())
    }

    fn finish(self) -> Specialist {
        let mut specialist = self.specialist;
        self.contacts.apply(&mut specialist);
        specialist.cures_diseases = self.cures.into_vec();
        specialist.services = self.services.into_vec();
        specialist.educations = self.educations.finalize();
        specialist.experiences = self.experiences.finalize();
        specialist.associations = self.associations.into_vec();
        specialist.patents = self.patents.into_vec();
        specialist.publication_links = self.publication_links.into_vec();
        specialist
    }
}

/// Specialist list: profile, names, contacts and specializations
pub struct SpecialistListLayout {
    contract: ColumnContract,
    head: Head,
}

impl SpecialistListLayout {
    fn new() -> Self {
        let mut builder = ColumnContract::builder("specialists", &tables::SPECIALIST_MAIN);
        let head = Head::join(&mut builder);
        Self {
            contract: builder.build(),
            head,
        }
    }
}

impl EntityLayout for SpecialistListLayout {
    type Builder = SpecialistSummaryBuilder;

    fn contract(&self) -> &ColumnContract {
        &self.contract
    }
}

pub struct SpecialistSummaryBuilder {
    specialist: Specialist,
    contacts: Contacts,
}

impl AggregateBuilder for SpecialistSummaryBuilder {
    type Layout = SpecialistListLayout;
    type Output = Specialist;

    fn start(layout: &SpecialistListLayout, row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            specialist: decode_specialist(&layout.contract, &layout.head, row)?,
            contacts: Contacts::new(),
        })
    }

    fn root_id(&self) -> i64 {
        self.specialist.id
    }

    fn absorb(&mut self, layout: &SpecialistListLayout, row: &Row) -> Result<(), DecodeError> {
        self.contacts.absorb(&layout.contract, &layout.head, row)
    }

    fn finish(self) -> Specialist {
        let mut specialist = self.specialist;
        self.contacts.apply(&mut specialist);
        specialist
    }
}
