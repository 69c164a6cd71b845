// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Patient reads

use once_cell::sync::Lazy;

use super::account::{decode_email_ref, decode_phone_ref};
use super::tables::{
    self, ACCOUNTS, ACCOUNT_EMAILS, ACCOUNT_FILES, ACCOUNT_PHONES, PATIENT_DISABILITY_FILES,
    PATIENT_METAL_COMPONENTS, PATIENT_PROFILES,
};
use crate::error::DecodeError;
use crate::materialize::{
    bind_with, AggregateBuilder, CollectionSlot, EntityLayout, FirstNonNull, JoinDecode,
    SegmentView,
};
use crate::model::{
    Blood, Body, Disability, File, Lifestyle, MetalComponent, Patient, Vision,
};
use crate::row::{ColumnContract, ContractBuilder, Row, SegmentId};

pub static PATIENT_LAYOUT: Lazy<PatientLayout> = Lazy::new(PatientLayout::new);
pub static PATIENT_LIST_LAYOUT: Lazy<PatientListLayout> = Lazy::new(PatientListLayout::new);

struct Head {
    account: SegmentId,
    phone: SegmentId,
    email: SegmentId,
}

impl Head {
    fn join(builder: &mut ContractBuilder) -> Self {
        let account = builder.join(
            &tables::PATIENT_ACCOUNT,
            format!("{}.id = {}.account_id", ACCOUNTS, PATIENT_PROFILES),
        );
        let phone = builder.join(
            &tables::PHONE_REF,
            format!(
                "{phones}.id = {p}.phone_id AND {p}.phone_id IS NOT NULL",
                phones = ACCOUNT_PHONES,
                p = PATIENT_PROFILES
            ),
        );
        let email = builder.join(
            &tables::EMAIL_REF,
            format!(
                "{emails}.id = {p}.email_id AND {p}.email_id IS NOT NULL",
                emails = ACCOUNT_EMAILS,
                p = PATIENT_PROFILES
            ),
        );
        Self {
            account,
            phone,
            email,
        }
    }

    fn contacts(
        &self,
        contract: &ColumnContract,
        row: &Row,
        phone: &mut FirstNonNull<String>,
        email: &mut FirstNonNull<String>,
    ) -> Result<(), DecodeError> {
        phone.offer(bind_with(row, contract.segment(self.phone), decode_phone_ref)?);
        email.offer(bind_with(row, contract.segment(self.email), decode_email_ref)?);
        Ok(())
    }
}

/// Patient with names from `accounts`; medical fields left at defaults
fn decode_patient_head(
    contract: &ColumnContract,
    head: &Head,
    row: &Row,
) -> Result<Patient, DecodeError> {
    let main = SegmentView::new(row, contract.root());
    let account = SegmentView::new(row, contract.segment(head.account));
    Ok(Patient {
        id: main.get("id")?,
        account_id: 0,
        first_name: account.get("first_name")?,
        father_name: account.get("father_name")?,
        last_name: account.get("last_name")?,
        sex: account.get("sex")?,
        photo: account.get("photo")?,
        birthday: account.get("birthday")?,
        phone: None,
        email: None,
        body: Body::default(),
        blood: Blood::default(),
        vision: Vision::default(),
        disability: Disability::default(),
        lifestyle: Lifestyle::default(),
        metal_components: Vec::new(),
    })
}

fn decode_medical(main: &SegmentView<'_>, patient: &mut Patient) -> Result<(), DecodeError> {
    patient.account_id = main.get("account_id")?;
    patient.body = Body {
        height: main.get("height")?,
        weight: main.get("weight")?,
        body_type: main.get("body_type")?,
    };
    patient.blood = Blood {
        blood_type: main.get("blood_type")?,
        rh: main.get("rh")?,
    };
    patient.vision = Vision {
        left_eye: main.get("left_eye")?,
        right_eye: main.get("right_eye")?,
    };
    patient.disability = Disability {
        group: main.get("disability_group")?,
        reason: main.get("disability_reason")?,
        document_num: main.get("disability_document_num")?,
        files: Vec::new(),
    };
    patient.lifestyle = Lifestyle {
        activity: main.get("activity")?,
        nutrition: main.get("nutrition")?,
        work: main.get("work")?,
    };
    Ok(())
}

impl JoinDecode for MetalComponent {
    fn decode(view: &SegmentView<'_>) -> Result<Self, DecodeError> {
        Ok(MetalComponent {
            id: view.get("id")?,
            patient_id: view.get("profile_id")?,
            metal: view.get("metal")?,
            organ_id: view.get("organ_id")?,
            description: view.get("description")?,
        })
    }
}

pub struct PatientLayout {
    contract: ColumnContract,
    head: Head,
    metal_components: SegmentId,
    disability_files: SegmentId,
}

impl PatientLayout {
    fn new() -> Self {
        let mut builder = ColumnContract::builder("patient", &tables::PATIENT_MAIN);
        let head = Head::join(&mut builder);
        let metal_components = builder.join(
            &tables::METAL_COMPONENTS,
            format!("{}.profile_id = {}.id", PATIENT_METAL_COMPONENTS, PATIENT_PROFILES),
        );
        let disability_files = builder.join_through(
            PATIENT_DISABILITY_FILES,
            format!("{}.profile_id = {}.id", PATIENT_DISABILITY_FILES, PATIENT_PROFILES),
            &tables::FILES,
            format!("{}.id = {}.file_id", ACCOUNT_FILES, PATIENT_DISABILITY_FILES),
        );

        Self {
            contract: builder.build(),
            head,
            metal_components,
            disability_files,
        }
    }

    pub fn by_id_sql(&self) -> String {
        self.contract
            .select_sql(Some("patient_profiles.id = $1 AND accounts.deleted_at IS NULL"))
    }
}

impl EntityLayout for PatientLayout {
    type Builder = PatientBuilder;

    fn contract(&self) -> &ColumnContract {
        &self.contract
    }
}

pub struct PatientBuilder {
    patient: Patient,
    phone: FirstNonNull<String>,
    email: FirstNonNull<String>,
    metal_components: CollectionSlot<i64, MetalComponent>,
    disability_files: CollectionSlot<i64, File>,
}

impl AggregateBuilder for PatientBuilder {
    type Layout = PatientLayout;
    type Output = Patient;

    fn start(layout: &PatientLayout, row: &Row) -> Result<Self, DecodeError> {
        let mut patient = decode_patient_head(&layout.contract, &layout.head, row)?;
        decode_medical(&SegmentView::new(row, layout.contract.root()), &mut patient)?;
        Ok(Self {
            patient,
            phone: FirstNonNull::new(),
            email: FirstNonNull::new(),
            metal_components: CollectionSlot::new(),
            disability_files: CollectionSlot::new(),
        })
    }

    fn root_id(&self) -> i64 {
        self.patient.id
    }

    fn absorb(&mut self, layout: &PatientLayout, row: &Row) -> Result<(), DecodeError> {
        let contract = &layout.contract;
        layout
            .head
            .contacts(contract, row, &mut self.phone, &mut self.email)?;
        self.metal_components.absorb(
            row,
            contract.segment(layout.metal_components),
            |m: &MetalComponent| m.id,
        )?;
        self.disability_files
            .absorb(row, contract.segment(layout.disability_files), |f: &File| f.id)?;
        Ok(())
    }

    fn finish(self) -> Patient {
        let mut patient = self.patient;
        patient.phone = self.phone.into_inner();
        patient.email = self.email.into_inner();
        patient.metal_components = self.metal_components.into_vec();
        patient.disability.files = self.disability_files.into_vec();
        patient
    }
}

/// Patient list: id, names and contacts
pub struct PatientListLayout {
    contract: ColumnContract,
    head: Head,
}

impl PatientListLayout {
    fn new() -> Self {
        let mut builder = ColumnContract::builder("patients", &tables::PATIENT_LIST_MAIN);
        let head = Head::join(&mut builder);
        Self {
            contract: builder.build(),
            head,
        }
    }
}

impl EntityLayout for PatientListLayout {
    type Builder = PatientSummaryBuilder;

    fn contract(&self) -> &ColumnContract {
        &self.contract
    }
}

pub struct PatientSummaryBuilder {
    patient: Patient,
    phone: FirstNonNull<String>,
    email: FirstNonNull<String>,
}

impl AggregateBuilder for PatientSummaryBuilder {
    type Layout = PatientListLayout;
    type Output = Patient;

    fn start(layout: &PatientListLayout, row: &Row) -> Result<Self, DecodeError> {
        Ok(Self {
            patient: decode_patient_head(&layout.contract, &layout.head, row)?,
            phone: FirstNonNull::new(),
            email: FirstNonNull::new(),
        })
    }

    fn root_id(&self) -> i64 {
        self.patient.id
    }

    fn absorb(&mut self, layout: &PatientListLayout, row: &Row) -> Result<(), DecodeError> {
        layout
            .head
            .contacts(&layout.contract, row, &mut self.phone, &mut self.email)
    }

    fn finish(self) -> Patient {
        let mut patient = self.patient;
        patient.phone = self.phone.into_inner();
        patient.email = self.email.into_inner();
        patient
    }
}
