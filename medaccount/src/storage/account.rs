// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Account reads
//!
//! The full account query LEFT JOINs emails, phones, addresses, languages and
//! both profile tables onto `accounts`. Contact collections are deduplicated
//! by business value rather than by id:
//! - emails by address
//! - phones by code followed by number
//! - addresses by city id followed by address text
//! - languages by language code

use once_cell::sync::Lazy;

use super::tables::{self, ACCOUNTS};
use crate::error::DecodeError;
use crate::materialize::{
    bind_with, AggregateBuilder, CollectionSlot, EntityLayout, FirstNonNull, JoinDecode,
    SegmentView,
};
use crate::model::{Account, Address, Email, Language, Phone, Profiles};
use crate::row::{ColumnContract, Row, SegmentId};

pub static ACCOUNT_LAYOUT: Lazy<AccountLayout> = Lazy::new(AccountLayout::new);
pub static ACCOUNT_LIST_LAYOUT: Lazy<AccountListLayout> = Lazy::new(AccountListLayout::new);

fn on_account(table: &str) -> String {
    format!("{}.account_id = {}.id", table, ACCOUNTS)
}

pub struct AccountLayout {
    contract: ColumnContract,
    emails: SegmentId,
    phones: SegmentId,
    addresses: SegmentId,
    languages: SegmentId,
    patient_profile: SegmentId,
    specialist_profile: SegmentId,
}

impl AccountLayout {
    fn new() -> Self {
        let mut builder = ColumnContract::builder("account", &tables::ACCOUNT_MAIN);
        let emails = builder.join(&tables::EMAILS, on_account(tables::ACCOUNT_EMAILS));
        let phones = builder.join(&tables::PHONES, on_account(tables::ACCOUNT_PHONES));
        let addresses = builder.join(&tables::ADDRESSES, on_account(tables::ACCOUNT_ADDRESSES));
        let languages = builder.join(&tables::LANGUAGES, on_account(tables::ACCOUNT_LANGUAGES));
        let patient_profile = builder.join(
            &tables::PATIENT_PROFILE_REF,
            on_account(tables::PATIENT_PROFILES),
        );
        let specialist_profile = builder.join(
            &tables::SPECIALIST_PROFILE_REF,
            on_account(tables::SPECIALIST_PROFILES),
        );

        Self {
            contract: builder.build(),
            emails,
            phones,
            addresses,
            languages,
            patient_profile,
            specialist_profile,
        }
    }

    pub fn by_id_sql(&self) -> String {
        self.contract
            .select_sql(Some("accounts.id = $1 AND accounts.deleted_at IS NULL"))
    }

    pub fn by_login_sql(&self) -> String {
        self.contract
            .select_sql(Some("accounts.login = $1 AND accounts.deleted_at IS NULL"))
    }
}

impl EntityLayout for AccountLayout {
    type Builder = AccountBuilder;

    fn contract(&self) -> &ColumnContract {
        &self.contract
    }
}

/// Account scalars from the `accounts` segment; collections start empty
pub(crate) fn decode_account_main(view: &SegmentView<'_>) -> Result<Account, DecodeError> {
    Ok(Account {
        id: view.get("id")?,
        created_at: view.get("created_at")?,
        updated_at: view.get("updated_at")?,
        deleted_at: view.get("deleted_at")?,
        login: view.get("login")?,
        password: view.get("password")?,
        first_name: view.get("first_name")?,
        father_name: view.get("father_name")?,
        last_name: view.get("last_name")?,
        sex: view.get("sex")?,
        photo: view.get("photo")?,
        birthday: view.get("birthday")?,
        language: view.get("language")?,
        country: view.get("country")?,
        emails: Vec::new(),
        phones: Vec::new(),
        addresses: Vec::new(),
        languages: Vec::new(),
        profiles: Profiles::default(),
    })
}

impl JoinDecode for Email {
    fn decode(view: &SegmentView<'_>) -> Result<Self, DecodeError> {
        Ok(Email {
            id: view.get("id")?,
            account_id: view.get("account_id")?,
            kind: view.get("type")?,
            email: view.get("email")?,
            verified: view.get("verified")?,
            open: view.get("open")?,
        })
    }
}

impl JoinDecode for Phone {
    fn decode(view: &SegmentView<'_>) -> Result<Self, DecodeError> {
        Ok(Phone {
            id: view.get("id")?,
            account_id: view.get("account_id")?,
            kind: view.get("type")?,
            code: view.get("code")?,
            phone: view.get("phone")?,
            verified: view.get("verified")?,
            open: view.get("open")?,
        })
    }
}

impl JoinDecode for Address {
    fn decode(view: &SegmentView<'_>) -> Result<Self, DecodeError> {
        Ok(Address {
            id: view.get("id")?,
            account_id: view.get("account_id")?,
            kind: view.get("type")?,
            city_id: view.get("city_id")?,
            address: view.get("address")?,
            open: view.get("open")?,
        })
    }
}

impl JoinDecode for Language {
    fn decode(view: &SegmentView<'_>) -> Result<Self, DecodeError> {
        Ok(Language {
            account_id: view.get("account_id")?,
            language: view.get("language")?,
            level: view.get("level")?,
        })
    }
}

/// Composite address key: city id immediately followed by the address text
pub fn address_key(address: &Address) -> String {
    format!("{}{}", address.city_id, address.address)
}

/// Phone number referenced by a profile, as code followed by number
pub(crate) fn decode_phone_ref(view: &SegmentView<'_>) -> Result<String, DecodeError> {
    let code: String = view.get("code")?;
    let phone: String = view.get("phone")?;
    Ok(format!("{}{}", code, phone))
}

pub(crate) fn decode_email_ref(view: &SegmentView<'_>) -> Result<String, DecodeError> {
    view.get("email")
}

pub struct AccountBuilder {
    account: Account,
    emails: CollectionSlot<String, Email>,
    phones: CollectionSlot<String, Phone>,
    addresses: CollectionSlot<String, Address>,
    languages: CollectionSlot<String, Language>,
    patient_profile: FirstNonNull<i64>,
    specialist_profile: FirstNonNull<i64>,
}

impl AggregateBuilder for AccountBuilder {
    type Layout = AccountLayout;
    type Output = Account;

    fn start(layout: &AccountLayout, row: &Row) -> Result<Self, DecodeError> {
        let account = decode_account_main(&SegmentView::new(row, layout.contract.root()))?;
        Ok(Self {
            account,
            emails: CollectionSlot::new(),
            phones: CollectionSlot::new(),
            addresses: CollectionSlot::new(),
            languages: CollectionSlot::new(),
            patient_profile: FirstNonNull::new(),
            specialist_profile: FirstNonNull::new(),
        })
    }

    fn root_id(&self) -> i64 {
        self.account.id
    }

    fn absorb(&mut self, layout: &AccountLayout, row: &Row) -> Result<(), DecodeError> {
        let contract = &layout.contract;

        self.emails
            .absorb(row, contract.segment(layout.emails), |e: &Email| e.email.clone())?;
        self.phones
            .absorb(row, contract.segment(layout.phones), Phone::full_number)?;
        self.addresses
            .absorb(row, contract.segment(layout.addresses), address_key)?;
        self.languages.absorb(
            row,
            contract.segment(layout.languages),
            |l: &Language| l.language.clone(),
        )?;

        let id = |v: &SegmentView<'_>| v.sentinel::<i64>();
        self.patient_profile
            .offer(bind_with(row, contract.segment(layout.patient_profile), id)?);
        self.specialist_profile
            .offer(bind_with(row, contract.segment(layout.specialist_profile), id)?);

        Ok(())
    }

    fn finish(self) -> Account {
        let mut account = self.account;
        account.emails = self.emails.into_vec();
        account.phones = self.phones.into_vec();
        account.addresses = self.addresses.into_vec();
        account.languages = self.languages.into_vec();
        account.profiles = Profiles {
            patient_profile_id: self.patient_profile.into_inner(),
            specialist_profile_id: self.specialist_profile.into_inner(),
        };
        account
    }
}

/// Account list: main columns only, one row per account
pub struct AccountListLayout {
    contract: ColumnContract,
}

impl AccountListLayout {
    fn new() -> Self {
        Self {
            contract: ColumnContract::builder("accounts", &tables::ACCOUNT_MAIN).build(),
        }
    }
}

impl EntityLayout for AccountListLayout {
    type Builder = AccountMainBuilder;

    fn contract(&self) -> &ColumnContract {
        &self.contract
    }
}

pub struct AccountMainBuilder(Account);

impl AggregateBuilder for AccountMainBuilder {
    type Layout = AccountListLayout;
    type Output = Account;

    fn start(layout: &AccountListLayout, row: &Row) -> Result<Self, DecodeError> {
        decode_account_main(&SegmentView::new(row, layout.contract.root())).map(Self)
    }

    fn root_id(&self) -> i64 {
        self.0.id
    }

    fn absorb(&mut self, _layout: &AccountListLayout, _row: &Row) -> Result<(), DecodeError> {
        Ok(())
    }

    fn finish(self) -> Account {
        self.0
    }
}
