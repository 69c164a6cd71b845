// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Domain aggregates returned by the readers
//!
//! Owner ids and credentials are kept for internal use but never serialized.

pub mod account;
pub mod file;
pub mod patient;
pub mod request;
pub mod specialist;

pub use account::{Account, Address, Email, Language, Phone, Profiles};
pub use file::File;
pub use patient::{Blood, Body, Disability, Lifestyle, MetalComponent, Patient, Vision};
pub use request::ListRequest;
pub use specialist::{
    Association, Education, Experience, Patent, PublicationLink, Specialist, Specialization,
};
