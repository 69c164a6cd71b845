// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Materializer properties over the real account and specialist layouts

mod common;

#[cfg(test)]
mod materialize_properties {
    use super::common::*;
    use medaccount::materialize::ListStrategy;
    use medaccount::row::MemoryCursor;
    use medaccount::storage::Entity;
    use medaccount::{MaterializeOptions, ProfileReader, StorageError};

    fn reader() -> ProfileReader {
        ProfileReader::default()
    }

    #[test]
    fn test_root_scalars_come_from_first_row() {
        let contract = Entity::Account.contract();
        let mut rows = cartesian(
            contract,
            &account(1, "olena"),
            &[
                vec![email(10, "a@x.io"), email(11, "b@x.io")],
                vec![phone(20, "+380", "501112233")],
            ],
        );
        // A later row repeating the root must not overwrite the first
        rows.push(
            RowBuilder::new(contract)
                .with(&account(1, "renamed"))
                .with(&email(10, "a@x.io"))
                .build(),
        );

        let account = reader().account(cursor(rows)).unwrap();
        assert_eq!(account.id, 1);
        assert_eq!(account.login, "olena");
        assert_eq!(account.first_name.as_deref(), Some("Olena"));
        assert_eq!(account.created_at, ts(1));
    }

    #[test]
    fn test_collection_size_matches_distinct_keys() {
        let contract = Entity::Account.contract();
        let rows = cartesian(
            contract,
            &account(1, "olena"),
            &[
                // same address under two ids dedups by address text
                vec![email(10, "a@x.io"), email(11, "a@x.io"), email(12, "c@x.io")],
                vec![
                    phone(20, "+380", "501112233"),
                    phone(21, "+380", "501112233"),
                ],
                vec![language("uk", "native"), language("en", "b2")],
            ],
        );
        assert_eq!(rows.len(), 12);

        let account = reader().account(cursor(rows)).unwrap();
        let emails: Vec<_> = account.emails.iter().map(|e| e.id).collect();
        assert_eq!(emails, vec![10, 12]);
        assert_eq!(account.phones.len(), 1);
        assert_eq!(account.phones[0].id, 20);
        let languages: Vec<_> = account.languages.iter().map(|l| l.language.as_str()).collect();
        assert_eq!(languages, vec!["uk", "en"]);
    }

    #[test]
    fn test_address_key_concatenates_city_and_text() {
        let contract = Entity::Account.contract();
        // "1" ++ "23 Main" and "12" ++ "3 Main" produce the same key
        let rows = cartesian(
            contract,
            &account(1, "olena"),
            &[vec![address(30, 1, "23 Main"), address(31, 12, "3 Main"), address(32, 2, "Oak")]],
        );

        let account = reader().account(cursor(rows)).unwrap();
        let ids: Vec<_> = account.addresses.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![30, 32]);
    }

    #[test]
    fn test_emission_order_is_first_appearance() {
        let contract = Entity::Account.contract();
        let order = [(12, "c@x.io"), (10, "a@x.io"), (11, "b@x.io")];
        let mut rows = Vec::new();
        for (id, addr) in order.iter().chain(order.iter().rev()) {
            rows.push(
                RowBuilder::new(contract)
                    .with(&account(1, "olena"))
                    .with(&email(*id, addr))
                    .build(),
            );
        }

        let account = reader().account(cursor(rows)).unwrap();
        let emails: Vec<_> = account.emails.iter().map(|e| e.email.as_str()).collect();
        assert_eq!(emails, vec!["c@x.io", "a@x.io", "b@x.io"]);
    }

    #[test]
    fn test_grandchild_repeated_under_two_parents_is_kept_per_parent() {
        let contract = Entity::Specialist.contract();
        let rows = vec![
            RowBuilder::new(contract)
                .with(&concat(&[specialist(1), education(100), file(7)]))
                .build(),
            RowBuilder::new(contract)
                .with(&concat(&[specialist(1), education(200), file(7)]))
                .build(),
        ];

        let specialist = reader().specialist(cursor(rows)).unwrap();
        assert_eq!(specialist.educations.len(), 2);
        for education in &specialist.educations {
            let files: Vec<_> = education.files.iter().map(|f| f.id).collect();
            assert_eq!(files, vec![7], "education {}", education.id);
        }
    }

    #[test]
    fn test_empty_stream_is_not_found() {
        for entity in [Entity::Account, Entity::Specialist, Entity::Patient] {
            let result = reader().read_json(entity, MemoryCursor::empty());
            assert_eq!(result.unwrap_err(), StorageError::NotFound, "{}", entity);
        }
        assert_eq!(
            reader().education(MemoryCursor::empty()).unwrap_err(),
            StorageError::NotFound
        );
        assert_eq!(
            reader().experience(MemoryCursor::empty()).unwrap_err(),
            StorageError::NotFound
        );
    }

    #[test]
    fn test_empty_list_is_not_an_error() {
        for strategy in [ListStrategy::Buffered, ListStrategy::Grouped] {
            let reader = ProfileReader::new(MaterializeOptions {
                list_strategy: strategy,
                max_rows: None,
            });
            assert!(reader.accounts(MemoryCursor::empty()).unwrap().is_empty());
            assert!(reader.educations(MemoryCursor::empty()).unwrap().is_empty());
        }
    }

    #[test]
    fn test_profile_refs_first_non_null_wins() {
        let contract = Entity::Account.contract();
        let rows = vec![
            RowBuilder::new(contract).with(&account(1, "olena")).build(),
            RowBuilder::new(contract)
                .with(&account(1, "olena"))
                .set("specialist_profiles", "id", 40i64)
                .build(),
            RowBuilder::new(contract)
                .with(&account(1, "olena"))
                .set("specialist_profiles", "id", 41i64)
                .set("patient_profiles", "id", 50i64)
                .build(),
        ];

        let account = reader().account(cursor(rows)).unwrap();
        assert_eq!(account.profiles.specialist_profile_id, Some(40));
        assert_eq!(account.profiles.patient_profile_id, Some(50));
    }

    #[test]
    fn test_decode_error_aborts_whole_read() {
        let contract = Entity::Account.contract();
        let rows = vec![
            RowBuilder::new(contract)
                .with(&account(1, "olena"))
                .with(&email(10, "a@x.io"))
                .build(),
            RowBuilder::new(contract)
                .with(&account(1, "olena"))
                .with(&email(11, "b@x.io"))
                .set("account_emails", "verified", "yes")
                .build(),
        ];

        match reader().account(cursor(rows)) {
            Err(StorageError::Internal(message)) => {
                assert!(message.contains("account_emails.verified"), "{}", message)
            }
            other => panic!("expected Internal, got {:?}", other),
        }
    }
}
