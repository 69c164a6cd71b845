// Copyright (c) 2024-2025 DeepGraph Inc.
// SPDX-License-Identifier: Apache-2.0
//
//! Randomized fan-out streams
//!
//! Builds the cartesian product of random child sets, shuffles it with a
//! seeded generator, and checks collections against the distinct keys in
//! first-appearance order.

mod common;

#[cfg(test)]
mod fanout_permutations {
    use super::common::*;
    use medaccount::materialize::ListStrategy;
    use medaccount::row::{Row, Value};
    use medaccount::storage::Entity;
    use medaccount::{MaterializeOptions, ProfileReader};
    use std::collections::HashSet;

    const ADDRESSES: [&str; 4] = ["a@x.io", "b@x.io", "c@x.io", "d@x.io"];
    const NUMBERS: [&str; 3] = ["501112233", "672223344", "931234567"];

    fn text_at(row: &Row, index: usize) -> Option<String> {
        match row.get(index) {
            Some(Value::Text(s)) => Some(s.clone()),
            _ => None,
        }
    }

    /// Distinct non-NULL values of `column` in stream order
    fn first_seen(rows: &[Row], table: &str, column: &str) -> Vec<String> {
        let contract = Entity::Account.contract();
        let index = contract
            .segments()
            .iter()
            .find(|s| s.table() == table)
            .and_then(|s| s.index_of(column).ok())
            .unwrap();
        let mut seen = HashSet::new();
        rows.iter()
            .filter_map(|row| text_at(row, index))
            .filter(|v| seen.insert(v.clone()))
            .collect()
    }

    fn random_account_rows(rng: &mut fastrand::Rng, id: i64) -> Vec<Row> {
        let contract = Entity::Account.contract();
        // Ids are unique; addresses may repeat, so dedup must follow the value
        let emails: Vec<Cells> = (0..rng.usize(0..5))
            .map(|i| email(100 + i as i64, ADDRESSES[rng.usize(..ADDRESSES.len())]))
            .collect();
        let phones: Vec<Cells> = (0..rng.usize(0..4))
            .map(|i| phone(200 + i as i64, "+380", NUMBERS[rng.usize(..NUMBERS.len())]))
            .collect();
        let languages: Vec<Cells> = ["uk", "en", "pl"]
            .iter()
            .take(rng.usize(0..=3))
            .map(|code| language(*code, "b1"))
            .collect();

        let mut rows = cartesian(contract, &account(id, "random"), &[emails, phones, languages]);
        rng.shuffle(&mut rows);
        rows
    }

    #[test]
    fn test_random_fanout_single_account() {
        let mut rng = fastrand::Rng::with_seed(0x5eed);
        for _ in 0..200 {
            let rows = random_account_rows(&mut rng, 1);
            let expected_emails = first_seen(&rows, "account_emails", "email");
            let expected_phones = first_seen(&rows, "account_phones", "phone");
            let expected_languages = first_seen(&rows, "account_languages", "language");

            let account = ProfileReader::default().account(cursor(rows)).unwrap();
            let emails: Vec<_> = account.emails.iter().map(|e| e.email.clone()).collect();
            let phones: Vec<_> = account.phones.iter().map(|p| p.phone.clone()).collect();
            let languages: Vec<_> = account
                .languages
                .iter()
                .map(|l| l.language.clone())
                .collect();
            assert_eq!(emails, expected_emails);
            assert_eq!(phones, expected_phones);
            assert_eq!(languages, expected_languages);
        }
    }

    fn random_specialist_rows(rng: &mut fastrand::Rng, id: i64) -> Vec<Row> {
        let contract = Entity::Specialists.contract();
        let specializations: Vec<Cells> = (0..rng.usize(0..4))
            .map(|_| specialization(rng.i64(1..6)))
            .collect();
        cartesian(contract, &specialist(id), &[specializations])
    }

    fn summarize(specialists: &[medaccount::model::Specialist]) -> Vec<(i64, Vec<i64>)> {
        specialists
            .iter()
            .map(|s| {
                let ids = s.specializations.iter().map(|x| x.specialization_id).collect();
                (s.id, ids)
            })
            .collect()
    }

    #[test]
    fn test_random_fanout_specialist_list() {
        let mut rng = fastrand::Rng::with_seed(42);
        for _ in 0..100 {
            let roots = rng.i64(1..6);
            let grouped_rows: Vec<Row> = (1..=roots)
                .flat_map(|id| random_specialist_rows(&mut rng, id))
                .collect();
            let mut shuffled = grouped_rows.clone();
            rng.shuffle(&mut shuffled);

            // Expected: roots and their tags in order of first appearance
            let mut expected: Vec<(i64, Vec<i64>)> = Vec::new();
            for row in &shuffled {
                let id = match row.get(0) {
                    Some(Value::Int(id)) => *id,
                    other => panic!("root id missing: {:?}", other),
                };
                let tag = match row.get(14) {
                    Some(Value::Int(tag)) => Some(*tag),
                    _ => None,
                };
                let entry = match expected.iter().position(|(root, _)| *root == id) {
                    Some(pos) => &mut expected[pos],
                    None => {
                        expected.push((id, Vec::new()));
                        expected.last_mut().unwrap()
                    }
                };
                if let Some(tag) = tag {
                    if !entry.1.contains(&tag) {
                        entry.1.push(tag);
                    }
                }
            }

            let buffered = ProfileReader::default()
                .specialists(cursor(shuffled))
                .unwrap();
            assert_eq!(summarize(&buffered), expected);

            let grouped = ProfileReader::new(MaterializeOptions {
                list_strategy: ListStrategy::Grouped,
                max_rows: None,
            })
            .specialists(cursor(grouped_rows))
            .unwrap();
            let mut sorted = expected;
            sorted.sort_by_key(|(id, _)| *id);
            let mut grouped = summarize(&grouped);
            grouped.iter_mut().zip(sorted.iter()).for_each(|(got, want)| {
                // Tag order depends on the stream order; compare as sets
                got.1.sort_unstable();
                let mut want_tags = want.1.clone();
                want_tags.sort_unstable();
                assert_eq!(got.0, want.0);
                assert_eq!(got.1, want_tags);
            });
            assert_eq!(grouped.len(), sorted.len());
        }
    }
}
