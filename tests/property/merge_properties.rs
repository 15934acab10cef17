//! Merge rule properties

use drytoml::tree::{merge, merge_tables};
use proptest::prelude::*;
use std::collections::BTreeMap;
use toml::{Table, Value};

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::Integer),
        any::<bool>().prop_map(Value::Boolean),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
        (-1.0e6f64..1.0e6).prop_map(Value::Float),
    ]
}

fn table_of(entries: &BTreeMap<String, i64>) -> Table {
    entries
        .iter()
        .map(|(k, v)| (k.clone(), Value::Integer(*v)))
        .collect()
}

/// The destination keeps its value whatever scalar is merged into it
#[test]
fn test_scalar_precedence_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(scalar(), scalar()), |(current, incoming)| {
            let mut merged = current.clone();
            merge(&mut merged, incoming).unwrap();
            prop_assert_eq!(merged, current);
            Ok(())
        })
        .unwrap();
}

/// Arrays concatenate, destination elements first
#[test]
fn test_array_concatenation_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                prop::collection::vec(any::<i64>(), 0..8),
                prop::collection::vec(any::<i64>(), 0..8),
            ),
            |(current, incoming)| {
                let mut merged =
                    Value::Array(current.iter().copied().map(Value::Integer).collect());
                merge(
                    &mut merged,
                    Value::Array(incoming.iter().copied().map(Value::Integer).collect()),
                )
                .unwrap();

                let expected: Vec<Value> = current
                    .iter()
                    .chain(incoming.iter())
                    .copied()
                    .map(Value::Integer)
                    .collect();
                prop_assert_eq!(merged, Value::Array(expected));
                Ok(())
            },
        )
        .unwrap();
}

/// Table merge is a key union where shared keys keep the destination value
#[test]
fn test_table_union_property() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let entries = || prop::collection::btree_map("[a-e]{1,2}", any::<i64>(), 0..8);

    runner
        .run(&(entries(), entries()), |(current, incoming)| {
            let mut merged = table_of(&current);
            merge_tables(&mut merged, table_of(&incoming)).unwrap();

            let mut expected = incoming.clone();
            expected.extend(current.iter().map(|(k, v)| (k.clone(), *v)));
            prop_assert_eq!(merged.len(), expected.len());
            for (key, value) in &expected {
                prop_assert_eq!(merged.get(key), Some(&Value::Integer(*value)));
            }
            Ok(())
        })
        .unwrap();
}

/// Merging a document into itself twice adds nothing beyond array growth
#[test]
fn test_merge_is_idempotent_without_arrays_property() {
    let mut runner = proptest::test_runner::TestRunner::default();
    let nested = prop::collection::btree_map(
        "[a-c]{1,2}",
        prop::collection::btree_map("[x-z]{1,2}", any::<i64>(), 0..4),
        0..4,
    );

    runner
        .run(&nested, |doc| {
            let table: Table = doc
                .iter()
                .map(|(k, inner)| (k.clone(), Value::Table(table_of(inner))))
                .collect();
            let mut merged = table.clone();
            merge_tables(&mut merged, table.clone()).unwrap();
            prop_assert_eq!(merged, table);
            Ok(())
        })
        .unwrap();
}
