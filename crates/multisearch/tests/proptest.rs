//! Property-based tests for multisearch using proptest.

use multisearch::{
    group_by, is_query_match, Engine, EngineOptions, FieldDescriptor, FieldKey, FilterResult,
    MatchOptions, Number, Searchable, Value,
};
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

#[derive(Debug, Clone)]
struct TestItem {
    value: i64,
    name: String,
    active: bool,
}

impl Searchable for TestItem {
    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            "value" => Value::Number(Number::I64(self.value)),
            "name" => Value::String(&self.name),
            "active" => Value::Bool(self.active),
            _ => Value::None,
        }
    }
}

fn test_item_strategy() -> impl Strategy<Value = TestItem> {
    (-10i64..10, "[a-c]{1,4}", any::<bool>()).prop_map(|(value, name, active)| TestItem {
        value,
        name,
        active,
    })
}

fn query_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (-10i64..10).prop_map(|n| n.to_string()),
        (prop::sample::select(vec![">", ">=", "<", "<=", "!="]), -10i64..10)
            .prop_map(|(op, n)| format!("{op}{n}")),
        "[a-c]{1,2}",
        prop::sample::select(vec!["yes", "no", "1", "0", "\"ab\"", "\\\"a"])
            .prop_map(String::from),
    ]
}

fn clause_strategy() -> impl Strategy<Value = (String, String)> {
    (
        prop::sample::select(vec!["value", "name", "active", "_default"]).prop_map(String::from),
        query_strategy(),
    )
}

fn fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("value", "Value"),
        FieldDescriptor::new("name", "Name"),
        FieldDescriptor::new("active", "Active"),
    ]
}

fn flat_engine_with(items: &[TestItem], options: EngineOptions) -> Engine<TestItem> {
    Engine::builder()
        .fields(fields())
        .options(options)
        .source(items.to_vec())
        .build()
        .unwrap()
}

fn categorized_engine_with(items: &[TestItem], options: EngineOptions) -> Engine<TestItem> {
    Engine::builder()
        .fields(fields())
        .options(options)
        .categorizer(group_by(|item: &TestItem| {
            let key = if item.active { "active" } else { "inactive" };
            key.to_string()
        }))
        .source(items.to_vec())
        .build()
        .unwrap()
}

fn flat_engine(items: &[TestItem]) -> Engine<TestItem> {
    flat_engine_with(items, EngineOptions::default())
}

fn categorized_engine(items: &[TestItem]) -> Engine<TestItem> {
    categorized_engine_with(items, EngineOptions::default())
}

fn flat_overriding(items: &[TestItem]) -> Engine<TestItem> {
    flat_engine_with(items, EngineOptions::default().override_same_field(true))
}

fn categorized_overriding(items: &[TestItem]) -> Engine<TestItem> {
    categorized_engine_with(items, EngineOptions::default().override_same_field(true))
}

#[derive(Debug, Clone)]
enum Edit {
    Add(String, String),
    Delete(prop::sample::Index),
    Clear,
    Sync,
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        4 => clause_strategy().prop_map(|(field, query)| Edit::Add(field, query)),
        2 => any::<prop::sample::Index>().prop_map(Edit::Delete),
        1 => Just(Edit::Clear),
        2 => Just(Edit::Sync),
    ]
}

/// Result of a fresh engine given all clauses at once.
fn fresh_result(
    build: fn(&[TestItem]) -> Engine<TestItem>,
    items: &[TestItem],
    clauses: &[(String, String)],
) -> Option<FilterResult> {
    let mut engine = build(items);
    for (field, query) in clauses {
        engine.add_clause(field.as_str(), query);
    }
    engine.sync();
    engine.result().cloned()
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Truthy tokens match exactly the true values, falsy tokens the false ones.
    #[test]
    fn boolean_tokens_partition_values(
        value in any::<bool>(),
        truthy in prop::sample::select(vec!["true", "1", "on", "yes", "y", "t", "✓"]),
        falsy in prop::sample::select(vec!["false", "0", "off", "no", "n", "f", "x"]),
    ) {
        let options = MatchOptions::default();
        prop_assert_eq!(is_query_match(&Value::Bool(value), truthy, &options), value);
        prop_assert_eq!(is_query_match(&Value::Bool(value), falsy, &options), !value);
    }

    /// Relational queries agree with integer comparison.
    #[test]
    fn number_operators_follow_ordering(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
        let options = MatchOptions::default();
        let value = Value::Number(Number::I64(a));
        prop_assert_eq!(is_query_match(&value, &format!(">{b}"), &options), a > b);
        prop_assert_eq!(is_query_match(&value, &format!(">={b}"), &options), a >= b);
        prop_assert_eq!(is_query_match(&value, &format!("<{b}"), &options), a < b);
        prop_assert_eq!(is_query_match(&value, &format!("<={b}"), &options), a <= b);
        prop_assert_eq!(is_query_match(&value, &format!("!={b}"), &options), a != b);
        prop_assert_eq!(is_query_match(&value, &b.to_string(), &options), a == b);
    }

    /// Refining the previous result gives the same answer as a full scan.
    #[test]
    fn appended_clauses_match_full_recompute(
        items in prop::collection::vec(test_item_strategy(), 0..30),
        clauses in prop::collection::vec(clause_strategy(), 1..6),
    ) {
        for build in [flat_engine as fn(&[TestItem]) -> Engine<TestItem>, categorized_engine] {
            let mut engine = build(&items);
            engine.sync();
            for (step, (field, query)) in clauses.iter().enumerate() {
                engine.add_clause(field.as_str(), query);
                prop_assert!(engine.sync());
                prop_assert!(engine.last_reused());
                let expected = fresh_result(build, &items, &clauses[..=step]);
                prop_assert_eq!(engine.result().cloned(), expected);
            }
        }
    }

    /// Deleting a clause falls back to the raw source and stays correct.
    #[test]
    fn deletion_matches_full_recompute(
        items in prop::collection::vec(test_item_strategy(), 0..30),
        clauses in prop::collection::vec(clause_strategy(), 2..6),
        victim in any::<prop::sample::Index>(),
    ) {
        let mut engine = flat_engine(&items);
        for (field, query) in &clauses {
            engine.add_clause(field.as_str(), query);
        }
        engine.sync();

        let index = victim.index(clauses.len());
        engine.delete_clause(index);
        prop_assert!(engine.sync());
        prop_assert!(!engine.last_reused());

        let mut remaining = clauses.clone();
        remaining.remove(index);
        prop_assert_eq!(engine.result().cloned(), fresh_result(flat_engine, &items, &remaining));
    }

    /// Results are an order-preserving subset of the source.
    #[test]
    fn results_are_ordered_subsets(
        items in prop::collection::vec(test_item_strategy(), 0..30),
        clauses in prop::collection::vec(clause_strategy(), 0..4),
    ) {
        let mut engine = flat_engine(&items);
        for (field, query) in &clauses {
            engine.add_clause(field.as_str(), query);
        }
        engine.sync();

        let indices = engine.result().and_then(FilterResult::as_flat).unwrap().to_vec();
        prop_assert!(indices.len() <= items.len());
        prop_assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(indices.iter().all(|&i| i < items.len()));
    }

    /// A second sync with unchanged inputs never recomputes.
    #[test]
    fn sync_is_idempotent(
        items in prop::collection::vec(test_item_strategy(), 0..20),
        clauses in prop::collection::vec(clause_strategy(), 0..4),
    ) {
        let mut engine = categorized_engine(&items);
        for (field, query) in &clauses {
            engine.add_clause(field.as_str(), query);
        }
        prop_assert!(engine.sync());
        let first = engine.result().cloned();
        let stamp = engine.stamp();

        prop_assert!(!engine.sync());
        prop_assert_eq!(engine.result().cloned(), first);
        prop_assert_eq!(engine.stamp(), stamp);
    }

    /// Global clauses match when any declared field does.
    #[test]
    fn global_clause_is_a_disjunction_over_fields(
        items in prop::collection::vec(test_item_strategy(), 0..20),
        query in query_strategy(),
    ) {
        let mut engine = flat_engine(&items);
        engine.add_clause(FieldKey::All, &query);
        engine.sync();
        let matched = engine.result().and_then(FilterResult::as_flat).unwrap().to_vec();

        let options = MatchOptions::default();
        let expected: Vec<usize> = items
            .iter()
            .enumerate()
            .filter(|(_, item)| {
                ["value", "name", "active"]
                    .iter()
                    .any(|field| is_query_match(&item.field_value(field), query.trim(), &options))
            })
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(matched, expected);
    }

    /// Any mix of adds, deletes and clears ends where a fresh engine given
    /// the surviving clauses ends, with or without same-field overrides.
    #[test]
    fn interleaved_edits_match_fresh_engine(
        items in prop::collection::vec(test_item_strategy(), 0..30),
        edits in prop::collection::vec(edit_strategy(), 1..16),
    ) {
        let builds = [
            flat_engine as fn(&[TestItem]) -> Engine<TestItem>,
            categorized_engine,
            flat_overriding,
            categorized_overriding,
        ];
        for build in builds {
            let mut engine = build(&items);
            for edit in &edits {
                match edit {
                    Edit::Add(field, query) => {
                        engine.add_clause(field.as_str(), query);
                    }
                    Edit::Delete(victim) => {
                        if !engine.clauses().is_empty() {
                            engine.delete_clause(victim.index(engine.clauses().len()));
                        }
                    }
                    Edit::Clear => {
                        engine.delete_all_clauses();
                    }
                    Edit::Sync => {
                        engine.sync();
                    }
                }
                engine.sync();

                let surviving: Vec<(String, String)> = engine
                    .clauses()
                    .iter()
                    .map(|clause| (clause.field.to_string(), clause.query.clone()))
                    .collect();
                prop_assert_eq!(engine.result().cloned(), fresh_result(build, &items, &surviving));
            }
        }
    }
}
