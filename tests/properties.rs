//! Property tests for path resolution and mapping filters

use std::collections::{BTreeMap, BTreeSet};

use ebbe::{getpath, omit, pick, Path, PathOptions, Segment};
use proptest::prelude::*;
use serde_json::{json, Value};

/// Nest `leaf` under `keys`, outermost first
fn nest(keys: &[String], leaf: Value) -> Value {
    keys.iter().rev().fold(leaf, |inner, key| {
        let mut map = serde_json::Map::new();
        map.insert(key.clone(), inner);
        Value::Object(map)
    })
}

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-z]{0,4}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-c]", inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    #[test]
    fn text_path_matches_segment_path(
        keys in prop::collection::vec("[a-z]{1,4}", 1..5),
        target in arb_json(),
    ) {
        let options = PathOptions::new().split_char('.');
        let text = keys.join(".");
        let segments: Vec<Segment> = keys.iter().cloned().map(Segment::from).collect();

        let leaf = json!(1);
        let built = nest(&keys, leaf.clone());
        prop_assert_eq!(getpath(&built, text.as_str(), &options).unwrap(), Some(&leaf));

        prop_assert_eq!(
            getpath(&target, text.as_str(), &options).unwrap(),
            getpath(&target, segments, &options).unwrap()
        );
    }

    #[test]
    fn resolution_is_repeatable_and_read_only(
        target in arb_json(),
        raw in prop::collection::vec(prop_oneof!["[a-c]".prop_map(Segment::from), (-4i64..4).prop_map(Segment::from)], 0..4),
    ) {
        let before = target.clone();
        let path = Path::from(raw);
        let options = PathOptions::default();

        let first = path.resolve(&target, &options).cloned();
        let second = path.resolve(&target, &options).cloned();

        prop_assert_eq!(first, second);
        prop_assert_eq!(target, before);
    }

    #[test]
    fn pick_equals_omit_of_complement(
        map in prop::collection::btree_map("[a-f]", any::<i32>(), 0..6),
        wanted in prop::collection::btree_set("[a-h]", 0..6),
    ) {
        let all: BTreeSet<String> = map.keys().cloned().collect();
        let complement: Vec<&str> = all.iter().filter(|k| !wanted.contains(*k)).map(String::as_str).collect();
        let wanted: Vec<&str> = wanted.iter().map(String::as_str).collect();

        let picked: BTreeMap<String, i32> = pick(&map, wanted.as_slice(), false).unwrap();
        let omitted: BTreeMap<String, i32> = omit(&map, complement.as_slice());
        prop_assert_eq!(picked, omitted);
    }
}
