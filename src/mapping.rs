//! Filtered copies of mappings
//!
//! Works with any map that iterates as `(&K, &V)` and collects from
//! `(K, V)`: `BTreeMap`, `HashMap`, `FxHashMap`, `serde_json::Map`.
//! Entries keep the source mapping's iteration order.

use std::borrow::Borrow;
use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashSet;

use crate::error::EbbeError;

/// Copy of `mapping` restricted to `keys`.
///
/// Absent keys are skipped, unless `strict`: then the first absent key (in
/// `keys` order) fails with [`EbbeError::MissingKey`].
pub fn pick<'a, M, K, V, Q>(mapping: &'a M, keys: &[&Q], strict: bool) -> Result<M, EbbeError>
where
    &'a M: IntoIterator<Item = (&'a K, &'a V)>,
    M: FromIterator<(K, V)>,
    K: Borrow<Q> + Clone + 'a,
    V: Clone + 'a,
    Q: Eq + Hash + Debug + ?Sized,
{
    let wanted: FxHashSet<&Q> = keys.iter().copied().collect();
    let mut found: FxHashSet<&Q> = FxHashSet::default();
    let mut entries = Vec::with_capacity(keys.len());

    for (k, v) in mapping {
        let key: &Q = k.borrow();
        if let Some(hit) = wanted.get(key) {
            found.insert(*hit);
            entries.push((k.clone(), v.clone()));
        }
    }

    if strict {
        if let Some(missing) = keys.iter().find(|k| !found.contains(*k)) {
            return Err(EbbeError::MissingKey {
                key: format!("{missing:?}"),
            });
        }
    }

    Ok(entries.into_iter().collect())
}

/// Copy of `mapping` without `keys`; absent keys are ignored.
pub fn omit<'a, M, K, V, Q>(mapping: &'a M, keys: &[&Q]) -> M
where
    &'a M: IntoIterator<Item = (&'a K, &'a V)>,
    M: FromIterator<(K, V)>,
    K: Borrow<Q> + Clone + 'a,
    V: Clone + 'a,
    Q: Eq + Hash + ?Sized,
{
    let unwanted: FxHashSet<&Q> = keys.iter().copied().collect();

    mapping
        .into_iter()
        .filter(|(k, _)| {
            let key: &Q = (*k).borrow();
            !unwanted.contains(key)
        })
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::{BTreeMap, HashMap};

    fn abc() -> BTreeMap<String, i32> {
        [("a", 1), ("b", 2), ("c", 3)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    fn map_of(entries: &[(&str, i32)]) -> BTreeMap<String, i32> {
        entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn pick_keeps_requested_keys() {
        assert_eq!(pick(&abc(), &["a", "c"], false).unwrap(), map_of(&[("a", 1), ("c", 3)]));
        assert_eq!(pick(&abc(), &["b", "d"], false).unwrap(), map_of(&[("b", 2)]));
    }

    #[test]
    fn pick_strict_names_missing_key() {
        let err = pick(&abc(), &["a", "d"], true).unwrap_err();
        assert!(matches!(err, EbbeError::MissingKey { ref key } if key == "\"d\""));
    }

    #[test]
    fn pick_strict_succeeds_when_all_present() {
        assert_eq!(pick(&abc(), &["c"], true).unwrap(), map_of(&[("c", 3)]));
    }

    #[test]
    fn pick_preserves_source_order() {
        let picked = pick(&abc(), &["c", "a"], false).unwrap();
        assert_eq!(picked.keys().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn omit_drops_keys() {
        assert_eq!(omit(&abc(), &["a", "c"]), map_of(&[("b", 2)]));
        assert_eq!(omit(&abc(), &["a", "c", "d"]), map_of(&[("b", 2)]));
        assert_eq!(omit(&abc(), &["z"]), abc());
    }

    #[test]
    fn works_with_other_maps() {
        let hashed: HashMap<&str, i32> = [("a", 1), ("b", 2)].into_iter().collect();
        let picked = pick(&hashed, &["a", "z"], false).unwrap();
        let expected: HashMap<&str, i32> = [("a", 1)].into_iter().collect();
        assert_eq!(picked, expected);

        let Some(object) = json!({"a": 1, "b": 2}).as_object().cloned() else {
            panic!("expected object");
        };
        assert_eq!(serde_json::Value::Object(omit(&object, &["a"])), json!({"b": 2}));
        assert_eq!(
            serde_json::Value::Object(pick(&object, &["b"], true).unwrap()),
            json!({"b": 2})
        );
    }

    #[test]
    fn integer_keys() {
        let map: BTreeMap<i32, &str> = [(1, "one"), (2, "two")].into_iter().collect();
        let expected: BTreeMap<i32, &str> = [(2, "two")].into_iter().collect();
        assert_eq!(omit(&map, &[&1]), expected);
    }
}
