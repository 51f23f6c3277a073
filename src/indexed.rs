//! Index sequences by position or derived key
//!
//! Collisions are last-write-wins, except in [`indexed_strict`].

use std::fmt::Debug;
use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::error::EbbeError;

/// Map each element's position to the element
pub fn indexed<I>(iterable: I) -> FxHashMap<usize, I::Item>
where
    I: IntoIterator,
{
    iterable.into_iter().enumerate().collect()
}

/// Map `key(element)` to the element
pub fn indexed_by<I, K, F>(iterable: I, key: F) -> FxHashMap<K, I::Item>
where
    I: IntoIterator,
    K: Eq + Hash,
    F: FnMut(&I::Item) -> K,
{
    indexed_into(iterable, key)
}

/// Like [`indexed_by`], collecting into any map-like container
/// (e.g. `BTreeMap` for key order)
pub fn indexed_into<C, I, K, F>(iterable: I, mut key: F) -> C
where
    I: IntoIterator,
    C: Default + Extend<(K, I::Item)>,
    F: FnMut(&I::Item) -> K,
{
    let mut container = C::default();
    container.extend(iterable.into_iter().map(|item| (key(&item), item)));
    container
}

/// Like [`indexed_by`], failing on the first key collision
pub fn indexed_strict<I, K, F>(iterable: I, mut key: F) -> Result<FxHashMap<K, I::Item>, EbbeError>
where
    I: IntoIterator,
    K: Eq + Hash + Debug,
    F: FnMut(&I::Item) -> K,
{
    let mut index = FxHashMap::default();

    for item in iterable {
        let k = key(&item);
        if index.contains_key(&k) {
            return Err(EbbeError::DuplicateKey {
                key: format!("{k:?}"),
            });
        }
        index.insert(k, item);
    }

    Ok(index)
}
