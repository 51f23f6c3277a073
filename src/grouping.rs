//! Grouping and partitioning by derived keys
//!
//! Every function consumes its iterator exactly once. Values land in
//! buckets implementing [`Bucket`]; the caller picks the bucket type
//! (`Vec` keeps first-seen order, sets de-duplicate).

use std::collections::{BTreeSet, HashSet};
use std::hash::{BuildHasher, Hash};

use rustc_hash::FxHashMap;

/// Accumulates the values sharing a key
pub trait Bucket<V>: Default {
    fn accumulate(&mut self, value: V);
}

impl<V> Bucket<V> for Vec<V> {
    fn accumulate(&mut self, value: V) {
        self.push(value);
    }
}

impl<V, S> Bucket<V> for HashSet<V, S>
where
    V: Eq + Hash,
    S: BuildHasher + Default,
{
    fn accumulate(&mut self, value: V) {
        self.insert(value);
    }
}

impl<V: Ord> Bucket<V> for BTreeSet<V> {
    fn accumulate(&mut self, value: V) {
        self.insert(value);
    }
}

/// Group `(key, value)` pairs into buckets
pub fn grouped_items<I, K, V, B>(items: I) -> FxHashMap<K, B>
where
    I: IntoIterator<Item = (K, V)>,
    K: Eq + Hash,
    B: Bucket<V>,
{
    let mut groups: FxHashMap<K, B> = FxHashMap::default();
    for (key, value) in items {
        groups.entry(key).or_default().accumulate(value);
    }
    groups
}

/// Group elements by `key`, storing `value(element)`
pub fn grouped<I, K, V, B, FK, FV>(iterable: I, mut key: FK, mut value: FV) -> FxHashMap<K, B>
where
    I: IntoIterator,
    FK: FnMut(&I::Item) -> K,
    FV: FnMut(I::Item) -> V,
    K: Eq + Hash,
    B: Bucket<V>,
{
    grouped_items(iterable.into_iter().map(|item| (key(&item), value(item))))
}

/// Group elements by `key`, storing the elements themselves
pub fn grouped_by<I, K, B, FK>(iterable: I, key: FK) -> FxHashMap<K, B>
where
    I: IntoIterator,
    FK: FnMut(&I::Item) -> K,
    K: Eq + Hash,
    B: Bucket<I::Item>,
{
    grouped(iterable, key, |item| item)
}

/// Bucket `(key, value)` pairs, ordered by each key's first appearance
pub fn partitioned_items<I, K, V, B>(items: I) -> Vec<B>
where
    I: IntoIterator<Item = (K, V)>,
    K: Eq + Hash,
    B: Bucket<V>,
{
    let mut positions: FxHashMap<K, usize> = FxHashMap::default();
    let mut buckets: Vec<B> = Vec::new();

    for (key, value) in items {
        let position = *positions.entry(key).or_insert_with(|| {
            buckets.push(B::default());
            buckets.len() - 1
        });
        buckets[position].accumulate(value);
    }

    buckets
}

pub fn partitioned<I, K, V, B, FK, FV>(iterable: I, mut key: FK, mut value: FV) -> Vec<B>
where
    I: IntoIterator,
    FK: FnMut(&I::Item) -> K,
    FV: FnMut(I::Item) -> V,
    K: Eq + Hash,
    B: Bucket<V>,
{
    partitioned_items(iterable.into_iter().map(|item| (key(&item), value(item))))
}

pub fn partitioned_by<I, K, B, FK>(iterable: I, key: FK) -> Vec<B>
where
    I: IntoIterator,
    FK: FnMut(&I::Item) -> K,
    K: Eq + Hash,
    B: Bucket<I::Item>,
{
    partitioned(iterable, key, |item| item)
}
