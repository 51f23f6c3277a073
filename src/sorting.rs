//! Sorting with de-duplication

/// Sort and drop duplicates.
pub fn sorted_uniq<I>(iterable: I, reverse: bool) -> Vec<I::Item>
where
    I: IntoIterator,
    I::Item: Ord,
{
    let mut items: Vec<I::Item> = iterable.into_iter().collect();
    if reverse {
        items.sort_by(|a, b| b.cmp(a));
    } else {
        items.sort();
    }
    items.dedup();
    items
}

/// Stable sort by `key`, keeping the first element of each run of equal
/// keys.
pub fn sorted_uniq_by_key<I, K, F>(iterable: I, mut key: F, reverse: bool) -> Vec<I::Item>
where
    I: IntoIterator,
    K: Ord,
    F: FnMut(&I::Item) -> K,
{
    let mut keyed: Vec<(K, I::Item)> = iterable.into_iter().map(|item| (key(&item), item)).collect();
    if reverse {
        keyed.sort_by(|a, b| b.0.cmp(&a.0));
    } else {
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
    }
    keyed.dedup_by(|later, earlier| later.0 == earlier.0);
    keyed.into_iter().map(|(_, item)| item).collect()
}
