//! Small list helpers used alongside the grid.

use std::hash::Hash;

use rustc_hash::FxHashSet;

/// Splits `items` into consecutive chunks of `size` elements.
///
/// The last chunk holds the remainder and may be shorter. Returns an empty
/// vector when `size` is 0.
pub fn batch<T>(items: &[T], size: usize) -> Vec<&[T]> {
    if size == 0 {
        return Vec::new();
    }
    items.chunks(size).collect()
}

/// Eliminates duplicated elements, keeping the first occurrence of each in order.
pub fn distinct<T: Eq + Hash + Clone>(items: impl IntoIterator<Item = T>) -> Vec<T> {
    let iter = items.into_iter();
    let mut done = FxHashSet::with_capacity_and_hasher(iter.size_hint().0, Default::default());
    let mut result = Vec::with_capacity(iter.size_hint().0);
    for item in iter {
        if done.insert(item.clone()) {
            result.push(item);
        }
    }
    result
}
