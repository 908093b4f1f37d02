//! Stable, in-place block merge sort.
//!
//! Sorting takes *O*(*n* log *n*) comparisons and moves and a constant amount
//! of extra memory: no buffer proportional to the input is ever allocated.
//! Part of the slice is borrowed as scratch instead. The sort first gathers up
//! to `√n` distinct elements as block tags and merge buffer, then merges
//! sorted blocks through that buffer and finally merges the borrowed elements
//! back in. Inputs with fewer than four distinct values fall back to a
//! rotation-based merge sort costing *O*(*n* log² *n*).
//!
//! Every entry point requires the comparator to be a total preorder. An
//! inconsistent comparator leaves the slice in an unspecified order but never
//! loses or duplicates an element. The same holds if it panics.

mod algorithms;

use std::cmp::Ordering;
use std::mem;

#[derive(Clone, Copy, Debug)]
pub struct TunedParams {
    /// Shorter inputs are insertion sorted.
    pub insertion_threshold: usize,
    /// Fewer distinct keys than this selects the rotation merge sort.
    pub min_distinct_keys: usize,
    /// Largest length difference handled by the stack-buffered rotation.
    pub bridge_max: usize,
}

pub const TUNED_PARAMS: TunedParams = TunedParams {
    insertion_threshold: 16,
    min_distinct_keys: 4,
    bridge_max: 8,
};

/// Sorts `data` in ascending order, keeping equal elements in their original
/// order.
#[inline]
pub fn sort<T: Ord>(data: &mut [T]) {
    sort_common(data, &mut T::cmp);
}

/// Sorts `data` with the three-way comparator `compare`, keeping elements it
/// reports as equal in their original order.
#[inline]
pub fn sort_by<T, F: FnMut(&T, &T) -> Ordering>(data: &mut [T], mut compare: F) {
    sort_common(data, &mut compare);
}

/// Sorts `data` by the key `f` extracts, calling `f` exactly once per
/// element. Slices shorter than two elements are returned untouched without
/// calling `f`.
///
/// The keys are cached in a `Vec<(K, usize)>`, so unlike the other entry
/// points this allocates *O*(*n*) memory.
///
/// ```
/// let mut words = ["delta", "Alpha", "charlie", "Bravo"];
/// grail_sort::sort_by_cached_key(&mut words, |w| w.to_lowercase());
/// assert_eq!(words, ["Alpha", "Bravo", "charlie", "delta"]);
/// ```
pub fn sort_by_cached_key<T, K: Ord, F: FnMut(&T) -> K>(data: &mut [T], mut f: F) {
    let len = data.len();
    if len < 2 {
        return;
    }

    let mut indices: Vec<(K, usize)> = data.iter().map(|x| f(x)).zip(0..).collect();
    sort_common(&mut indices, &mut |a: &(K, usize), b: &(K, usize)| {
        a.0.cmp(&b.0)
    });

    // `indices[i].1` names the element that belongs at `i`; positions before
    // `i` are already final, so follow the chain of earlier swaps to find
    // where that element lives now.
    for i in 0..len {
        let mut index = indices[i].1;
        while index < i {
            index = indices[index].1;
        }
        indices[i].1 = index;
        data.swap(i, index);
    }
}

/// Sorts `data` with a fallible comparator.
///
/// Returns the first error `compare` produces. `compare` is not called again
/// after failing and the rest of the sort treats all elements as equal, so
/// `data` is left as an unspecified permutation of its input.
///
/// ```
/// let mut v = vec!["10", "7", "x", "3"];
/// let err = grail_sort::try_sort_by(&mut v, |a, b| {
///     Ok::<_, std::num::ParseIntError>(a.parse::<i32>()?.cmp(&b.parse::<i32>()?))
/// });
/// assert!(err.is_err());
/// ```
pub fn try_sort_by<T, E, F>(data: &mut [T], mut compare: F) -> Result<(), E>
where
    F: FnMut(&T, &T) -> Result<Ordering, E>,
{
    let mut failure = None;
    sort_common(data, &mut |a: &T, b: &T| {
        if failure.is_some() {
            return Ordering::Equal;
        }
        compare(a, b).unwrap_or_else(|err| {
            failure = Some(err);
            Ordering::Equal
        })
    });
    failure.map_or(Ok(()), Err)
}

#[inline]
fn sort_common<T, F: FnMut(&T, &T) -> Ordering>(data: &mut [T], cmp: &mut F) {
    // Zero-sized values are indistinguishable, so every order is sorted.
    if mem::size_of::<T>() == 0 {
        return;
    }
    algorithms::grail::sort(data, cmp);
}
