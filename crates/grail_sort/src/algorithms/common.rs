use std::cmp::Ordering::{self, Greater, Less};

#[inline]
pub(crate) fn search_leftmost<T, F: FnMut(&T, &T) -> Ordering>(
    data: &[T],
    start: usize,
    len: usize,
    target: &T,
    cmp: &mut F,
) -> usize {
    let mut left = 0usize;
    let mut right = len;
    while left < right {
        let mid = left + ((right - left) >> 1);
        if cmp(&data[start + mid], target) == Less {
            left = mid + 1;
        } else {
            right = mid;
        }
    }
    left
}

#[inline]
pub(crate) fn search_rightmost<T, F: FnMut(&T, &T) -> Ordering>(
    data: &[T],
    start: usize,
    len: usize,
    target: &T,
    cmp: &mut F,
) -> usize {
    let mut left = 0usize;
    let mut right = len;
    while left < right {
        let mid = left + ((right - left) >> 1);
        if cmp(&data[start + mid], target) == Greater {
            right = mid;
        } else {
            left = mid + 1;
        }
    }
    left
}

pub(crate) fn insertion_sort<T, F: FnMut(&T, &T) -> Ordering>(
    data: &mut [T],
    start: usize,
    len: usize,
    cmp: &mut F,
) {
    for i in (start + 1)..(start + len) {
        let mut j = i;
        while j > start && cmp(&data[j - 1], &data[j]) == Greater {
            data.swap(j - 1, j);
            j -= 1;
        }
    }
}

#[cfg(test)]
pub(crate) fn by_key(a: &(u32, usize), b: &(u32, usize)) -> Ordering {
    a.0.cmp(&b.0)
}
