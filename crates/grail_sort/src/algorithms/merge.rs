use std::cmp::Ordering::{self, Greater, Less};

use super::common::{search_leftmost, search_rightmost};
use super::rotation::{block_reversal, block_swap, rotate};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Origin {
    Left,
    Right,
}

impl Origin {
    #[inline]
    fn flip(self) -> Self {
        match self {
            Origin::Left => Origin::Right,
            Origin::Right => Origin::Left,
        }
    }
}

pub(crate) fn merge_forwards<T, F: FnMut(&T, &T) -> Ordering>(
    data: &mut [T],
    start: usize,
    left_len: usize,
    right_len: usize,
    buffer_len: usize,
    cmp: &mut F,
) {
    debug_assert!(start >= buffer_len && buffer_len >= right_len);
    let mut buffer = start - buffer_len;
    let middle = start + left_len;
    let end = middle + right_len;

    if left_len == 0 || right_len == 0 || cmp(&data[middle - 1], &data[middle]) != Greater {
        rotate(data, buffer, buffer_len, left_len + right_len);
        return;
    }
    if cmp(&data[end - 1], &data[start]) == Less {
        block_reversal(data, buffer, buffer_len, left_len, right_len);
        return;
    }

    let mut left = start;
    let mut right = middle;
    while right < end {
        if left == middle || cmp(&data[left], &data[right]) == Greater {
            data.swap(buffer, right);
            right += 1;
        } else {
            data.swap(buffer, left);
            left += 1;
        }
        buffer += 1;
    }

    if buffer != left {
        block_swap(data, buffer, left, middle - left);
    }
}

pub(crate) fn merge_backwards<T, F: FnMut(&T, &T) -> Ordering>(
    data: &mut [T],
    start: usize,
    left_len: usize,
    right_len: usize,
    buffer_len: usize,
    cmp: &mut F,
) {
    let middle = start + left_len;
    let end = middle + right_len;
    debug_assert!(end + buffer_len <= data.len() && buffer_len >= left_len);

    if left_len == 0 || right_len == 0 || cmp(&data[middle - 1], &data[middle]) != Greater {
        rotate(data, start, left_len + right_len, buffer_len);
        return;
    }
    if cmp(&data[end - 1], &data[start]) == Less {
        block_reversal(data, start, left_len, right_len, buffer_len);
        return;
    }

    // Exclusive cursors, walking down.
    let mut left = middle;
    let mut right = end;
    let mut buffer = end + buffer_len;
    while left > start {
        buffer -= 1;
        if right == middle || cmp(&data[left - 1], &data[right - 1]) == Greater {
            left -= 1;
            data.swap(buffer, left);
        } else {
            right -= 1;
            data.swap(buffer, right);
        }
    }

    while right > middle {
        buffer -= 1;
        right -= 1;
        if buffer != right {
            data.swap(buffer, right);
        }
    }
}

/// Merges a pending fragment `data[start..start + *left_len]` from run
/// `*origin` with the following block of `right_len` elements through the
/// buffer `buffer_len` slots in front of it.
///
/// Stops as soon as one side runs out. Whatever remains of the other side
/// becomes the new pending fragment and is left at the tail of the merged
/// region; `left_len` and `origin` are updated to describe it.
pub(crate) fn smart_merge<T, F: FnMut(&T, &T) -> Ordering>(
    data: &mut [T],
    start: usize,
    left_len: &mut usize,
    origin: &mut Origin,
    right_len: usize,
    buffer_len: usize,
    cmp: &mut F,
) {
    debug_assert!(buffer_len >= right_len);
    let mut left = start;
    let middle = start + *left_len;
    let mut right = middle;
    let end = middle + right_len;
    let mut buffer = start - buffer_len;

    while left < middle && right < end {
        let take_left = match *origin {
            Origin::Left => cmp(&data[left], &data[right]) != Greater,
            Origin::Right => cmp(&data[left], &data[right]) == Less,
        };
        if take_left {
            data.swap(buffer, left);
            left += 1;
        } else {
            data.swap(buffer, right);
            right += 1;
        }
        buffer += 1;
    }

    if left < middle {
        *left_len = middle - left;
        buffer_rewind(data, left, middle, end);
    } else {
        *left_len = end - right;
        *origin = origin.flip();
    }
}

pub(crate) fn smart_lazy_merge<T, F: FnMut(&T, &T) -> Ordering>(
    data: &mut [T],
    mut start: usize,
    left_len: &mut usize,
    origin: &mut Origin,
    mut right_len: usize,
    cmp: &mut F,
) {
    let boundary = cmp(&data[start + *left_len - 1], &data[start + *left_len]);
    let needs_merge = match *origin {
        Origin::Left => boundary == Greater,
        Origin::Right => boundary != Less,
    };

    if needs_merge {
        while *left_len != 0 {
            let insert_pos = match *origin {
                Origin::Left => {
                    search_leftmost(data, start + *left_len, right_len, &data[start], cmp)
                }
                Origin::Right => {
                    search_rightmost(data, start + *left_len, right_len, &data[start], cmp)
                }
            };

            if insert_pos != 0 {
                rotate(data, start, *left_len, insert_pos);
                start += insert_pos;
                right_len -= insert_pos;
            }
            if right_len == 0 {
                return;
            }

            start += 1;
            *left_len -= 1;
            while *left_len != 0 {
                let order = cmp(&data[start], &data[start + *left_len]);
                let in_place = match *origin {
                    Origin::Left => order != Greater,
                    Origin::Right => order == Less,
                };
                if !in_place {
                    break;
                }
                start += 1;
                *left_len -= 1;
            }
        }
    }

    *left_len = right_len;
    *origin = origin.flip();
}

fn buffer_rewind<T>(data: &mut [T], left: usize, mut middle: usize, mut end: usize) {
    while middle > left {
        end -= 1;
        middle -= 1;
        data.swap(end, middle);
    }
}

pub(crate) fn buffer_reset<T>(data: &mut [T], start: usize, len: usize, buffer_len: usize) {
    for index in (start..start + len).rev() {
        data.swap(index, index - buffer_len);
    }
}

#[cfg(test)]
mod tests {
    use super::super::common::by_key;
    use super::*;

    const B: u32 = 100;

    fn runs(buffer: usize, left: &[u32], right: &[u32]) -> Vec<(u32, usize)> {
        (0..buffer as u32)
            .map(|i| B + i)
            .chain(left.iter().copied())
            .chain(right.iter().copied())
            .zip(0..)
            .collect()
    }

    fn merged_keys(data: &[(u32, usize)]) -> Vec<(u32, usize)> {
        let mut out: Vec<_> = data.iter().copied().filter(|&(v, _)| v < B).collect();
        out.sort_by(by_key);
        out
    }

    #[test]
    fn merge_forwards_general_path() {
        let mut data = runs(3, &[1, 3, 3, 6], &[2, 3, 4]);
        let expected = merged_keys(&data);
        merge_forwards(&mut data, 3, 4, 3, 3, &mut by_key);
        assert_eq!(&data[..7], expected.as_slice());
        assert!(data[7..].iter().all(|&(v, _)| v >= B));
    }

    #[test]
    fn merge_forwards_fast_paths() {
        let mut ordered = runs(2, &[1, 2, 3], &[3, 4]);
        let expected = merged_keys(&ordered);
        merge_forwards(&mut ordered, 2, 3, 2, 2, &mut by_key);
        assert_eq!(&ordered[..5], expected.as_slice());
        assert_eq!(&ordered[5..], &[(B, 0), (B + 1, 1)]);

        let mut reversed = runs(2, &[5, 6, 7], &[1, 2]);
        let expected = merged_keys(&reversed);
        merge_forwards(&mut reversed, 2, 3, 2, 2, &mut by_key);
        assert_eq!(&reversed[..5], expected.as_slice());
        assert_eq!(&reversed[5..], &[(B, 0), (B + 1, 1)]);
    }

    #[test]
    fn merge_forwards_ties_are_not_reversed() {
        let mut data = runs(1, &[4, 4], &[4]);
        merge_forwards(&mut data, 1, 2, 1, 1, &mut by_key);
        assert_eq!(&data[..3], &[(4, 1), (4, 2), (4, 3)]);
    }

    #[test]
    fn merge_backwards_all_paths() {
        for (left, right) in [
            (vec![1, 3, 5, 5], vec![2, 5, 6]),
            (vec![1, 2], vec![2, 3]),
            (vec![7, 8], vec![1, 2, 3]),
        ] {
            let mut data: Vec<(u32, usize)> = left
                .iter()
                .chain(right.iter())
                .copied()
                .chain((0..4).map(|i| B + i))
                .zip(0..)
                .collect();
            let expected = merged_keys(&data);
            merge_backwards(&mut data, 0, left.len(), right.len(), 4, &mut by_key);
            assert!(data[..4].iter().all(|&(v, _)| v >= B));
            assert_eq!(&data[4..], expected.as_slice());
        }
    }

    #[test]
    fn buffer_reset_moves_buffer_to_front() {
        let mut data = [1, 2, 3, 4, 90, 91];
        buffer_reset(&mut data, 2, 4, 2);
        assert_eq!(&data[..2], &[90, 91]);
        assert_eq!(&data[2..], &[1, 2, 3, 4]);
    }

    #[test]
    fn smart_merge_reports_leftover_fragment() {
        // buffer | fragment from the left run | block from the right run
        let mut data = runs(3, &[2, 5, 9], &[1, 5, 6]);
        let mut left_len = 3;
        let mut origin = Origin::Left;
        smart_merge(&mut data, 3, &mut left_len, &mut origin, 3, 3, &mut by_key);

        assert_eq!(left_len, 1);
        assert_eq!(origin, Origin::Left);
        assert_eq!(
            data.iter().map(|&(v, _)| v).filter(|&v| v < B).collect::<Vec<_>>(),
            vec![1, 2, 5, 5, 6, 9]
        );
        assert_eq!(data[8], (9, 5));
    }
}
