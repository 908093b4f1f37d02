use std::cmp::Ordering::{self, Greater};

use super::merge::{merge_backwards, merge_forwards};
use super::rotation::rotate;

pub(crate) fn build_blocks<T, F: FnMut(&T, &T) -> Ordering>(
    data: &mut [T],
    start: usize,
    len: usize,
    buffer_len: usize,
    cmp: &mut F,
) {
    debug_assert!(start >= buffer_len && buffer_len >= 2);
    pairwise_swaps(data, start, len, cmp);
    build_in_place(data, start - 2, len, 2, buffer_len, cmp);
}

fn pairwise_swaps<T, F: FnMut(&T, &T) -> Ordering>(
    data: &mut [T],
    start: usize,
    len: usize,
    cmp: &mut F,
) {
    let mut index = 1;
    while index < len {
        let left = start + index - 1;
        let right = start + index;

        if cmp(&data[left], &data[right]) == Greater {
            data.swap(left - 2, right);
            data.swap(right - 2, left);
        } else {
            data.swap(left - 2, left);
            data.swap(right - 2, right);
        }
        index += 2;
    }

    let left = start + index - 1;
    if left < start + len {
        data.swap(left - 2, left);
    }
}

fn build_in_place<T, F: FnMut(&T, &T) -> Ordering>(
    data: &mut [T],
    mut start: usize,
    len: usize,
    current_len: usize,
    buffer_len: usize,
    cmp: &mut F,
) {
    let mut merge_len = current_len;
    while merge_len < buffer_len {
        let both_merges = 2 * merge_len;
        let mut merge_index = 0;
        while merge_index + both_merges <= len {
            merge_forwards(data, start + merge_index, merge_len, merge_len, merge_len, cmp);
            merge_index += both_merges;
        }

        let left_over = len - merge_index;
        if left_over > merge_len {
            merge_forwards(
                data,
                start + merge_index,
                merge_len,
                left_over - merge_len,
                merge_len,
                cmp,
            );
        } else {
            rotate(data, start + merge_index - merge_len, merge_len, left_over);
        }

        start -= merge_len;
        merge_len = both_merges;
    }

    let both_merges = 2 * buffer_len;
    let final_block = len % both_merges;
    let final_offset = start + len - final_block;
    if final_block <= buffer_len {
        rotate(data, final_offset, final_block, buffer_len);
    } else {
        merge_backwards(
            data,
            final_offset,
            buffer_len,
            final_block - buffer_len,
            buffer_len,
            cmp,
        );
    }

    for pair in (0..len / both_merges).rev() {
        merge_backwards(
            data,
            start + pair * both_merges,
            buffer_len,
            buffer_len,
            buffer_len,
            cmp,
        );
    }
}
