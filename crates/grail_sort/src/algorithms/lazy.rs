use std::cmp::Ordering::{self, Greater};

use super::common::{search_leftmost, search_rightmost};
use super::rotation::rotate;

pub(crate) fn lazy_merge<T, F: FnMut(&T, &T) -> Ordering>(
    data: &mut [T],
    mut start: usize,
    mut left_len: usize,
    mut right_len: usize,
    cmp: &mut F,
) {
    if left_len == 0 || right_len == 0 {
        return;
    }

    if left_len < right_len {
        while left_len != 0 {
            let insert_pos =
                search_leftmost(data, start + left_len, right_len, &data[start], cmp);

            if insert_pos != 0 {
                rotate(data, start, left_len, insert_pos);
                start += insert_pos;
                right_len -= insert_pos;
            }
            if right_len == 0 {
                break;
            }

            start += 1;
            left_len -= 1;
            while left_len != 0 && cmp(&data[start], &data[start + left_len]) != Greater {
                start += 1;
                left_len -= 1;
            }
        }
    } else {
        let mut end = start + left_len + right_len - 1;
        while right_len != 0 {
            let insert_pos = search_rightmost(data, start, left_len, &data[end], cmp);

            if insert_pos != left_len {
                rotate(data, start + insert_pos, left_len - insert_pos, right_len);
                end -= left_len - insert_pos;
                left_len = insert_pos;
            }
            if left_len == 0 {
                break;
            }

            let left_end = start + left_len - 1;
            end -= 1;
            right_len -= 1;
            while right_len != 0 && cmp(&data[left_end], &data[end]) != Greater {
                end -= 1;
                right_len -= 1;
            }
        }
    }
}

pub(crate) fn lazy_stable_sort<T, F: FnMut(&T, &T) -> Ordering>(
    data: &mut [T],
    start: usize,
    len: usize,
    cmp: &mut F,
) {
    for index in (start + 1..start + len).step_by(2) {
        if cmp(&data[index - 1], &data[index]) == Greater {
            data.swap(index - 1, index);
        }
    }

    let mut merge_len = 2;
    while merge_len < len {
        let both_merges = 2 * merge_len;
        let mut merge_index = 0;
        while merge_index + both_merges <= len {
            lazy_merge(data, start + merge_index, merge_len, merge_len, cmp);
            merge_index += both_merges;
        }

        let left_over = len - merge_index;
        if left_over > merge_len {
            lazy_merge(
                data,
                start + merge_index,
                merge_len,
                left_over - merge_len,
                cmp,
            );
        }

        merge_len = both_merges;
    }
}
