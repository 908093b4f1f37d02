use std::cmp::Ordering::{self, Equal, Greater, Less};

use tracing::trace;

use super::common::insertion_sort;
use super::lazy::lazy_merge;
use super::merge::{Origin, buffer_reset, merge_forwards, smart_lazy_merge, smart_merge};
use super::rotation::block_swap;

#[derive(Clone, Copy, Debug)]
pub(crate) struct CombineRound {
    pub(crate) keys: usize,
    pub(crate) start: usize,
    pub(crate) len: usize,
    pub(crate) subarray_len: usize,
    pub(crate) block_len: usize,
    pub(crate) scrolling_buffer: bool,
}

pub(crate) fn combine_blocks<T, F: FnMut(&T, &T) -> Ordering>(
    data: &mut [T],
    round: CombineRound,
    cmp: &mut F,
) {
    let CombineRound {
        keys,
        start,
        mut len,
        subarray_len,
        block_len,
        scrolling_buffer,
    } = round;
    trace!(subarray_len, block_len, scrolling_buffer, "combining blocks");

    let both_len = 2 * subarray_len;
    let merge_count = len / both_len;
    let mut last_subarray = len - both_len * merge_count;
    if last_subarray <= subarray_len {
        len -= last_subarray;
        last_subarray = 0;
    }

    for merge_index in 0..merge_count {
        let offset = start + merge_index * both_len;
        let block_count = both_len / block_len;

        insertion_sort(data, keys, block_count, cmp);
        let median_key = block_select_sort(
            data,
            keys,
            offset,
            subarray_len / block_len,
            block_count,
            block_len,
            cmp,
        );

        let layout = BlockLayout {
            keys,
            median_key: keys + median_key,
            start: offset,
            block_count,
            block_len,
            final_left_blocks: 0,
            final_len: 0,
        };
        if scrolling_buffer {
            merge_blocks(data, layout, cmp);
        } else {
            lazy_merge_blocks(data, layout, cmp);
        }
    }

    if last_subarray != 0 {
        let offset = start + merge_count * both_len;
        let right_blocks = last_subarray / block_len;

        // One extra key so the median tag is valid even when the trailing
        // run has no full block of its own.
        insertion_sort(data, keys, right_blocks + 1, cmp);
        let median_key = block_select_sort(
            data,
            keys,
            offset,
            subarray_len / block_len,
            right_blocks,
            block_len,
            cmp,
        );

        let final_len = last_subarray - right_blocks * block_len;
        let final_left_blocks = if final_len != 0 {
            count_final_left_blocks(data, offset, right_blocks, block_len, cmp)
        } else {
            0
        };

        let block_count = right_blocks - final_left_blocks;
        if block_count == 0 {
            let left_len = final_left_blocks * block_len;
            if scrolling_buffer {
                merge_forwards(data, offset, left_len, final_len, block_len, cmp);
            } else {
                lazy_merge(data, offset, left_len, final_len, cmp);
            }
        } else {
            let layout = BlockLayout {
                keys,
                median_key: keys + median_key,
                start: offset,
                block_count,
                block_len,
                final_left_blocks,
                final_len,
            };
            if scrolling_buffer {
                merge_blocks(data, layout, cmp);
            } else {
                lazy_merge_blocks(data, layout, cmp);
            }
        }
    }

    if scrolling_buffer {
        buffer_reset(data, start, len, block_len);
    }
}

fn block_select_sort<T, F: FnMut(&T, &T) -> Ordering>(
    data: &mut [T],
    keys: usize,
    start: usize,
    mut median_key: usize,
    block_count: usize,
    block_len: usize,
    cmp: &mut F,
) -> usize {
    for block in 1..block_count {
        let left = block - 1;
        let mut right = left;

        for index in block..block_count {
            let order = cmp(
                &data[start + right * block_len],
                &data[start + index * block_len],
            );
            if order == Greater
                || (order == Equal && cmp(&data[keys + right], &data[keys + index]) == Greater)
            {
                right = index;
            }
        }

        if right != left {
            block_swap(
                data,
                start + left * block_len,
                start + right * block_len,
                block_len,
            );
            data.swap(keys + left, keys + right);

            if median_key == left {
                median_key = right;
            } else if median_key == right {
                median_key = left;
            }
        }
    }
    median_key
}

fn count_final_left_blocks<T, F: FnMut(&T, &T) -> Ordering>(
    data: &[T],
    offset: usize,
    block_count: usize,
    block_len: usize,
    cmp: &mut F,
) -> usize {
    let fragment = offset + block_count * block_len;
    let mut left_blocks = 0;
    while left_blocks < block_count
        && cmp(
            &data[fragment],
            &data[fragment - (left_blocks + 1) * block_len],
        ) == Less
    {
        left_blocks += 1;
    }
    left_blocks
}

#[derive(Clone, Copy, Debug)]
struct BlockLayout {
    keys: usize,
    /// Absolute index of the first right-run tag.
    median_key: usize,
    start: usize,
    block_count: usize,
    block_len: usize,
    final_left_blocks: usize,
    final_len: usize,
}

impl BlockLayout {
    #[inline]
    fn origin<T, F: FnMut(&T, &T) -> Ordering>(
        &self,
        data: &[T],
        key: usize,
        cmp: &mut F,
    ) -> Origin {
        if cmp(&data[key], &data[self.median_key]) == Less {
            Origin::Left
        } else {
            Origin::Right
        }
    }
}

/// Sweeps the selection-sorted blocks through the scrolling buffer that sits
/// `block_len` slots before `layout.start`, shifting everything left by one
/// block.
fn merge_blocks<T, F: FnMut(&T, &T) -> Ordering>(
    data: &mut [T],
    layout: BlockLayout,
    cmp: &mut F,
) {
    let BlockLayout {
        keys,
        start,
        block_count,
        block_len,
        final_left_blocks,
        final_len,
        ..
    } = layout;

    let mut block_index = block_len;
    let mut fragment_len = block_len;
    let mut origin = layout.origin(data, keys, cmp);

    for key_index in 1..block_count {
        let fragment = start + block_index - fragment_len;
        let next_origin = layout.origin(data, keys + key_index, cmp);

        if next_origin == origin {
            block_swap(data, fragment - block_len, fragment, fragment_len);
            fragment_len = block_len;
        } else {
            smart_merge(
                data,
                fragment,
                &mut fragment_len,
                &mut origin,
                block_len,
                block_len,
                cmp,
            );
        }
        block_index += block_len;
    }

    let mut fragment = start + block_index - fragment_len;
    if final_len != 0 {
        if origin == Origin::Right {
            block_swap(data, fragment - block_len, fragment, fragment_len);
            fragment = start + block_index;
            fragment_len = block_len * final_left_blocks;
        } else {
            fragment_len += block_len * final_left_blocks;
        }
        merge_forwards(data, fragment, fragment_len, final_len, block_len, cmp);
    } else {
        block_swap(data, fragment, fragment - block_len, fragment_len);
    }
}

fn lazy_merge_blocks<T, F: FnMut(&T, &T) -> Ordering>(
    data: &mut [T],
    layout: BlockLayout,
    cmp: &mut F,
) {
    let BlockLayout {
        keys,
        start,
        block_count,
        block_len,
        final_left_blocks,
        final_len,
        ..
    } = layout;

    let mut block_index = block_len;
    let mut fragment_len = block_len;
    let mut origin = layout.origin(data, keys, cmp);

    for key_index in 1..block_count {
        let fragment = start + block_index - fragment_len;
        let next_origin = layout.origin(data, keys + key_index, cmp);

        if next_origin == origin {
            fragment_len = block_len;
        } else {
            smart_lazy_merge(data, fragment, &mut fragment_len, &mut origin, block_len, cmp);
        }
        block_index += block_len;
    }

    if final_len != 0 {
        let mut fragment = start + block_index - fragment_len;
        if origin == Origin::Right {
            fragment = start + block_index;
            fragment_len = block_len * final_left_blocks;
        } else {
            fragment_len += block_len * final_left_blocks;
        }
        lazy_merge(data, fragment, fragment_len, final_len, cmp);
    }
}
