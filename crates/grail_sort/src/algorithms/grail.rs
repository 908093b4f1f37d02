use std::cmp::Ordering;

use tracing::trace;

use crate::TUNED_PARAMS;

use super::blocks::{CombineRound, combine_blocks};
use super::build::build_blocks;
use super::common::insertion_sort;
use super::keys::collect_keys;
use super::lazy::{lazy_merge, lazy_stable_sort};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SortPath {
    Insertion,
    Degenerate,
    IdealBuffer,
    KeyBuffer,
}

impl SortPath {
    pub(crate) fn label(self) -> &'static str {
        match self {
            Self::Insertion => "insertion",
            Self::Degenerate => "degenerate",
            Self::IdealBuffer => "ideal_buffer",
            Self::KeyBuffer => "key_buffer",
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct BlockPlan {
    pub(crate) block_len: usize,
    pub(crate) key_len: usize,
    pub(crate) ideal_keys: usize,
}

impl BlockPlan {
    pub(crate) fn new(len: usize) -> Self {
        let mut block_len = 1;
        while block_len * block_len < len {
            block_len *= 2;
        }
        let key_len = len.div_ceil(block_len);
        Self {
            block_len,
            key_len,
            ideal_keys: key_len + block_len,
        }
    }
}

pub(crate) fn sort<T, F: FnMut(&T, &T) -> Ordering>(data: &mut [T], cmp: &mut F) -> SortPath {
    let len = data.len();
    if len < TUNED_PARAMS.insertion_threshold {
        trace_path(SortPath::Insertion, len, 0, 0, 0);
        insertion_sort(data, 0, len, cmp);
        return SortPath::Insertion;
    }

    let plan = BlockPlan::new(len);
    let keys_found = collect_keys(data, 0, len, plan.ideal_keys, cmp);

    if keys_found < TUNED_PARAMS.min_distinct_keys {
        trace_path(SortPath::Degenerate, len, plan.block_len, plan.key_len, keys_found);
        lazy_stable_sort(data, 0, len, cmp);
        return SortPath::Degenerate;
    }

    let ideal_buffer = keys_found >= plan.ideal_keys;
    let (block_len, key_len) = if ideal_buffer {
        (plan.block_len, plan.key_len)
    } else {
        let mut key_len = plan.block_len;
        while key_len > keys_found {
            key_len /= 2;
        }
        (0, key_len)
    };
    let path = if ideal_buffer {
        SortPath::IdealBuffer
    } else {
        SortPath::KeyBuffer
    };
    trace_path(path, len, block_len, key_len, keys_found);

    let buffer_end = block_len + key_len;
    let body_len = len - buffer_end;
    let mut subarray_len = if ideal_buffer { block_len } else { key_len };

    build_blocks(data, buffer_end, body_len, subarray_len, cmp);

    while body_len > 2 * subarray_len {
        subarray_len *= 2;

        let mut round = CombineRound {
            keys: 0,
            start: buffer_end,
            len: body_len,
            subarray_len,
            block_len,
            scrolling_buffer: ideal_buffer,
        };
        if !ideal_buffer {
            let half_key_len = key_len / 2;
            if half_key_len * half_key_len >= 2 * subarray_len {
                round.block_len = half_key_len;
                round.scrolling_buffer = true;
            } else {
                let min_keys = min_block_keys(key_len, subarray_len * keys_found / 2);
                round.block_len = 2 * subarray_len / min_keys;
            }
        }

        combine_blocks(data, round, cmp);
    }

    insertion_sort(data, 0, buffer_end, cmp);
    lazy_merge(data, 0, buffer_end, body_len, cmp);
    path
}

fn trace_path(path: SortPath, len: usize, block_len: usize, key_len: usize, keys_found: usize) {
    trace!(
        path = path.label(),
        len,
        block_len,
        key_len,
        keys_found,
        "sort path chosen"
    );
}

fn min_block_keys(key_len: usize, mut block_keys_sum: usize) -> usize {
    let mut min_keys = 1;
    while min_keys < key_len && block_keys_sum != 0 {
        min_keys *= 2;
        block_keys_sum /= 8;
    }
    min_keys
}
