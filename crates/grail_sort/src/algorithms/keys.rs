use std::cmp::Ordering::{self, Equal};

use super::common::search_leftmost;
use super::rotation::rotate;

pub(crate) fn collect_keys<T, F: FnMut(&T, &T) -> Ordering>(
    data: &mut [T],
    start: usize,
    len: usize,
    ideal_keys: usize,
    cmp: &mut F,
) -> usize {
    let mut keys_found = 1;
    let mut first_key = 0;
    let mut current = 1;

    while current < len && keys_found < ideal_keys {
        let insert_pos = search_leftmost(
            data,
            start + first_key,
            keys_found,
            &data[start + current],
            cmp,
        );

        if insert_pos == keys_found
            || cmp(&data[start + current], &data[start + first_key + insert_pos]) != Equal
        {
            rotate(
                data,
                start + first_key,
                keys_found,
                current - (first_key + keys_found),
            );
            first_key = current - keys_found;
            rotate(data, start + first_key + insert_pos, keys_found - insert_pos, 1);
            keys_found += 1;
        }
        current += 1;
    }

    rotate(data, start, first_key, keys_found);
    keys_found
}
