use std::mem::MaybeUninit;
use std::ptr;

use crate::TUNED_PARAMS;

const BRIDGE_CAPACITY: usize = TUNED_PARAMS.bridge_max;

/// Front to back, so overlapping ranges with `a < b` shift `b` down.
#[inline]
pub(crate) fn block_swap<T>(data: &mut [T], a: usize, b: usize, len: usize) {
    for i in 0..len {
        data.swap(a + i, b + i);
    }
}

pub(crate) fn rotate<T>(data: &mut [T], start: usize, left_len: usize, right_len: usize) {
    if left_len == 0 || right_len == 0 {
        return;
    }

    if left_len == right_len {
        block_swap(data, start, start + left_len, left_len);
        return;
    }

    let region = &mut data[start..start + left_len + right_len];
    if left_len == 1 {
        // SAFETY: `region` has `1 + right_len` elements; the moved-out head is
        // written back to the vacated tail slot.
        unsafe {
            let base = region.as_mut_ptr();
            let head = ptr::read(base);
            ptr::copy(base.add(1), base, right_len);
            ptr::write(base.add(right_len), head);
        }
    } else if right_len == 1 {
        // SAFETY: mirror of the branch above.
        unsafe {
            let base = region.as_mut_ptr();
            let tail = ptr::read(base.add(left_len));
            ptr::copy(base, base.add(1), left_len);
            ptr::write(base, tail);
        }
    } else if left_len.abs_diff(right_len) <= BRIDGE_CAPACITY {
        bridge_rotate(region, left_len);
    } else {
        conjoined_rotate(region, left_len, 0);
    }
}

/// Reorders three adjacent segments `L M R` into `R M L`.
pub(crate) fn block_reversal<T>(
    data: &mut [T],
    start: usize,
    left_len: usize,
    mid_len: usize,
    right_len: usize,
) {
    if left_len == right_len {
        block_swap(data, start, start + left_len + mid_len, left_len);
        return;
    }
    if left_len == 0 {
        rotate(data, start, mid_len, right_len);
        return;
    }
    if right_len == 0 {
        rotate(data, start, left_len, mid_len);
        return;
    }

    let region = &mut data[start..start + left_len + mid_len + right_len];
    if mid_len == 1 && left_len == 1 {
        // SAFETY: both singletons are held while `R` slides down by two.
        unsafe {
            let base = region.as_mut_ptr();
            let left = ptr::read(base);
            let mid = ptr::read(base.add(1));
            ptr::copy(base.add(2), base, right_len);
            ptr::write(base.add(right_len), mid);
            ptr::write(base.add(right_len + 1), left);
        }
    } else if mid_len == 1 && right_len == 1 {
        // SAFETY: mirror of the branch above.
        unsafe {
            let base = region.as_mut_ptr();
            let mid = ptr::read(base.add(left_len));
            let right = ptr::read(base.add(left_len + 1));
            ptr::copy(base, base.add(2), left_len);
            ptr::write(base, right);
            ptr::write(base.add(1), mid);
        }
    } else {
        conjoined_rotate(region, left_len, mid_len);
    }
}

fn bridge_rotate<T>(region: &mut [T], left_len: usize) {
    let len = region.len();
    let right_len = len - left_len;
    debug_assert!(left_len != right_len && left_len.abs_diff(right_len) <= BRIDGE_CAPACITY);

    let mut bridge = MaybeUninit::<[T; BRIDGE_CAPACITY]>::uninit();
    let tmp = bridge.as_mut_ptr().cast::<T>();
    let base = region.as_mut_ptr();

    // SAFETY: every index stays inside `region`; each slot is overwritten only
    // after its previous value has been moved elsewhere, and the parked bridge
    // is written back exactly once.
    unsafe {
        if left_len < right_len {
            let surplus = right_len - left_len;
            ptr::copy_nonoverlapping(base.add(left_len), tmp, surplus);

            let mut b = left_len;
            let mut c = right_len;
            let mut d = len;
            for _ in 0..left_len {
                b -= 1;
                c -= 1;
                d -= 1;
                ptr::copy_nonoverlapping(base.add(d), base.add(c), 1);
                ptr::copy_nonoverlapping(base.add(b), base.add(d), 1);
            }
            ptr::copy_nonoverlapping(tmp, base, surplus);
        } else {
            let surplus = left_len - right_len;
            ptr::copy_nonoverlapping(base.add(right_len), tmp, surplus);

            for i in 0..right_len {
                ptr::copy_nonoverlapping(base.add(i), base.add(right_len + i), 1);
                ptr::copy_nonoverlapping(base.add(left_len + i), base.add(i), 1);
            }
            ptr::copy_nonoverlapping(tmp, base.add(len - surplus), surplus);
        }
    }
}

fn conjoined_rotate<T>(region: &mut [T], left_len: usize, mid_len: usize) {
    let right_len = region.len() - left_len - mid_len;
    debug_assert!(left_len > 0 && right_len > 0);

    let mut a = 0;
    let mut b = left_len;
    let mut c = left_len + mid_len;
    let mut d = region.len();
    region[b..c].reverse();

    let base = region.as_mut_ptr();
    // SAFETY: `a < b <= c < d` holds before every cycle, so the slots touched
    // by one cycle are pairwise distinct and inside `region`. Each cycle reads
    // one element into `tmp` and writes it back into the slot it vacates last.
    unsafe {
        for _ in 0..left_len.min(right_len) / 2 {
            b -= 1;
            d -= 1;
            let tmp = ptr::read(base.add(b));
            ptr::copy_nonoverlapping(base.add(a), base.add(b), 1);
            ptr::copy_nonoverlapping(base.add(c), base.add(a), 1);
            ptr::copy_nonoverlapping(base.add(d), base.add(c), 1);
            ptr::write(base.add(d), tmp);
            a += 1;
            c += 1;
        }

        if left_len < right_len {
            for _ in 0..(d - c) / 2 {
                d -= 1;
                let tmp = ptr::read(base.add(c));
                ptr::copy_nonoverlapping(base.add(d), base.add(c), 1);
                ptr::copy_nonoverlapping(base.add(a), base.add(d), 1);
                ptr::write(base.add(a), tmp);
                a += 1;
                c += 1;
            }
        } else if right_len < left_len {
            for _ in 0..(b - a) / 2 {
                b -= 1;
                d -= 1;
                let tmp = ptr::read(base.add(b));
                ptr::copy_nonoverlapping(base.add(a), base.add(b), 1);
                ptr::copy_nonoverlapping(base.add(d), base.add(a), 1);
                ptr::write(base.add(d), tmp);
                a += 1;
            }
        }
    }

    region[a..d].reverse();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn naive_rotate(values: &[u32], start: usize, left: usize, right: usize) -> Vec<u32> {
        let mut out = values[..start].to_vec();
        out.extend_from_slice(&values[start + left..start + left + right]);
        out.extend_from_slice(&values[start..start + left]);
        out.extend_from_slice(&values[start + left + right..]);
        out
    }

    #[test]
    fn rotate_round_trips_every_size_pair() {
        for left in 0..=40 {
            for right in 0..=40 {
                let base: Vec<u32> = (0..(left + right + 6) as u32).collect();
                let mut data = base.clone();

                rotate(&mut data, 3, left, right);
                assert_eq!(
                    data,
                    naive_rotate(&base, 3, left, right),
                    "left={left} right={right}"
                );

                rotate(&mut data, 3, right, left);
                assert_eq!(data, base, "round trip left={left} right={right}");
            }
        }
    }

    #[test]
    fn rotate_large_difference_uses_conjoined_path() {
        let base: Vec<u32> = (0..1000).collect();
        for &(left, right) in &[(3, 997), (997, 3), (100, 900), (499, 501), (250, 260)] {
            let mut data = base.clone();
            rotate(&mut data, 0, left, right);
            assert_eq!(data, naive_rotate(&base, 0, left, right));
        }
    }

    #[test]
    fn rotate_moves_non_copy_values() {
        let base: Vec<String> = (0..37).map(|i| format!("item{i}")).collect();
        let mut data = base.clone();
        rotate(&mut data, 2, 11, 24);
        rotate(&mut data, 2, 24, 11);
        assert_eq!(data, base);

        rotate(&mut data, 0, 15, 19);
        let mut expected = base[15..34].to_vec();
        expected.extend_from_slice(&base[..15]);
        expected.extend_from_slice(&base[34..]);
        assert_eq!(data, expected);
    }

    #[test]
    fn block_reversal_matches_model() {
        for left in 0..=12 {
            for mid in 0..=12 {
                for right in 0..=12 {
                    let base: Vec<u32> = (0..(left + mid + right + 4) as u32).collect();
                    let mut data = base.clone();
                    block_reversal(&mut data, 2, left, mid, right);

                    let mut expected = base[..2].to_vec();
                    expected.extend_from_slice(&base[2 + left + mid..2 + left + mid + right]);
                    expected.extend_from_slice(&base[2 + left..2 + left + mid]);
                    expected.extend_from_slice(&base[2..2 + left]);
                    expected.extend_from_slice(&base[2 + left + mid + right..]);
                    assert_eq!(data, expected, "l={left} m={mid} r={right}");
                }
            }
        }
    }

    #[test]
    fn block_swap_overlapping_shifts() {
        let mut data = [0, 1, 2, 3, 4, 5];
        block_swap(&mut data, 0, 2, 4);
        assert_eq!(data, [2, 3, 4, 5, 0, 1]);
    }
}
