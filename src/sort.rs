//! Insertion-sort helpers from `silk/sort.c` used by the NLSF quantizer and
//! stabilizer.
//!
//! Both routines operate in-place on fixed-point vectors; the top-`k` variant
//! additionally tracks the original element indices so callers can recover
//! which codebook entries survived the selection.

/// Sorts the first `k` elements of `a` in increasing order while tracking the
/// indices of the selected elements.
///
/// Mirrors `silk_insertion_sort_increasing`. Only the first `k` positions end
/// up sorted; the tail of the slice is used as a candidate pool and is left
/// in an unspecified order, exactly like the C routine.
pub fn insertion_sort_increasing(a: &mut [i32], idx: &mut [i32], k: usize) {
    debug_assert!(k > 0);
    debug_assert!(k <= a.len());
    debug_assert!(k <= idx.len());

    for (i, slot) in idx.iter_mut().enumerate().take(k) {
        *slot = i as i32;
    }

    for i in 1..k {
        let value = a[i];
        let mut j = i;
        while j > 0 && value < a[j - 1] {
            a[j] = a[j - 1];
            idx[j] = idx[j - 1];
            j -= 1;
        }
        a[j] = value;
        idx[j] = i as i32;
    }

    for i in k..a.len() {
        let value = a[i];
        if value < a[k - 1] {
            let mut j = k - 1;
            while j > 0 && value < a[j - 1] {
                a[j] = a[j - 1];
                idx[j] = idx[j - 1];
                j -= 1;
            }
            a[j] = value;
            idx[j] = i as i32;
        }
    }
}

/// Sorts the entire slice in increasing order.
///
/// Mirrors `silk_insertion_sort_increasing_all_values_int16`, the fall-back
/// path of the NLSF stabilizer.
pub fn insertion_sort_increasing_all_values_int16(a: &mut [i16]) {
    for i in 1..a.len() {
        let value = a[i];
        let mut j = i;
        while j > 0 && value < a[j - 1] {
            a[j] = a[j - 1];
            j -= 1;
        }
        a[j] = value;
    }
}

#[cfg(test)]
mod tests {
    use super::{insertion_sort_increasing, insertion_sort_increasing_all_values_int16};

    #[test]
    fn top_k_sort_tracks_source_indices() {
        let mut values = [26_000_000, 3_100_000, 5_000_000, 7_800_000, 2_400_000];
        let mut idx = [0i32; 3];

        insertion_sort_increasing(&mut values, &mut idx, 3);

        assert_eq!(&values[..3], &[2_400_000, 3_100_000, 5_000_000]);
        assert_eq!(idx, [4, 1, 2]);
    }

    #[test]
    fn top_one_sort_finds_the_minimum() {
        let mut values = [42, -7, 13];
        let mut idx = [0i32; 1];

        insertion_sort_increasing(&mut values, &mut idx, 1);

        assert_eq!(values[0], -7);
        assert_eq!(idx[0], 1);
    }

    #[test]
    fn full_sort_orders_entire_slice() {
        let mut values = [30_000i16, -2_000, 15_000, 16_000, 17_000];
        insertion_sort_increasing_all_values_int16(&mut values);
        assert_eq!(values, [-2_000, 15_000, 16_000, 17_000, 30_000]);
    }
}
