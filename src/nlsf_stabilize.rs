//! NLSF stabilizer, from `silk/NLSF_stabilize.c` in the reference
//! implementation.
//!
//! Moves NLSFs towards their mean to ensure each value stays at least the
//! codebook's minimum delta away from its neighbours and the 0 and pi
//! borders. The smallest distance is fixed up first, which does not
//! invalidate the sorting.

use crate::sort::insertion_sort_increasing_all_values_int16;

const MAX_LOOPS: usize = 20;

/// Stabilizes a single NLSF vector in place.
///
/// `delta_min_q15` holds the minimum distance to the previous element for
/// every position, plus a final entry with the minimum distance between the
/// last NLSF and `1 << 15`; it must be one longer than `nlsf_q15`.
#[allow(clippy::cast_possible_truncation)]
pub fn nlsf_stabilize(nlsf_q15: &mut [i16], delta_min_q15: &[i16]) {
    let order = nlsf_q15.len();
    assert_eq!(order + 1, delta_min_q15.len(), "delta table length mismatch");
    assert!(order > 1);

    for _ in 0..MAX_LOOPS {
        // Find the smallest distance, including the distances to the borders.
        let mut min_diff = i32::from(nlsf_q15[0]) - i32::from(delta_min_q15[0]);
        let mut center = 0;

        for i in 1..order {
            let diff = i32::from(nlsf_q15[i])
                - (i32::from(nlsf_q15[i - 1]) + i32::from(delta_min_q15[i]));
            if diff < min_diff {
                min_diff = diff;
                center = i;
            }
        }

        let diff = (1 << 15) - (i32::from(nlsf_q15[order - 1]) + i32::from(delta_min_q15[order]));
        if diff < min_diff {
            min_diff = diff;
            center = order;
        }

        if min_diff >= 0 {
            // All distances are at least the minimum, done.
            return;
        }

        if center == 0 {
            // Move away from the lower limit.
            nlsf_q15[0] = delta_min_q15[0];
        } else if center == order {
            // Move away from the upper limit.
            nlsf_q15[order - 1] = ((1 << 15) - i32::from(delta_min_q15[order])) as i16;
        } else {
            // Find the lower and upper extremes for the location of the
            // offending pair's center frequency.
            let mut min_center_q15 = 0;
            for &delta in &delta_min_q15[..center] {
                min_center_q15 += i32::from(delta);
            }
            min_center_q15 += i32::from(delta_min_q15[center]) >> 1;

            let mut max_center_q15 = 1 << 15;
            for &delta in &delta_min_q15[center + 1..] {
                max_center_q15 -= i32::from(delta);
            }
            max_center_q15 -= i32::from(delta_min_q15[center]) >> 1;

            // Move the pair apart symmetrically around their midpoint.
            let midpoint = i32::from(nlsf_q15[center - 1]) + i32::from(nlsf_q15[center]);
            let center_freq_q15 = rshift_round(midpoint, 1).clamp(min_center_q15, max_center_q15);

            nlsf_q15[center - 1] = (center_freq_q15 - (i32::from(delta_min_q15[center]) >> 1)) as i16;
            nlsf_q15[center] = (i32::from(nlsf_q15[center - 1]) + i32::from(delta_min_q15[center])) as i16;
        }
    }

    // Fallback for badly behaved input: sort, then keep one pass of minimum
    // distance enforcement in each direction.
    insertion_sort_increasing_all_values_int16(nlsf_q15);

    nlsf_q15[0] = nlsf_q15[0].max(delta_min_q15[0]);
    for i in 1..order {
        let lower = i32::from(nlsf_q15[i - 1]) + i32::from(delta_min_q15[i]);
        nlsf_q15[i] = nlsf_q15[i].max(lower.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16);
    }

    nlsf_q15[order - 1] =
        nlsf_q15[order - 1].min(((1 << 15) - i32::from(delta_min_q15[order])) as i16);
    for i in (0..order - 1).rev() {
        nlsf_q15[i] = nlsf_q15[i].min(nlsf_q15[i + 1] - delta_min_q15[i + 1]);
    }
}

#[inline]
fn rshift_round(value: i32, shift: u32) -> i32 {
    debug_assert!(shift > 0);
    if shift == 1 {
        (value >> 1) + (value & 1)
    } else {
        ((value >> (shift - 1)) + 1) >> 1
    }
}
