//! Conversion from NLSFs to whitening filter coefficients.
//!
//! Port of `silk_NLSF2A` from `silk/NLSF2A.c` in the reference SILK
//! implementation. The NLSFs are mapped back to cosine-domain roots of the
//! symmetric and antisymmetric polynomials, the polynomials are multiplied
//! out, and the resulting predictor is scaled down until it fits in Q12 and
//! passes a stability check.

use crate::bwexpander_32::bwexpander_32;
use crate::interpolate::MAX_LPC_ORDER;
use crate::lpc_inv_pred_gain::lpc_inverse_pred_gain;
use crate::table_lsf_cos::SILK_LSF_COS_TAB_FIX_Q12;

const QA: i32 = 16;

const MAX_LPC_STABILIZE_ITERATIONS: usize = 16;
// 1 / 10000 in Q30, the minimum inverse prediction gain accepted as stable.
const MIN_INV_GAIN_Q30: i32 = 107_374;

/// Interleaving orders that spread rounding errors evenly over the
/// polynomial coefficients.
const ORDERING_16: [u8; 16] = [0, 15, 8, 7, 4, 11, 12, 3, 2, 13, 10, 5, 6, 9, 14, 1];
const ORDERING_10: [u8; 10] = [0, 9, 6, 3, 4, 5, 8, 1, 2, 7];

/// Computes whitening filter coefficients (Q12) from normalized line
/// spectral frequencies (Q15).
///
/// The output is guaranteed to describe a stable filter: the coefficients
/// are bandwidth expanded as often as needed to push the prediction gain
/// below the codec's limit.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
pub fn nlsf2a(a_q12: &mut [i16], nlsf_q15: &[i16]) {
    let d = a_q12.len();
    assert_eq!(d, nlsf_q15.len(), "filter order mismatch");
    assert!(d == 10 || d == 16, "unsupported LPC order");

    let ordering: &[u8] = if d == 16 {
        &ORDERING_16
    } else {
        &ORDERING_10
    };

    // Cosine values in QA, with interleaved ordering.
    let mut cos_lsf_qa = [0i32; MAX_LPC_ORDER];
    for k in 0..d {
        debug_assert!(nlsf_q15[k] >= 0);

        // Integer and fractional parts of the table index.
        let f_int = i32::from(nlsf_q15[k]) >> (15 - 7);
        let f_frac = i32::from(nlsf_q15[k]) - (f_int << (15 - 7));
        debug_assert!((0..128).contains(&f_int));

        // Linear interpolation in the Q12 cosine table.
        let cos_val = i32::from(SILK_LSF_COS_TAB_FIX_Q12[f_int as usize]);
        let delta = i32::from(SILK_LSF_COS_TAB_FIX_Q12[f_int as usize + 1]) - cos_val;
        cos_lsf_qa[usize::from(ordering[k])] = rshift_round((cos_val << 8) + delta * f_frac, 20 - QA);
    }

    let dd = d / 2;
    let mut p = [0i32; MAX_LPC_ORDER / 2 + 1];
    let mut q = [0i32; MAX_LPC_ORDER / 2 + 1];

    // Generate the symmetric and antisymmetric polynomials from the even and
    // odd cosine values respectively.
    nlsf2a_find_poly(&mut p[..=dd], &cos_lsf_qa[..d], dd);
    nlsf2a_find_poly(&mut q[..=dd], &cos_lsf_qa[1..d], dd);

    // Convert to filter coefficients, still one bit above QA.
    let mut a32_qa1 = [0i32; MAX_LPC_ORDER];
    for k in 0..dd {
        let ptmp = p[k + 1].wrapping_add(p[k]);
        let qtmp = q[k + 1].wrapping_sub(q[k]);

        a32_qa1[k] = qtmp.wrapping_neg().wrapping_sub(ptmp);
        a32_qa1[d - k - 1] = qtmp.wrapping_sub(ptmp);
    }

    // Limit the maximum absolute value so the coefficients fit in Q12.
    let mut rounds = 0;
    while rounds < 10 {
        let mut maxabs = 0;
        let mut idx = 0;
        for (k, &coeff) in a32_qa1[..d].iter().enumerate() {
            let absval = coeff.abs();
            if absval > maxabs {
                maxabs = absval;
                idx = k as i32;
            }
        }
        maxabs = rshift_round(maxabs, QA + 1 - 12);

        if maxabs <= i32::from(i16::MAX) {
            break;
        }

        // Reduce magnitude of prediction coefficients.
        let maxabs = maxabs.min((i32::MAX >> 14) + i32::from(i16::MAX));
        let sc_q16 = 65_470 - ((maxabs - i32::from(i16::MAX)) << 14) / ((maxabs * (idx + 1)) >> 2);
        bwexpander_32(&mut a32_qa1[..d], sc_q16);
        rounds += 1;
    }

    if rounds == 10 {
        // Reached the last iteration, clip the coefficients.
        for k in 0..d {
            let value = rshift_round(a32_qa1[k], QA + 1 - 12);
            a_q12[k] = value.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16;
            a32_qa1[k] = i32::from(a_q12[k]) << (QA + 1 - 12);
        }
    } else {
        for k in 0..d {
            a_q12[k] = rshift_round(a32_qa1[k], QA + 1 - 12) as i16;
        }
    }

    for i in 0..MAX_LPC_STABILIZE_ITERATIONS {
        if lpc_inverse_pred_gain(&a_q12[..d]) < MIN_INV_GAIN_Q30 {
            // Prediction coefficients are (too close to) unstable; apply
            // progressively more bandwidth expansion.
            bwexpander_32(&mut a32_qa1[..d], 65_536 - (2 << i));
            for k in 0..d {
                a_q12[k] = rshift_round(a32_qa1[k], QA + 1 - 12) as i16;
            }
        } else {
            break;
        }
    }
}

/// Multiplies out the root factors `(1 - 2*cos*z^-1 + z^-2)` of one of the
/// split polynomials.
fn nlsf2a_find_poly(out: &mut [i32], c_lsf: &[i32], dd: usize) {
    out[0] = 1 << QA;
    out[1] = -c_lsf[0];
    for k in 1..dd {
        let ftmp = i64::from(c_lsf[2 * k]); // QA
        out[k + 1] = (out[k - 1] << 1)
            .wrapping_sub(rshift_round64(ftmp * i64::from(out[k]), QA) as i32);
        for n in (2..=k).rev() {
            out[n] = out[n]
                .wrapping_add(out[n - 2])
                .wrapping_sub(rshift_round64(ftmp * i64::from(out[n - 1]), QA) as i32);
        }
        out[1] = out[1].wrapping_sub(ftmp as i32);
    }
}

#[inline]
fn rshift_round(value: i32, shift: i32) -> i32 {
    debug_assert!(shift > 0);
    if shift == 1 {
        (value >> 1) + (value & 1)
    } else {
        ((value >> (shift - 1)) + 1) >> 1
    }
}

#[inline]
fn rshift_round64(value: i64, shift: i32) -> i64 {
    debug_assert!(shift > 0);
    if shift == 1 {
        (value >> 1) + (value & 1)
    } else {
        ((value >> (shift - 1)) + 1) >> 1
    }
}

#[cfg(test)]
mod tests {
    use super::{nlsf2a, ORDERING_10, ORDERING_16};
    use crate::lpc_inv_pred_gain::lpc_inverse_pred_gain;

    #[test]
    fn orderings_are_permutations() {
        let mut seen = [false; 16];
        for &ix in &ORDERING_16 {
            assert!(!seen[usize::from(ix)]);
            seen[usize::from(ix)] = true;
        }

        let mut seen = [false; 10];
        for &ix in &ORDERING_10 {
            assert!(!seen[usize::from(ix)]);
            seen[usize::from(ix)] = true;
        }
    }

    #[test]
    fn evenly_spaced_nlsfs_give_a_stable_filter() {
        let nlsf: [i16; 10] = core::array::from_fn(|k| ((k as i32 + 1) * 32_768 / 11) as i16);
        let mut a_q12 = [0i16; 10];

        nlsf2a(&mut a_q12, &nlsf);

        assert!(lpc_inverse_pred_gain(&a_q12) >= super::MIN_INV_GAIN_Q30);
    }

    #[test]
    fn tightly_clustered_nlsfs_still_give_a_stable_filter() {
        // Clustered frequencies create large resonances; the scaling and
        // stabilization loops must cope.
        let nlsf: [i16; 16] = core::array::from_fn(|k| (400 + 16 * k as i32) as i16);
        let mut a_q12 = [0i16; 16];

        nlsf2a(&mut a_q12, &nlsf);

        assert!(lpc_inverse_pred_gain(&a_q12) >= super::MIN_INV_GAIN_Q30);
    }

    #[test]
    fn wideband_order_is_supported() {
        let nlsf: [i16; 16] = core::array::from_fn(|k| ((k as i32 + 1) * 32_768 / 17) as i16);
        let mut a_q12 = [0i16; 16];

        nlsf2a(&mut a_q12, &nlsf);

        assert!(lpc_inverse_pred_gain(&a_q12) > 0);
    }
}
