//! Inverse prediction gain of an LPC filter, from `silk/LPC_inv_pred_gain.c`
//! in the reference implementation.
//!
//! The routine steps down the recursion from AR coefficients to reflection
//! coefficients, accumulating the inverse prediction gain and bailing out as
//! soon as a pole leaves the unit circle. `nlsf2a` uses the returned Q30 gain
//! to decide whether bandwidth expansion is needed.

use crate::interpolate::MAX_LPC_ORDER;

const QA: i32 = 24;
// 0.99975 == 3999 / 4000 with rounding.
const A_LIMIT: i32 = (((1i64 << QA) * 3999 + 2000) / 4000) as i32;

/// Computes the inverse prediction gain of LPC coefficients in Q12 precision.
///
/// Returns the gain in the energy domain in Q30 format, or zero when the
/// coefficient set is unstable.
#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
pub fn lpc_inverse_pred_gain(a_q12: &[i16]) -> i32 {
    let order = a_q12.len();
    assert!(order > 0, "LPC order must be strictly positive");
    assert!(order <= MAX_LPC_ORDER, "order exceeds MAX_LPC_ORDER");

    let mut a_qa = [0i32; MAX_LPC_ORDER];
    let mut dc_resp = 0i32;

    for (slot, &coeff) in a_qa.iter_mut().zip(a_q12.iter()) {
        dc_resp += i32::from(coeff);
        *slot = i32::from(coeff) << (QA - 12);
    }

    // A DC gain of one or more cannot be stable.
    if dc_resp >= 4096 {
        return 0;
    }

    lpc_inverse_pred_gain_qa(&mut a_qa[..order])
}

fn lpc_inverse_pred_gain_qa(a_qa: &mut [i32]) -> i32 {
    let order = a_qa.len();
    let mut inv_gain_q30 = 1i32 << 30;

    for k in (1..order).rev() {
        if !(-A_LIMIT..=A_LIMIT).contains(&a_qa[k]) {
            return 0;
        }

        // Set RC equal to negated AR coefficient.
        let rc_q31 = -shift_left(a_qa[k], 31 - QA);

        // rc_mult1_q30 range: [ 1 : 2^30 ].
        let rc_mult1_q30 = (1 << 30) - smmul(rc_q31, rc_q31);
        debug_assert!(rc_mult1_q30 > (1 << 15));
        debug_assert!(rc_mult1_q30 <= (1 << 30));

        // rc_mult2 range: [ 2^30 : i32::MAX ].
        let mult2q = 32 - leading_zeros_i32(rc_mult1_q30.abs());
        let rc_mult2 = inverse32_varq(rc_mult1_q30, mult2q + 30);

        inv_gain_q30 = shift_left(smmul(inv_gain_q30, rc_mult1_q30), 2);
        debug_assert!((0..=1 << 30).contains(&inv_gain_q30));

        // Update remaining AR coefficients for the next recursion step. The
        // reference ping-pongs between two buffers; a snapshot of the current
        // coefficients gives the same values.
        let mut a_old = [0i32; MAX_LPC_ORDER];
        a_old[..order].copy_from_slice(a_qa);
        for n in 0..k {
            let tmp_qa = a_old[n].wrapping_sub(mul32_frac_q(a_old[k - n - 1], rc_q31, 31));
            a_qa[n] = mul32_frac_q(tmp_qa, rc_mult2, mult2q);
        }
    }

    if !(-A_LIMIT..=A_LIMIT).contains(&a_qa[0]) {
        return 0;
    }

    let rc_q31 = -shift_left(a_qa[0], 31 - QA);
    let rc_mult1_q30 = (1 << 30) - smmul(rc_q31, rc_q31);

    inv_gain_q30 = shift_left(smmul(inv_gain_q30, rc_mult1_q30), 2);
    debug_assert!((0..=1 << 30).contains(&inv_gain_q30));

    inv_gain_q30
}

fn smmul(a: i32, b: i32) -> i32 {
    ((i64::from(a) * i64::from(b)) >> 32) as i32
}

fn smulwb(a: i32, b: i32) -> i32 {
    ((i64::from(a) * i64::from(b as i16)) >> 16) as i32
}

fn smlaww(a: i32, b: i32, c: i32) -> i32 {
    a.wrapping_add(((i64::from(b) * i64::from(c)) >> 16) as i32)
}

fn shift_left(value: i32, shift: i32) -> i32 {
    debug_assert!((0..32).contains(&shift));
    value.wrapping_shl(shift as u32)
}

fn mul32_frac_q(a: i32, b: i32, q: i32) -> i32 {
    rshift_round64(i64::from(a) * i64::from(b), q) as i32
}

fn rshift_round64(value: i64, shift: i32) -> i64 {
    debug_assert!(shift > 0);
    if shift == 1 {
        (value >> 1) + (value & 1)
    } else {
        ((value >> (shift - 1)) + 1) >> 1
    }
}

fn inverse32_varq(b32: i32, qres: i32) -> i32 {
    debug_assert!(b32 != 0);
    debug_assert!(qres > 0);

    let b_headroom = leading_zeros_i32(b32.abs()) - 1;
    let b32_nrm = shift_left(b32, b_headroom);

    let b32_inv = (i32::MAX >> 2) / (b32_nrm >> 16);
    let mut result = shift_left(b32_inv, 16);

    let err_q32 = shift_left((1 << 29) - smulwb(b32_nrm, b32_inv), 3);
    result = smlaww(result, err_q32, b32_inv);

    let lshift = 61 - b_headroom - qres;
    if lshift <= 0 {
        saturating_lshift(result, -lshift)
    } else if lshift < 32 {
        result >> lshift
    } else {
        0
    }
}

fn saturating_lshift(value: i32, shift: i32) -> i32 {
    debug_assert!(shift >= 0);
    let shifted = i64::from(value) << shift;
    shifted.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

fn leading_zeros_i32(value: i32) -> i32 {
    if value == 0 {
        32
    } else {
        value.leading_zeros() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::{inverse32_varq, lpc_inverse_pred_gain, smmul};

    #[test]
    fn computes_gain_for_simple_predictor() {
        let coeffs = [2048i16];
        assert_eq!(lpc_inverse_pred_gain(&coeffs), 805_306_368);
    }

    #[test]
    fn computes_gain_for_four_tap_predictor() {
        let coeffs = [1024, -512, 256, -128];
        assert_eq!(lpc_inverse_pred_gain(&coeffs), 1_006_430_076);
    }

    #[test]
    fn detects_unstable_dc_response() {
        let coeffs = [4096i16];
        assert_eq!(lpc_inverse_pred_gain(&coeffs), 0);
    }

    #[test]
    fn zero_predictor_has_unity_gain() {
        let coeffs = [0i16; 16];
        assert_eq!(lpc_inverse_pred_gain(&coeffs), 1 << 30);
    }

    #[test]
    fn matches_reference_for_asymmetric_predictor() {
        let coeffs = [3000, -2000, 1000, -500];
        assert_eq!(lpc_inverse_pred_gain(&coeffs), 691_862_120);
    }

    #[test]
    fn helper_macros_match_reference_behaviour() {
        assert_eq!(smmul(1 << 30, 1 << 30), 1 << 28);
        assert_eq!(inverse32_varq(1 << 30, 31), 1);
    }
}
