//! Conversion from whitening filter coefficients to NLSFs.
//!
//! Port of `silk_A2NLSF` from `silk/A2NLSF.c` in the reference SILK
//! implementation. The filter is split into the symmetric and antisymmetric
//! polynomials P and Q, whose roots interleave on the unit circle; a
//! downward scan of the cosine grid brackets each root, which is then
//! refined with three bisection steps and a final linear interpolation. If
//! not all roots are found the coefficients are bandwidth expanded and the
//! search restarts.

use crate::bwexpander_32::bwexpander_32;
use crate::interpolate::MAX_LPC_ORDER;
use crate::table_lsf_cos::{LSF_COS_TAB_SZ_FIX, SILK_LSF_COS_TAB_FIX_Q12};

/// Number of binary divisions per bracketed root. Must be no higher than
/// `16 - log2(LSF_COS_TAB_SZ_FIX)`.
const BIN_DIV_STEPS_A2NLSF: usize = 3;
const MAX_ITERATIONS_A2NLSF: usize = 30;

/// Convert monic whitening filter coefficients (Q16) to normalized line
/// spectral frequencies (Q15).
///
/// If the root search fails, `a_q16` is bandwidth expanded in place with
/// progressively stronger chirps, and after [`MAX_ITERATIONS_A2NLSF`]
/// restarts the output falls back to a white spectrum. The routine always
/// produces an ascending NLSF vector.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)]
pub fn a2nlsf(nlsf_q15: &mut [i16], a_q16: &mut [i32]) {
    let d = nlsf_q15.len();
    assert_eq!(d, a_q16.len(), "filter order mismatch");
    assert!(d % 2 == 0, "SILK requires an even LPC order");
    assert!(d <= MAX_LPC_ORDER, "order exceeds MAX_LPC_ORDER");

    let dd = d / 2;
    let mut p = [0i32; MAX_LPC_ORDER / 2 + 1];
    let mut q = [0i32; MAX_LPC_ORDER / 2 + 1];

    a2nlsf_init(&a_q16[..d], &mut p[..=dd], &mut q[..=dd], dd);

    // Find roots, alternating between P and Q.
    let mut on_q = false;
    let mut xlo = i32::from(SILK_LSF_COS_TAB_FIX_Q12[0]);
    let mut ylo = a2nlsf_eval_poly(&p[..=dd], xlo, dd);
    let mut root_ix = 0usize;

    if ylo < 0 {
        // Set the first NLSF to zero and move on to the next.
        nlsf_q15[0] = 0;
        on_q = true;
        ylo = a2nlsf_eval_poly(&q[..=dd], xlo, dd);
        root_ix = 1;
    }

    let mut k = 1usize;
    let mut i = 0usize; // number of bandwidth expansions applied
    let mut thr = 0;

    loop {
        // Evaluate polynomial.
        let mut xhi = i32::from(SILK_LSF_COS_TAB_FIX_Q12[k]);
        let poly = if on_q { &q[..=dd] } else { &p[..=dd] };
        let mut yhi = a2nlsf_eval_poly(poly, xhi, dd);

        // Detect zero crossing.
        if (ylo <= 0 && yhi >= thr) || (ylo >= 0 && yhi <= -thr) {
            // A root exactly at the end of the interval belongs to the next
            // interval; raise the threshold there so it is not found twice.
            thr = if yhi == 0 { 1 } else { 0 };

            // Binary division.
            let mut ffrac = -256;
            for m in 0..BIN_DIV_STEPS_A2NLSF {
                let xmid = rshift_round(xlo.wrapping_add(xhi), 1);
                let ymid = a2nlsf_eval_poly(poly, xmid, dd);

                if (ylo <= 0 && ymid >= 0) || (ylo >= 0 && ymid <= 0) {
                    // Reduce frequency.
                    xhi = xmid;
                    yhi = ymid;
                } else {
                    // Increase frequency.
                    xlo = xmid;
                    ylo = ymid;
                    ffrac += 128 >> m;
                }
            }

            // Interpolate.
            if ylo.abs() < 65_536 {
                // Avoid dividing by zero.
                let den = ylo - yhi;
                let nom = (ylo << (8 - BIN_DIV_STEPS_A2NLSF)) + (den >> 1);
                if den != 0 {
                    ffrac += nom / den;
                }
            } else {
                // No risk of dividing by zero: |ylo - yhi| >= |ylo| >= 65536.
                ffrac += ylo / ((ylo - yhi) >> (8 - BIN_DIV_STEPS_A2NLSF));
            }

            let value = (((k as i32) << 8) + ffrac).min(i32::from(i16::MAX));
            debug_assert!(value >= 0);
            nlsf_q15[root_ix] = value as i16;

            root_ix += 1;
            if root_ix >= d {
                // Found all roots.
                break;
            }

            // Alternate pointer to polynomial.
            on_q = root_ix & 1 == 1;

            xlo = i32::from(SILK_LSF_COS_TAB_FIX_Q12[k - 1]);
            ylo = (1 - ((root_ix & 2) as i32)) << 12;
        } else {
            k += 1;
            xlo = xhi;
            ylo = yhi;
            thr = 0;

            if k > LSF_COS_TAB_SZ_FIX {
                i += 1;
                if i > MAX_ITERATIONS_A2NLSF {
                    // Set NLSFs to white spectrum and exit.
                    nlsf_q15[0] = ((1 << 15) / (d as i32 + 1)) as i16;
                    for k in 1..d {
                        nlsf_q15[k] = smulbb(k as i32 + 1, i32::from(nlsf_q15[0])) as i16;
                    }
                    return;
                }

                // Apply progressively more bandwidth expansion and run again.
                let chirp_q16 = 65_536 - smulbb(10 + i as i32, i as i32);
                bwexpander_32(&mut a_q16[..d], chirp_q16);
                a2nlsf_init(&a_q16[..d], &mut p[..=dd], &mut q[..=dd], dd);

                on_q = false;
                xlo = i32::from(SILK_LSF_COS_TAB_FIX_Q12[0]);
                ylo = a2nlsf_eval_poly(&p[..=dd], xlo, dd);
                if ylo < 0 {
                    nlsf_q15[0] = 0;
                    on_q = true;
                    ylo = a2nlsf_eval_poly(&q[..=dd], xlo, dd);
                    root_ix = 1;
                } else {
                    root_ix = 0;
                }
                k = 1;
            }
        }
    }
}

/// Transforms polynomials from cos(n*f) to cos(f)^n.
fn a2nlsf_trans_poly(poly: &mut [i32], dd: usize) {
    for k in 2..=dd {
        for n in ((k + 1)..=dd).rev() {
            poly[n - 2] = poly[n - 2].wrapping_sub(poly[n]);
        }
        poly[k - 2] = poly[k - 2].wrapping_sub(poly[k] << 1);
    }
}

/// Polynomial evaluation at `x` (Q12), result in Q16.
fn a2nlsf_eval_poly(poly: &[i32], x: i32, dd: usize) -> i32 {
    let mut y32 = poly[dd];
    let x_q16 = x << 4;

    for n in (0..dd).rev() {
        y32 = smlaww(poly[n], y32, x_q16);
    }
    y32
}

fn a2nlsf_init(a_q16: &[i32], p: &mut [i32], q: &mut [i32], dd: usize) {
    // Convert filter coefficients to symmetric and antisymmetric polynomials.
    p[dd] = 1 << 16;
    q[dd] = 1 << 16;
    for k in 0..dd {
        p[k] = a_q16[dd - k - 1].wrapping_add(a_q16[dd + k]).wrapping_neg();
        q[k] = a_q16[dd + k].wrapping_sub(a_q16[dd - k - 1]);
    }

    // Divide out zeros as both polynomials have a root at z = 1 or z = -1.
    for k in (1..=dd).rev() {
        p[k - 1] = p[k - 1].wrapping_sub(p[k]);
        q[k - 1] = q[k - 1].wrapping_add(q[k]);
    }

    // Transform polynomials from cos(n*f) to cos(f)^n.
    a2nlsf_trans_poly(p, dd);
    a2nlsf_trans_poly(q, dd);
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

#[inline]
fn smulbb(a: i32, b: i32) -> i32 {
    i32::from(a as i16) * i32::from(b as i16)
}

#[inline]
fn smlaww(a: i32, b: i32, c: i32) -> i32 {
    a.wrapping_add(((i64::from(b) * i64::from(c)) >> 16) as i32)
}

#[cfg(test)]
mod tests {
    use super::a2nlsf;
    use crate::interpolate::MAX_LPC_ORDER;

    #[test]
    fn matches_reference_output_for_known_lpc() {
        let order = 16;
        let mut a_q16 = [0i32; MAX_LPC_ORDER];
        a_q16[..order].copy_from_slice(&[
            15520, 2208, 4400, 8720, -1360, 13632, 1152, 7184, -1312, -6496, -15904, 3872, 11968,
            -10720, 8272, -7616,
        ]);

        let mut output = [0i16; MAX_LPC_ORDER];
        a2nlsf(&mut output[..order], &mut a_q16[..order]);

        let expected = [
            1496, 2925, 5334, 8052, 9524, 10640, 13688, 15291, 16759, 19462, 21048, 22212, 25217,
            26443, 29500, 31037,
        ];

        assert_eq!(&output[..order], &expected);
    }

    #[test]
    fn output_is_ascending_for_near_degenerate_filters() {
        // Poles pushed out to the unit circle force the retry path.
        let mut a_q16 = [0i32; 10];
        a_q16[0] = -120_000;
        a_q16[1] = 130_000;
        a_q16[9] = -65_000;

        let mut output = [0i16; 10];
        a2nlsf(&mut output, &mut a_q16);

        for pair in output.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert!(output[0] >= 0);
    }

    #[test]
    fn white_fallback_spaces_frequencies_evenly() {
        // An all-zero filter keeps both polynomials constant after the zero
        // divisions, so every grid interval brackets a root immediately.
        let mut a_q16 = [0i32; 10];
        let mut output = [0i16; 10];
        a2nlsf(&mut output, &mut a_q16);

        for pair in output.windows(2) {
            assert!(pair[0] < pair[1]);
        }
    }
}
