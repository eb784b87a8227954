//! NLSF decoder, from `silk/NLSF_decode.c` in the reference implementation.
//!
//! Reconstructs an NLSF vector from a stage-one codebook index plus the
//! stage-two residual indices: the residual is dequantized backwards through
//! the coefficient predictors, scaled by the inverted square-rooted Laroia
//! weights of the codebook vector, added to the codebook vector and
//! stabilized.

use crate::interpolate::MAX_LPC_ORDER;
use crate::nlsf_stabilize::nlsf_stabilize;
use crate::nlsf_unpack::nlsf_unpack;
use crate::nlsf_vq_weights_laroia::{nlsf_vq_weights_laroia, NLSF_W_Q};
use crate::tables_nlsf_cb_wb::SilkNlsfCb;

// 0.1 in Q10, the same pull towards zero the quantizer applied.
const NLSF_QUANT_LEVEL_ADJ_Q10: i32 = 102;

/// Decodes NLSF indices into a stabilized NLSF vector (Q15).
///
/// `indices[0]` is the stage-one codebook index; `indices[1..]` hold one
/// residual index per coefficient.
#[allow(clippy::cast_possible_truncation)]
pub fn nlsf_decode(nlsf_q15: &mut [i16], indices: &[i8], cb: &SilkNlsfCb) {
    let order = cb.order as usize;
    assert_eq!(nlsf_q15.len(), order);
    assert_eq!(indices.len(), order + 1);

    let cb1_index = usize::try_from(indices[0]).unwrap_or(0);
    assert!(cb1_index < cb.n_vectors as usize, "stage-one index out of range");

    // Decode first stage.
    let cb_row = &cb.cb1_nlsf_q8[cb1_index * order..(cb1_index + 1) * order];
    for (out, &q8) in nlsf_q15.iter_mut().zip(cb_row.iter()) {
        *out = (i32::from(q8) << 7) as i16;
    }

    // Unpack entropy table indices and predictor for the current first stage.
    let mut ec_ix = [0i16; MAX_LPC_ORDER];
    let mut pred_q8 = [0u8; MAX_LPC_ORDER];
    nlsf_unpack(&mut ec_ix[..order], &mut pred_q8[..order], cb, cb1_index);

    // Predictive dequantizer for the residual.
    let mut res_q10 = [0i16; MAX_LPC_ORDER];
    nlsf_residual_dequant(
        &mut res_q10[..order],
        &indices[1..],
        &pred_q8[..order],
        i32::from(cb.quant_step_size_q16),
    );

    // Weights from the codebook vector.
    let mut w_tmp_qw = [0i16; MAX_LPC_ORDER];
    nlsf_vq_weights_laroia(&mut w_tmp_qw[..order], nlsf_q15);

    // Apply inverse square-rooted weights and add to output.
    for i in 0..order {
        let w_tmp_q9 = sqrt_approx(i32::from(w_tmp_qw[i]) << (18 - NLSF_W_Q));
        let scaled_res = (i32::from(res_q10[i]) << 14) / i32::from(w_tmp_q9 as i16);
        let nlsf_q15_tmp = i32::from(nlsf_q15[i]) + scaled_res;
        nlsf_q15[i] = nlsf_q15_tmp.clamp(0, i32::from(i16::MAX)) as i16;
    }

    nlsf_stabilize(nlsf_q15, cb.delta_min_q15);
}

/// Predictive dequantizer for NLSF residuals.
///
/// Mirrors `silk_NLSF_residual_dequant`; the coefficients are processed
/// backwards, each one predicted from the already-dequantized successor.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn nlsf_residual_dequant(
    x_q10: &mut [i16],
    indices: &[i8],
    pred_coef_q8: &[u8],
    quant_step_size_q16: i32,
) {
    let order = x_q10.len();
    debug_assert_eq!(order, indices.len());
    debug_assert_eq!(order, pred_coef_q8.len());

    let mut out_q10 = 0i32;
    for i in (0..order).rev() {
        let pred_q10 = smulbb(out_q10, i32::from(pred_coef_q8[i])) >> 8;
        out_q10 = i32::from(indices[i]) << 10;
        if out_q10 > 0 {
            out_q10 -= NLSF_QUANT_LEVEL_ADJ_Q10;
        } else if out_q10 < 0 {
            out_q10 += NLSF_QUANT_LEVEL_ADJ_Q10;
        }
        out_q10 = i32::from(smlawb(pred_q10, out_q10, quant_step_size_q16) as i16);
        x_q10[i] = out_q10 as i16;
    }
}

/// Approximate square root of a positive integer, about 0.13% accurate.
#[allow(clippy::cast_possible_wrap)]
pub(crate) fn sqrt_approx(x: i32) -> i32 {
    if x <= 0 {
        return 0;
    }

    let lz = x.leading_zeros() as i32;
    let frac_q7 = (((x as u32).wrapping_shl((lz + 1) as u32) >> 25) & 0x7f) as i32;

    // sqrt(2^31) and sqrt(2^30) starting points, halved per octave.
    let mut y = if lz & 1 == 1 { 32_768 } else { 46_214 };
    y >>= lz >> 1;

    smlawb(y, y, smulbb(213, frac_q7))
}

#[inline]
fn smulbb(a: i32, b: i32) -> i32 {
    i32::from(a as i16) * i32::from(b as i16)
}

#[inline]
fn smlawb(a: i32, b: i32, c: i32) -> i32 {
    a.wrapping_add(((i64::from(b) * i64::from(c as i16)) >> 16) as i32)
}

#[cfg(test)]
mod tests {
    use super::{nlsf_decode, nlsf_residual_dequant, sqrt_approx};
    use crate::tables_nlsf_cb_nb_mb::SILK_NLSF_CB_NB_MB;
    use crate::tables_nlsf_cb_wb::SILK_NLSF_CB_WB;

    #[test]
    fn sqrt_approx_tracks_integer_square_roots() {
        let cases = [(1 << 16, 256), (1 << 30, 32_768)];
        for (input, exact) in cases {
            let approx = sqrt_approx(input);
            let err = (approx - exact).abs();
            assert!(err * 500 <= exact, "sqrt_approx({input}) = {approx}");
        }
        assert_eq!(sqrt_approx(0), 0);
        assert_eq!(sqrt_approx(-5), 0);
    }

    #[test]
    fn zero_residual_decodes_to_stabilized_codebook_vector() {
        let cb = &SILK_NLSF_CB_NB_MB;
        let indices = [0i8; 11];
        let mut nlsf = [0i16; 10];

        nlsf_decode(&mut nlsf, &indices, cb);

        // The first codebook row is already well spaced, so the stabilizer
        // leaves the plain dequantized vector alone.
        for (k, &value) in nlsf.iter().enumerate() {
            assert_eq!(i32::from(value), i32::from(cb.cb1_nlsf_q8[k]) << 7);
        }
    }

    #[test]
    fn decoded_vectors_are_sorted_with_minimum_gaps() {
        let cb = &SILK_NLSF_CB_WB;
        for cb1 in 0..cb.n_vectors as usize {
            let mut indices = [0i8; 17];
            indices[0] = cb1 as i8;
            indices[1] = 3;
            indices[5] = -2;
            indices[16] = 1;

            let mut nlsf = [0i16; 16];
            nlsf_decode(&mut nlsf, &indices, cb);

            assert!(nlsf[0] >= cb.delta_min_q15[0]);
            for i in 1..16 {
                assert!(
                    i32::from(nlsf[i]) - i32::from(nlsf[i - 1]) >= i32::from(cb.delta_min_q15[i])
                );
            }
            assert!(i32::from(nlsf[15]) <= (1 << 15) - i32::from(cb.delta_min_q15[16]));
        }
    }

    #[test]
    fn residual_dequantizer_applies_level_adjustment_and_prediction() {
        let pred = [0u8; 4];
        let step_q16 = 11_796;

        let mut x_q10 = [0i16; 4];
        nlsf_residual_dequant(&mut x_q10, &[1, 0, -1, 2], &pred, step_q16);

        // With zero prediction each output is just the adjusted level scaled
        // by the step size.
        assert_eq!(x_q10[0], ((1024 - 102) * 11_796 >> 16) as i16);
        assert_eq!(x_q10[1], 0);
        assert_eq!(x_q10[2], ((-1024 + 102) * 11_796 >> 16) as i16);
        assert_eq!(x_q10[3], ((2048 - 102) * 11_796 >> 16) as i16);
    }
}
