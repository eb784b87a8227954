//! NLSF encoder, from `silk/NLSF_encode.c` in the reference implementation.
//!
//! Two-stage quantization: an unweighted search through the stage-one
//! codebook keeps the best few survivors, each survivor's residual is run
//! through the delayed-decision trellis quantizer, and the candidate with the
//! lowest total rate/distortion cost wins.

use crate::interpolate::MAX_LPC_ORDER;
use crate::lin2log::lin2log;
use crate::nlsf_decode::{nlsf_decode, sqrt_approx};
use crate::nlsf_del_dec_quant::nlsf_del_dec_quant;
use crate::nlsf_stabilize::nlsf_stabilize;
use crate::nlsf_unpack::nlsf_unpack;
use crate::nlsf_vq::nlsf_vq;
use crate::nlsf_vq_weights_laroia::{nlsf_vq_weights_laroia, NLSF_W_Q};
use crate::process_nlsfs::FrameSignalType;
use crate::sort::insertion_sort_increasing;
use crate::tables_nlsf_cb_wb::SilkNlsfCb;

/// Upper bound on the number of stage-one survivors searched.
pub const NLSF_VQ_MAX_SURVIVORS: usize = 32;

const MAX_NLSF_VECTORS: usize = 32;

/// Quantizes an NLSF vector.
///
/// `nlsf_q15` is replaced by the quantized vector; the stage-one index and
/// per-coefficient residual indices are written to `indices`. `w_qw` holds
/// the quantization weights of the input vector, `mu_q20` the rate weight
/// and `n_survivors` how many stage-one candidates to search. Returns the
/// rate/distortion cost of the winner in Q25.
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub fn nlsf_encode(
    indices: &mut [i8],
    nlsf_q15: &mut [i16],
    cb: &SilkNlsfCb,
    w_qw: &[i16],
    mu_q20: i32,
    n_survivors: usize,
    signal_type: FrameSignalType,
) -> i32 {
    let order = cb.order as usize;
    let n_vectors = cb.n_vectors as usize;
    assert_eq!(indices.len(), order + 1);
    assert_eq!(nlsf_q15.len(), order);
    assert_eq!(w_qw.len(), order);
    assert!(n_survivors >= 1 && n_survivors <= NLSF_VQ_MAX_SURVIVORS);
    assert!((0..=32_767).contains(&mu_q20));

    // NLSF stabilization.
    nlsf_stabilize(nlsf_q15, cb.delta_min_q15);

    // First stage: VQ.
    let mut err_q26 = [0i32; MAX_NLSF_VECTORS];
    nlsf_vq(&mut err_q26[..n_vectors], nlsf_q15, cb.cb1_nlsf_q8);

    // Sort the quantization errors.
    let n_survivors = n_survivors.min(n_vectors);
    let mut temp_indices1 = [0i32; NLSF_VQ_MAX_SURVIVORS];
    insertion_sort_increasing(&mut err_q26[..n_vectors], &mut temp_indices1, n_survivors);

    let mut rd_q25 = [0i32; NLSF_VQ_MAX_SURVIVORS];
    let mut temp_indices2 = [[0i8; MAX_LPC_ORDER]; NLSF_VQ_MAX_SURVIVORS];

    // Loop over the survivors.
    for s in 0..n_survivors {
        let ind1 = temp_indices1[s] as usize;

        // Residual after the first stage.
        let cb_row = &cb.cb1_nlsf_q8[ind1 * order..(ind1 + 1) * order];
        let mut nlsf_tmp_q15 = [0i16; MAX_LPC_ORDER];
        let mut res_q15 = [0i32; MAX_LPC_ORDER];
        for i in 0..order {
            nlsf_tmp_q15[i] = (i32::from(cb_row[i]) << 7) as i16;
            res_q15[i] = i32::from(nlsf_q15[i]) - i32::from(nlsf_tmp_q15[i]);
        }

        // Weights from the codebook vector.
        let mut w_tmp_qw = [0i16; MAX_LPC_ORDER];
        nlsf_vq_weights_laroia(&mut w_tmp_qw[..order], &nlsf_tmp_q15[..order]);

        // Apply square-rooted weights to the residual.
        let mut res_q10 = [0i16; MAX_LPC_ORDER];
        for i in 0..order {
            let w_tmp_q9 = sqrt_approx(i32::from(w_tmp_qw[i]) << (18 - NLSF_W_Q));
            res_q10[i] = (smulbb(res_q15[i], w_tmp_q9) >> 14) as i16;
        }

        // Modify the input weights accordingly.
        let mut w_adj_q5 = [0i16; MAX_LPC_ORDER];
        for i in 0..order {
            w_adj_q5[i] = ((i32::from(w_qw[i]) << 5) / i32::from(w_tmp_qw[i])) as i16;
        }

        // Unpack entropy table indices and predictor for this stage-one
        // candidate.
        let mut ec_ix = [0i16; MAX_LPC_ORDER];
        let mut pred_q8 = [0u8; MAX_LPC_ORDER];
        nlsf_unpack(&mut ec_ix[..order], &mut pred_q8[..order], cb, ind1);

        // Trellis quantizer.
        rd_q25[s] = nlsf_del_dec_quant(
            &mut temp_indices2[s][..order],
            &res_q10[..order],
            &w_adj_q5[..order],
            &pred_q8[..order],
            &ec_ix[..order],
            cb.ec_rates_q5,
            i32::from(cb.quant_step_size_q16),
            cb.inv_quant_step_size_q6,
            mu_q20,
        );

        // Add the rate for the first stage.
        let icdf = &cb.cb1_icdf[signal_type.icdf_half() * n_vectors..];
        let prob_q8 = if ind1 == 0 {
            256 - i32::from(icdf[0])
        } else {
            i32::from(icdf[ind1 - 1]) - i32::from(icdf[ind1])
        };
        let bits_q7 = (8 << 7) - lin2log(prob_q8);
        rd_q25[s] = rd_q25[s].wrapping_add(smulbb(bits_q7, mu_q20 >> 2));
    }

    // Find the lowest rate-distortion error.
    let mut best_index = [0i32; 1];
    insertion_sort_increasing(&mut rd_q25[..n_survivors], &mut best_index, 1);
    let best = best_index[0] as usize;

    indices[0] = temp_indices1[best] as i8;
    indices[1..].copy_from_slice(&temp_indices2[best][..order]);

    // Decode to get the quantized frequencies.
    nlsf_decode(nlsf_q15, indices, cb);

    rd_q25[0]
}

#[inline]
fn smulbb(a: i32, b: i32) -> i32 {
    i32::from(a as i16) * i32::from(b as i16)
}

#[cfg(test)]
mod tests {
    use super::nlsf_encode;
    use crate::nlsf_decode::nlsf_decode;
    use crate::nlsf_vq_weights_laroia::nlsf_vq_weights_laroia;
    use crate::process_nlsfs::FrameSignalType;
    use crate::tables_nlsf_cb_nb_mb::SILK_NLSF_CB_NB_MB;
    use crate::tables_nlsf_cb_wb::SILK_NLSF_CB_WB;

    fn encode_nb(
        nlsf: &mut [i16; 10],
        n_survivors: usize,
        signal_type: FrameSignalType,
    ) -> ([i8; 11], i32) {
        let mut weights = [0i16; 10];
        nlsf_vq_weights_laroia(&mut weights, nlsf);

        let mut indices = [0i8; 11];
        let rd = nlsf_encode(
            &mut indices,
            nlsf,
            &SILK_NLSF_CB_NB_MB,
            &weights,
            3146,
            n_survivors,
            signal_type,
        );
        (indices, rd)
    }

    #[test]
    fn output_matches_decoding_of_the_chosen_indices() {
        let mut nlsf = [1800, 4200, 7000, 10_500, 13_200, 16_800, 20_100, 23_500, 26_800, 30_200];
        let (indices, rd) = encode_nb(&mut nlsf, 4, FrameSignalType::Voiced);

        let mut decoded = [0i16; 10];
        nlsf_decode(&mut decoded, &indices, &SILK_NLSF_CB_NB_MB);

        assert_eq!(nlsf, decoded);
        assert!(rd >= 0);
    }

    #[test]
    fn more_survivors_never_increase_the_cost() {
        let target = [2200, 4100, 6900, 9800, 13_600, 17_200, 20_500, 24_000, 27_000, 30_500];

        let mut one = target;
        let (_, rd_one) = encode_nb(&mut one, 1, FrameSignalType::Unvoiced);
        let mut many = target;
        let (_, rd_many) = encode_nb(&mut many, 16, FrameSignalType::Unvoiced);

        assert!(rd_many <= rd_one);
    }

    #[test]
    fn quantization_error_stays_bounded() {
        let target = [2000, 4600, 7400, 10_200, 13_000, 16_400, 19_800, 23_400, 26_600, 30_000];
        let mut nlsf = target;
        encode_nb(&mut nlsf, 8, FrameSignalType::Voiced);

        for (&q, &t) in nlsf.iter().zip(target.iter()) {
            assert!((i32::from(q) - i32::from(t)).abs() < 3000);
        }
    }

    #[test]
    fn wideband_codebook_round_trips_through_decode() {
        let mut nlsf: [i16; 16] = core::array::from_fn(|k| ((k as i32 + 1) * 32_768 / 17) as i16);
        let mut weights = [0i16; 16];
        nlsf_vq_weights_laroia(&mut weights, &nlsf);

        let mut indices = [0i8; 17];
        nlsf_encode(
            &mut indices,
            &mut nlsf,
            &SILK_NLSF_CB_WB,
            &weights,
            2000,
            8,
            FrameSignalType::Inactive,
        );

        let mut decoded = [0i16; 16];
        nlsf_decode(&mut decoded, &indices, &SILK_NLSF_CB_WB);
        assert_eq!(nlsf, decoded);
    }
}
