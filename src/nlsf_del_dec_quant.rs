//! Delayed-decision trellis quantizer for NLSF residuals, from
//! `silk/NLSF_del_dec_quant.c` in the reference implementation.
//!
//! The residual vector is quantized backwards, coefficient by coefficient,
//! with each coefficient predicted from its already-quantized successor. Four
//! survivor states are kept; each step spawns two candidates per state (the
//! rounded-down and rounded-up quantization level) and prunes back to four by
//! exchanging losers in the lower half against winners in the upper half.

use crate::interpolate::MAX_LPC_ORDER;
use crate::nlsf_unpack::NLSF_QUANT_MAX_AMPLITUDE;

/// Number of survivor states in the delayed decision quantizer. Must be a
/// power of two.
pub const NLSF_QUANT_DEL_DEC_STATES: usize = 4;
const NLSF_QUANT_DEL_DEC_STATES_LOG2: u32 = 2;

/// Largest representable residual index magnitude, using escape coding
/// beyond [`NLSF_QUANT_MAX_AMPLITUDE`].
pub const NLSF_QUANT_MAX_AMPLITUDE_EXT: i32 = 10;

// 0.1 in Q10; quantization levels above zero are pulled towards zero.
const NLSF_QUANT_LEVEL_ADJ_Q10: i32 = 102;

// Q5 rate of an index at the escape boundary, and per-step cost beyond it.
const NLSF_QUANT_ESCAPE_RATE_Q5: i32 = 280;
const NLSF_QUANT_OUTSIDE_STEP_RATE_Q5: i32 = 43;

/// Quantizes one NLSF residual vector with delayed decision.
///
/// `x_q10` is the target residual, `w_q5` the quantization weights, and
/// `pred_coef_q8`/`ec_ix` the per-coefficient predictors and rate table
/// offsets from [`crate::nlsf_unpack::nlsf_unpack`]. The winning quantization
/// indices are written to `indices` and the rate/distortion cost of the
/// winner is returned in Q25.
#[allow(clippy::cast_possible_truncation, clippy::too_many_arguments)]
pub fn nlsf_del_dec_quant(
    indices: &mut [i8],
    x_q10: &[i16],
    w_q5: &[i16],
    pred_coef_q8: &[u8],
    ec_ix: &[i16],
    ec_rates_q5: &[u8],
    quant_step_size_q16: i32,
    inv_quant_step_size_q6: i16,
    mu_q20: i32,
) -> i32 {
    let order = indices.len();
    // At least three coefficients are needed before the state doubling has
    // settled and the i == 0 exit can be taken.
    assert!(order > 2 && order <= MAX_LPC_ORDER);
    assert_eq!(order, x_q10.len());
    assert_eq!(order, w_q5.len());
    assert_eq!(order, pred_coef_q8.len());
    assert_eq!(order, ec_ix.len());

    // Quantized output levels for each index and for index + 1, scaled by the
    // step size. Indexed by ind + NLSF_QUANT_MAX_AMPLITUDE_EXT.
    let mut out0_q10_table = [0i32; 2 * NLSF_QUANT_MAX_AMPLITUDE_EXT as usize];
    let mut out1_q10_table = [0i32; 2 * NLSF_QUANT_MAX_AMPLITUDE_EXT as usize];
    for i in -NLSF_QUANT_MAX_AMPLITUDE_EXT..NLSF_QUANT_MAX_AMPLITUDE_EXT {
        let mut out0_q10 = i << 10;
        let mut out1_q10 = out0_q10 + 1024;
        if i > 0 {
            out0_q10 -= NLSF_QUANT_LEVEL_ADJ_Q10;
            out1_q10 -= NLSF_QUANT_LEVEL_ADJ_Q10;
        } else if i == 0 {
            out1_q10 -= NLSF_QUANT_LEVEL_ADJ_Q10;
        } else if i == -1 {
            out0_q10 += NLSF_QUANT_LEVEL_ADJ_Q10;
        } else {
            out0_q10 += NLSF_QUANT_LEVEL_ADJ_Q10;
            out1_q10 += NLSF_QUANT_LEVEL_ADJ_Q10;
        }
        let slot = (i + NLSF_QUANT_MAX_AMPLITUDE_EXT) as usize;
        out0_q10_table[slot] = smulwb(out0_q10, quant_step_size_q16);
        out1_q10_table[slot] = smulwb(out1_q10, quant_step_size_q16);
    }

    let mut ind = [[0i8; MAX_LPC_ORDER]; NLSF_QUANT_DEL_DEC_STATES];
    let mut ind_sort = [0usize; NLSF_QUANT_DEL_DEC_STATES];
    let mut prev_out_q10 = [0i16; 2 * NLSF_QUANT_DEL_DEC_STATES];
    let mut rd_q25 = [0i32; 2 * NLSF_QUANT_DEL_DEC_STATES];
    let mut rd_min_q25 = [0i32; NLSF_QUANT_DEL_DEC_STATES];
    let mut rd_max_q25 = [0i32; NLSF_QUANT_DEL_DEC_STATES];

    let mut n_states = 1usize;
    rd_q25[0] = 0;
    prev_out_q10[0] = 0;

    let mut i = order - 1;
    loop {
        let pred_coef_q16 = i32::from(pred_coef_q8[i]) << 8;
        let in_q10 = i32::from(x_q10[i]);
        let rates_q5 = &ec_rates_q5[ec_ix[i] as usize..];

        for j in 0..n_states {
            let pred_q10 = smulwb(pred_coef_q16, i32::from(prev_out_q10[j]));
            let res_q10 = i32::from((in_q10 - pred_q10) as i16);
            let ind_tmp = smulwb(i32::from(inv_quant_step_size_q6), res_q10)
                .clamp(-NLSF_QUANT_MAX_AMPLITUDE_EXT, NLSF_QUANT_MAX_AMPLITUDE_EXT - 1);
            ind[j][i] = ind_tmp as i8;

            // Outputs for ind_tmp and ind_tmp + 1, in 16-bit wrapping
            // arithmetic like the reference.
            let slot = (ind_tmp + NLSF_QUANT_MAX_AMPLITUDE_EXT) as usize;
            let out0_q10 = i32::from((out0_q10_table[slot] + pred_q10) as i16);
            let out1_q10 = i32::from((out1_q10_table[slot] + pred_q10) as i16);
            prev_out_q10[j] = out0_q10 as i16;
            prev_out_q10[j + n_states] = out1_q10 as i16;

            // Rates for ind_tmp and ind_tmp + 1; indices beyond the table use
            // the flat escape cost.
            let (rate0_q5, rate1_q5) = if ind_tmp + 1 >= NLSF_QUANT_MAX_AMPLITUDE {
                if ind_tmp + 1 == NLSF_QUANT_MAX_AMPLITUDE {
                    (
                        i32::from(rates_q5[(ind_tmp + NLSF_QUANT_MAX_AMPLITUDE) as usize]),
                        NLSF_QUANT_ESCAPE_RATE_Q5,
                    )
                } else {
                    let rate0 = NLSF_QUANT_ESCAPE_RATE_Q5
                        - NLSF_QUANT_OUTSIDE_STEP_RATE_Q5 * NLSF_QUANT_MAX_AMPLITUDE
                        + NLSF_QUANT_OUTSIDE_STEP_RATE_Q5 * ind_tmp;
                    (rate0, rate0 + NLSF_QUANT_OUTSIDE_STEP_RATE_Q5)
                }
            } else if ind_tmp <= -NLSF_QUANT_MAX_AMPLITUDE {
                if ind_tmp == -NLSF_QUANT_MAX_AMPLITUDE {
                    (
                        NLSF_QUANT_ESCAPE_RATE_Q5,
                        i32::from(rates_q5[(ind_tmp + 1 + NLSF_QUANT_MAX_AMPLITUDE) as usize]),
                    )
                } else {
                    let rate0 = NLSF_QUANT_ESCAPE_RATE_Q5
                        - NLSF_QUANT_OUTSIDE_STEP_RATE_Q5 * NLSF_QUANT_MAX_AMPLITUDE
                        - NLSF_QUANT_OUTSIDE_STEP_RATE_Q5 * ind_tmp;
                    (rate0, rate0 - NLSF_QUANT_OUTSIDE_STEP_RATE_Q5)
                }
            } else {
                (
                    i32::from(rates_q5[(ind_tmp + NLSF_QUANT_MAX_AMPLITUDE) as usize]),
                    i32::from(rates_q5[(ind_tmp + 1 + NLSF_QUANT_MAX_AMPLITUDE) as usize]),
                )
            };

            let rd_tmp_q25 = rd_q25[j];
            let diff_q10 = in_q10 - out0_q10;
            rd_q25[j] = rd_tmp_q25
                .wrapping_add(smulbb(diff_q10, diff_q10).wrapping_mul(i32::from(w_q5[i])))
                .wrapping_add(smulbb(mu_q20, rate0_q5));
            let diff_q10 = in_q10 - out1_q10;
            rd_q25[j + n_states] = rd_tmp_q25
                .wrapping_add(smulbb(diff_q10, diff_q10).wrapping_mul(i32::from(w_q5[i])))
                .wrapping_add(smulbb(mu_q20, rate1_q5));
        }

        if n_states <= NLSF_QUANT_DEL_DEC_STATES / 2 {
            // Double the number of states and copy the quantization indices.
            for j in 0..n_states {
                ind[j + n_states][i] = ind[j][i] + 1;
            }
            n_states <<= 1;
            for j in n_states..NLSF_QUANT_DEL_DEC_STATES {
                ind[j][i] = ind[j - n_states][i];
            }
        } else if i > 0 {
            // Sort the lower and upper halves of the RD costs, pairwise.
            for j in 0..NLSF_QUANT_DEL_DEC_STATES {
                if rd_q25[j] > rd_q25[j + NLSF_QUANT_DEL_DEC_STATES] {
                    rd_max_q25[j] = rd_q25[j];
                    rd_min_q25[j] = rd_q25[j + NLSF_QUANT_DEL_DEC_STATES];
                    rd_q25[j] = rd_min_q25[j];
                    rd_q25[j + NLSF_QUANT_DEL_DEC_STATES] = rd_max_q25[j];
                    prev_out_q10.swap(j, j + NLSF_QUANT_DEL_DEC_STATES);
                    ind_sort[j] = j + NLSF_QUANT_DEL_DEC_STATES;
                } else {
                    rd_min_q25[j] = rd_q25[j];
                    rd_max_q25[j] = rd_q25[j + NLSF_QUANT_DEL_DEC_STATES];
                    ind_sort[j] = j;
                }
            }

            // Compare the worst survivor against the best loser and exchange
            // until the halves are fully separated. Afterwards ind_sort holds
            // the indices of the winning RD values.
            loop {
                let mut min_max_q25 = i32::MAX;
                let mut max_min_q25 = 0;
                let mut ind_min_max = 0;
                let mut ind_max_min = 0;
                for j in 0..NLSF_QUANT_DEL_DEC_STATES {
                    if min_max_q25 > rd_max_q25[j] {
                        min_max_q25 = rd_max_q25[j];
                        ind_min_max = j;
                    }
                    if max_min_q25 < rd_min_q25[j] {
                        max_min_q25 = rd_min_q25[j];
                        ind_max_min = j;
                    }
                }
                if min_max_q25 >= max_min_q25 {
                    break;
                }

                ind_sort[ind_max_min] = ind_sort[ind_min_max] ^ NLSF_QUANT_DEL_DEC_STATES;
                rd_q25[ind_max_min] = rd_q25[ind_min_max + NLSF_QUANT_DEL_DEC_STATES];
                prev_out_q10[ind_max_min] = prev_out_q10[ind_min_max + NLSF_QUANT_DEL_DEC_STATES];
                rd_min_q25[ind_max_min] = 0;
                rd_max_q25[ind_min_max] = i32::MAX;
                ind[ind_max_min] = ind[ind_min_max];
            }

            // Increment the index if the state came from the upper half.
            for j in 0..NLSF_QUANT_DEL_DEC_STATES {
                ind[j][i] += (ind_sort[j] >> NLSF_QUANT_DEL_DEC_STATES_LOG2) as i8;
            }
        } else {
            // i == 0; the last coefficient is resolved when picking the
            // winner below.
            break;
        }

        i -= 1;
    }

    // Find the winner among all states, copy its indices and return its cost.
    let mut winner = 0usize;
    let mut min_q25 = i32::MAX;
    for (j, &rd) in rd_q25.iter().enumerate() {
        if min_q25 > rd {
            min_q25 = rd;
            winner = j;
        }
    }

    let winning_ind = &ind[winner & (NLSF_QUANT_DEL_DEC_STATES - 1)];
    for (slot, &value) in indices.iter_mut().zip(winning_ind.iter()) {
        debug_assert!((-NLSF_QUANT_MAX_AMPLITUDE_EXT..=NLSF_QUANT_MAX_AMPLITUDE_EXT)
            .contains(&i32::from(value)));
        *slot = value;
    }
    indices[0] += (winner >> NLSF_QUANT_DEL_DEC_STATES_LOG2) as i8;
    debug_assert!(i32::from(indices[0]) <= NLSF_QUANT_MAX_AMPLITUDE_EXT);
    debug_assert!(min_q25 >= 0);

    min_q25
}

#[inline]
fn smulwb(a: i32, b: i32) -> i32 {
    ((i64::from(a) * i64::from(b as i16)) >> 16) as i32
}

#[inline]
fn smulbb(a: i32, b: i32) -> i32 {
    i32::from(a as i16) * i32::from(b as i16)
}

#[cfg(test)]
mod tests {
    use super::{nlsf_del_dec_quant, NLSF_QUANT_MAX_AMPLITUDE_EXT};
    use crate::nlsf_unpack::nlsf_unpack;
    use crate::tables_nlsf_cb_nb_mb::SILK_NLSF_CB_NB_MB;

    fn quantize(x_q10: &[i16; 10], mu_q20: i32) -> ([i8; 10], i32) {
        let cb = &SILK_NLSF_CB_NB_MB;
        let mut ec_ix = [0i16; 10];
        let mut pred_q8 = [0u8; 10];
        nlsf_unpack(&mut ec_ix, &mut pred_q8, cb, 0);

        let w_q5 = [128i16; 10];
        let mut indices = [0i8; 10];
        let rd = nlsf_del_dec_quant(
            &mut indices,
            x_q10,
            &w_q5,
            &pred_q8,
            &ec_ix,
            cb.ec_rates_q5,
            i32::from(cb.quant_step_size_q16),
            cb.inv_quant_step_size_q6,
            mu_q20,
        );
        (indices, rd)
    }

    #[test]
    fn zero_residual_quantizes_to_zero_indices() {
        let x_q10 = [0i16; 10];
        let (indices, rd) = quantize(&x_q10, 3146);

        assert_eq!(indices, [0i8; 10]);
        assert!(rd >= 0);
    }

    #[test]
    fn quantizer_is_deterministic() {
        let x_q10 = [900, -400, 250, -1500, 620, 80, -90, 1024, -777, 333];
        let (first, rd_first) = quantize(&x_q10, 3146);
        let (second, rd_second) = quantize(&x_q10, 3146);

        assert_eq!(first, second);
        assert_eq!(rd_first, rd_second);
    }

    #[test]
    fn indices_stay_within_the_extended_range() {
        let x_q10 = [
            12_000, -12_000, 12_000, -12_000, 12_000, -12_000, 12_000, -12_000, 12_000, -12_000,
        ];
        let (indices, _) = quantize(&x_q10, 3146);

        for &index in &indices {
            assert!((-NLSF_QUANT_MAX_AMPLITUDE_EXT..=NLSF_QUANT_MAX_AMPLITUDE_EXT)
                .contains(&i32::from(index)));
        }
    }

    /// Recomputes the cost of a quantization path with a plain forward pass,
    /// independent of the trellis bookkeeping.
    fn path_cost(x_q10: &[i16; 10], indices: &[i8; 10], mu_q20: i32) -> i32 {
        let cb = &SILK_NLSF_CB_NB_MB;
        let mut ec_ix = [0i16; 10];
        let mut pred_q8 = [0u8; 10];
        nlsf_unpack(&mut ec_ix, &mut pred_q8, cb, 0);

        let mut prev_out_q10 = 0i32;
        let mut cost_q25 = 0i32;
        for i in (0..10).rev() {
            let pred_q10 = super::smulwb(i32::from(pred_q8[i]) << 8, prev_out_q10);
            let level = i32::from(indices[i]);
            let mut out_q10 = level << 10;
            if level > 0 {
                out_q10 -= 102;
            } else if level < 0 {
                out_q10 += 102;
            }
            let out_q10 = i32::from(
                (super::smulwb(out_q10, i32::from(cb.quant_step_size_q16)) + pred_q10) as i16,
            );
            let rate_q5 = if level.abs() < 4 {
                i32::from(cb.ec_rates_q5[(ec_ix[i] + level as i16 + 4) as usize])
            } else {
                280 + 43 * (level.abs() - 4)
            };
            let diff_q10 = i32::from(x_q10[i]) - out_q10;
            cost_q25 = cost_q25
                .wrapping_add(super::smulbb(diff_q10, diff_q10).wrapping_mul(128))
                .wrapping_add(super::smulbb(mu_q20, rate_q5));
            prev_out_q10 = out_q10;
        }
        cost_q25
    }

    #[test]
    fn returned_cost_matches_the_winning_path() {
        let inputs = [
            [900i16, -400, 250, -1500, 620, 80, -90, 1024, -777, 333],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 0],
            [5000, -5000, 2500, -2500, 1250, -1250, 600, -600, 300, -300],
        ];

        for x_q10 in &inputs {
            let (indices, rd) = quantize(x_q10, 3146);
            assert_eq!(rd, path_cost(x_q10, &indices, 3146));
        }
    }

    #[test]
    fn higher_rate_cost_prefers_cheaper_indices() {
        let x_q10 = [700, -700, 700, -700, 700, -700, 700, -700, 700, -700];
        let (_, rd_cheap) = quantize(&x_q10, 100);
        let (_, rd_expensive) = quantize(&x_q10, 5000);

        // The same distortion plus a larger rate multiplier cannot get
        // cheaper overall.
        assert!(rd_expensive >= rd_cheap);
    }
}
