//! Unpacking of per-coefficient entropy table offsets and predictors, from
//! `silk/NLSF_unpack.c` in the reference implementation.

use crate::tables_nlsf_cb_wb::SilkNlsfCb;

/// Largest residual index transmitted with its own probability entry.
pub const NLSF_QUANT_MAX_AMPLITUDE: i32 = 4;

/// Looks up the entropy rate table offsets and backward predictors selected
/// by a stage-one codebook index.
///
/// For each coefficient, `ec_ix` receives the starting offset into the
/// codebook's `ec_rates_q5` table and `pred_q8` the backward-prediction
/// coefficient.
#[allow(clippy::cast_possible_truncation)]
pub fn nlsf_unpack(ec_ix: &mut [i16], pred_q8: &mut [u8], cb: &SilkNlsfCb, cb1_index: usize) {
    let order = cb.order as usize;
    assert_eq!(ec_ix.len(), order);
    assert_eq!(pred_q8.len(), order);
    assert!(cb1_index < cb.n_vectors as usize);

    let selectors = &cb.ec_sel[cb1_index * order..(cb1_index + 1) * order];

    for (i, sel) in selectors.iter().enumerate() {
        ec_ix[i] = (i32::from(sel.rate_table) * (2 * NLSF_QUANT_MAX_AMPLITUDE + 1)) as i16;

        // The last coefficient has no successor to predict from, so it never
        // selects the alternative predictor list.
        debug_assert!(i < order - 1 || !sel.alt_pred);
        let pred_offset = if sel.alt_pred { order - 1 } else { 0 };
        pred_q8[i] = cb.pred_q8[i + pred_offset];
    }
}

#[cfg(test)]
mod tests {
    use super::nlsf_unpack;
    use crate::tables_nlsf_cb_wb::SILK_NLSF_CB_WB;

    #[test]
    fn first_wideband_vector_selects_the_base_tables() {
        let mut ec_ix = [0i16; 16];
        let mut pred_q8 = [0u8; 16];

        nlsf_unpack(&mut ec_ix, &mut pred_q8, &SILK_NLSF_CB_WB, 0);

        // Vector 0 uses rate table 0 throughout and the alternative predictor
        // only for coefficient 14.
        assert_eq!(ec_ix, [0i16; 16]);
        assert_eq!(pred_q8[0], 175);
        assert_eq!(pred_q8[13], 192);
        assert_eq!(pred_q8[14], 155);
        assert_eq!(pred_q8[15], 68);
    }

    #[test]
    fn offsets_are_multiples_of_the_rate_table_stride() {
        let cb = &SILK_NLSF_CB_WB;
        let mut ec_ix = [0i16; 16];
        let mut pred_q8 = [0u8; 16];

        for index in 0..cb.n_vectors as usize {
            nlsf_unpack(&mut ec_ix, &mut pred_q8, cb, index);
            for &ix in &ec_ix {
                assert_eq!(ix % 9, 0);
                assert!((0..=i16::try_from(cb.ec_rates_q5.len() - 9).unwrap()).contains(&ix));
            }
        }
    }
}
