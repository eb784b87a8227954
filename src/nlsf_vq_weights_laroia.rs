//! Laroia low-complexity NLSF weights, from `silk/NLSF_VQ_weights_laroia.c`
//! in the reference implementation.
//!
//! Each weight is the sum of the inverted distances to the two neighbouring
//! NLSFs, with the 0 and pi borders acting as neighbours for the first and
//! last value. Close neighbours thus get large weights, which concentrates
//! quantization accuracy where the spectrum has sharp peaks.

/// Q-domain of the computed weights.
pub const NLSF_W_Q: i32 = 2;

/// Computes Laroia weights for an NLSF vector.
///
/// `nlsf_q15` must be sorted and strictly inside `(0, 1 << 15)`; the weights
/// are written to `w_qw` in Q(`NLSF_W_Q`) format.
#[allow(clippy::cast_possible_truncation)]
pub fn nlsf_vq_weights_laroia(w_qw: &mut [i16], nlsf_q15: &[i16]) {
    let order = nlsf_q15.len();
    assert_eq!(order, w_qw.len(), "weight vector length mismatch");
    assert!(order > 1 && order % 2 == 0, "unsupported LPC order");

    // First value and last value have distances to the borders.
    let mut tmp1 = (1 << (15 + NLSF_W_Q)) / i32::from(nlsf_q15[0]).max(1);
    let mut tmp2 =
        (1 << (15 + NLSF_W_Q)) / (i32::from(nlsf_q15[1]) - i32::from(nlsf_q15[0])).max(1);

    w_qw[0] = (tmp1 + tmp2).min(i32::from(i16::MAX)) as i16;
    debug_assert!(w_qw[0] > 0);

    for k in (1..order - 1).step_by(2) {
        tmp1 = (i32::from(nlsf_q15[k + 1]) - i32::from(nlsf_q15[k])).max(1);
        tmp1 = (1 << (15 + NLSF_W_Q)) / tmp1;
        w_qw[k] = (tmp1 + tmp2).min(i32::from(i16::MAX)) as i16;
        debug_assert!(w_qw[k] > 0);

        tmp2 = (i32::from(nlsf_q15[k + 2]) - i32::from(nlsf_q15[k + 1])).max(1);
        tmp2 = (1 << (15 + NLSF_W_Q)) / tmp2;
        w_qw[k + 1] = (tmp1 + tmp2).min(i32::from(i16::MAX)) as i16;
        debug_assert!(w_qw[k + 1] > 0);
    }

    tmp1 = ((1 << 15) - i32::from(nlsf_q15[order - 1])).max(1);
    tmp1 = (1 << (15 + NLSF_W_Q)) / tmp1;
    w_qw[order - 1] = (tmp1 + tmp2).min(i32::from(i16::MAX)) as i16;
    debug_assert!(w_qw[order - 1] > 0);
}
