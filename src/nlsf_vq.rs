//! First-stage NLSF codebook search, from `silk/NLSF_VQ.c` in the reference
//! implementation.

/// Computes the quantization errors for one NLSF vector against every
/// stage-one codebook vector.
///
/// `err_q26` receives one squared error per codebook vector; `cb_q8` holds
/// the concatenated Q8 codebook rows. The error is unweighted, the encoder
/// applies the Laroia weights per surviving vector afterwards.
#[allow(clippy::cast_possible_truncation)]
pub fn nlsf_vq(err_q26: &mut [i32], nlsf_q15: &[i16], cb_q8: &[u8]) {
    let order = nlsf_q15.len();
    assert!(order % 2 == 0, "LPC order must be even");
    assert_eq!(err_q26.len() * order, cb_q8.len(), "codebook size mismatch");

    for (err, row) in err_q26.iter_mut().zip(cb_q8.chunks_exact(order)) {
        let mut sum_error_q26 = 0i32;

        for m in (0..order).step_by(2) {
            // Squared error for index m.
            let diff_q15 = i32::from(nlsf_q15[m]) - (i32::from(row[m]) << 7);
            let mut sum_error = smulbb(diff_q15, diff_q15);

            // Index m + 1.
            let diff_q15 = i32::from(nlsf_q15[m + 1]) - (i32::from(row[m + 1]) << 7);
            sum_error += smulbb(diff_q15, diff_q15);

            sum_error_q26 += sum_error >> 4;
            debug_assert!(sum_error >= 0);
            debug_assert!(sum_error_q26 >= 0);
        }

        *err = sum_error_q26;
    }
}

#[inline]
fn smulbb(a: i32, b: i32) -> i32 {
    i32::from(a as i16) * i32::from(b as i16)
}
