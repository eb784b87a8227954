//! Linear interpolation of NLSF parameter vectors.
//!
//! Port of `silk_interpolate` from `silk/interpolate.c`. The frame-level
//! driver uses this to form the first-half NLSF vector when the interpolation
//! index signals a value below 4.

/// Maximum LPC order supported by the SILK codec.
pub const MAX_LPC_ORDER: usize = 16;

/// Interpolates between two NLSF vectors.
///
/// `ifact_q2` is given in Q2 format and must be in the range `0..=4`; 0
/// returns `x0` and 4 returns `x1`.
pub fn interpolate(xi: &mut [i16], x0: &[i16], x1: &[i16], ifact_q2: i32) {
    assert_eq!(xi.len(), x0.len());
    assert_eq!(xi.len(), x1.len());
    assert!(xi.len() <= MAX_LPC_ORDER);
    assert!((0..=4).contains(&ifact_q2));

    for ((xi_i, &x0_i), &x1_i) in xi.iter_mut().zip(x0.iter()).zip(x1.iter()) {
        let diff = (i32::from(x1_i) - i32::from(x0_i)) as i16;
        let product = i32::from(diff) * ifact_q2;
        *xi_i = (i32::from(x0_i) + (product >> 2)) as i16;
    }
}
