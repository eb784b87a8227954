//! Approximation of `128 * log2(x)` on integers, from `silk/lin2log.c`.
//!
//! The encoder uses this cheap Q7 logarithm to convert stage-one symbol
//! probabilities into bit counts when accumulating rate/distortion costs.

/// Approximation of `128 * log2(x)` for 32-bit integers, result in Q7.
///
/// Matches the C implementation bit-exactly, including the implicit
/// behaviour for zero (`-128`) and negative inputs.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub fn lin2log(in_lin: i32) -> i32 {
    let in_lin_u32 = in_lin as u32;
    let lz = in_lin_u32.leading_zeros() as i32;

    let rot = 24 - lz;
    let rotated = if rot >= 0 {
        in_lin_u32.rotate_right(rot as u32)
    } else {
        in_lin_u32.rotate_left((-rot) as u32)
    } as i32;
    let frac_q7 = rotated & 0x7f;

    // Piecewise parabolic correction of the fractional part.
    let product = frac_q7 * (128 - frac_q7);
    let correction = frac_q7 + ((i64::from(product) * 179) >> 16) as i32;

    ((31 - lz) * 128) + correction
}
