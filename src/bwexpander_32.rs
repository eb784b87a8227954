//! Bandwidth expansion for 32-bit AR filters.
//!
//! Port of `silk_bwexpander_32` from `silk/bwexpander_32.c` in the reference
//! implementation. A Q16 chirp factor is applied cumulatively to the
//! coefficients, pulling the filter poles towards the origin. Both the
//! coefficient converters use this to recover from ill-conditioned filters.

/// Chirps (bandwidth expands) a 32-bit AR filter.
///
/// `chirp_q16` uses Q16 fixed-point scaling where `1 << 16` represents a
/// factor of `1.0`.
pub fn bwexpander_32(ar: &mut [i32], chirp_q16: i32) {
    let Some((last, head)) = ar.split_last_mut() else {
        return;
    };

    let mut chirp = chirp_q16;
    let chirp_minus_one_q16 = chirp_q16.wrapping_sub(1 << 16);

    for value in head.iter_mut() {
        *value = smulww(chirp, *value);
        let product = i64::from(chirp) * i64::from(chirp_minus_one_q16);
        chirp = chirp.wrapping_add(rshift_round(product, 16));
    }

    *last = smulww(chirp, *last);
}

#[inline]
fn smulww(a: i32, b: i32) -> i32 {
    ((i64::from(a) * i64::from(b)) >> 16) as i32
}

#[inline]
fn rshift_round(value: i64, shift: u32) -> i32 {
    debug_assert!(shift > 0);
    let rounded = if shift == 1 {
        (value >> 1) + (value & 1)
    } else {
        ((value >> (shift - 1)) + 1) >> 1
    };
    rounded as i32
}

#[cfg(test)]
mod tests {
    use super::bwexpander_32;

    #[test]
    fn unity_chirp_leaves_coefficients_unchanged() {
        let mut ar = [123_456_789, -98_765_432];
        bwexpander_32(&mut ar, 1 << 16);
        assert_eq!(ar, [123_456_789, -98_765_432]);
    }

    #[test]
    fn attenuation_compounds_along_the_filter() {
        let chirp_q16 = (9 << 16) / 10;
        let mut ar = [32_000_000, -16_000_000, 8_000_000, -4_000_000];

        bwexpander_32(&mut ar, chirp_q16);

        assert_eq!(ar, [28_799_804, -12_959_717, 5_831_787, -2_624_268]);
    }
}
