//! Frame-level NLSF processing, from `silk/process_NLSFs.c` in the
//! reference implementation.
//!
//! Limits the NLSF quantizer's rate/distortion trade-off based on speech
//! activity, quantizes the frame's NLSF vector and converts the result (and,
//! for interpolated frames, the first-half vector) to prediction
//! coefficients.

use crate::interpolate::{interpolate, MAX_LPC_ORDER};
use crate::nlsf2a::nlsf2a;
use crate::nlsf_encode::nlsf_encode;
use crate::nlsf_vq_weights_laroia::nlsf_vq_weights_laroia;
use crate::tables_nlsf_cb_wb::SilkNlsfCb;

/// Signal classification of a frame, as carried in the frame type indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameSignalType {
    Inactive,
    Unvoiced,
    Voiced,
}

impl FrameSignalType {
    /// Index of the stage-one iCDF half used for this signal type; voiced
    /// frames use their own probability table.
    pub(crate) fn icdf_half(self) -> usize {
        match self {
            FrameSignalType::Inactive | FrameSignalType::Unvoiced => 0,
            FrameSignalType::Voiced => 1,
        }
    }
}

/// Per-frame inputs to [`process_nlsfs`] that come from the encoder's
/// control state.
pub struct NlsfQuantizerConfig<'a> {
    pub cb: &'a SilkNlsfCb,
    pub signal_type: FrameSignalType,
    /// Speech activity in Q8, `0..=256`.
    pub speech_activity_q8: i32,
    /// Number of stage-one survivors searched, `1..=`[`NLSF_VQ_MAX_SURVIVORS`].
    pub n_survivors: usize,
    /// Number of subframes in the frame, 2 or 4.
    pub nb_subfr: usize,
    /// When true, an interpolation factor below 4 splits the frame into two
    /// coefficient sets.
    pub use_interpolated_nlsfs: bool,
    /// NLSF interpolation factor in Q2, `0..=4`.
    pub interpolation_factor_q2: i32,
}

pub use crate::nlsf_encode::NLSF_VQ_MAX_SURVIVORS;

// NLSF quantizer rate/distortion trade-off anchors: 0.003 in Q20 and
// -0.001 in Q28.
const NLSF_MU_BASE_Q20: i32 = 3146;
const NLSF_MU_ACTIVITY_SLOPE_Q28: i32 = -268_435;
// 0.005 in Q20, the trade-off ceiling reached for 10 ms frames at zero
// activity.
const NLSF_MU_MAX_Q20: i32 = 5243;

/// Quantizes a frame's NLSF vector and derives the prediction coefficients.
///
/// `nlsf_q15` holds the frame-end NLSF vector and is replaced by its
/// quantized version; `prev_nlsf_q15` is the quantized vector of the previous
/// frame. The two rows of `pred_coef_q12` receive the Q12 prediction
/// coefficients for the first and second half of the frame, and the chosen
/// quantization indices are written to `indices`. Returns the
/// rate/distortion cost of the winner in Q25.
#[allow(clippy::cast_possible_truncation)]
pub fn process_nlsfs(
    indices: &mut [i8],
    pred_coef_q12: &mut [[i16; MAX_LPC_ORDER]; 2],
    nlsf_q15: &mut [i16],
    prev_nlsf_q15: &[i16],
    config: &NlsfQuantizerConfig,
) -> i32 {
    let order = config.cb.order as usize;
    assert_eq!(nlsf_q15.len(), order);
    assert_eq!(prev_nlsf_q15.len(), order);
    assert_eq!(indices.len(), order + 1);
    assert!((0..=256).contains(&config.speech_activity_q8));
    assert!(config.nb_subfr == 2 || config.nb_subfr == 4);
    assert!((0..=4).contains(&config.interpolation_factor_q2));

    // Calculate mu based on speech activity; quieter frames may spend fewer
    // bits on the NLSFs.
    let mut nlsf_mu_q20 = smlawb(
        NLSF_MU_BASE_Q20,
        NLSF_MU_ACTIVITY_SLOPE_Q28,
        config.speech_activity_q8,
    );
    if config.nb_subfr == 2 {
        // Multiply by 1.5 for 10 ms frames.
        nlsf_mu_q20 += nlsf_mu_q20 >> 1;
    }
    debug_assert!(nlsf_mu_q20 > 0);
    debug_assert!(nlsf_mu_q20 <= NLSF_MU_MAX_Q20);

    // Calculate NLSF weights.
    let mut nlsf_w_qw = [0i16; MAX_LPC_ORDER];
    nlsf_vq_weights_laroia(&mut nlsf_w_qw[..order], nlsf_q15);

    // Update NLSF weights for interpolated NLSFs.
    let do_interpolate = config.use_interpolated_nlsfs && config.interpolation_factor_q2 < 4;
    let mut nlsf0_temp_q15 = [0i16; MAX_LPC_ORDER];
    if do_interpolate {
        // Calculate the interpolated first-half NLSF vector and its weights.
        interpolate(
            &mut nlsf0_temp_q15[..order],
            prev_nlsf_q15,
            nlsf_q15,
            config.interpolation_factor_q2,
        );

        let mut nlsf_w0_temp_qw = [0i16; MAX_LPC_ORDER];
        nlsf_vq_weights_laroia(&mut nlsf_w0_temp_qw[..order], &nlsf0_temp_q15[..order]);

        // Blend the two weight vectors, weighting the first half by the
        // squared interpolation factor.
        let i_sqr_q15 =
            smulbb(config.interpolation_factor_q2, config.interpolation_factor_q2) << 11;
        for i in 0..order {
            nlsf_w_qw[i] = smlawb(
                i32::from(nlsf_w_qw[i]) >> 1,
                i32::from(nlsf_w0_temp_qw[i]),
                i_sqr_q15,
            ) as i16;
            debug_assert!(nlsf_w_qw[i] >= 1);
        }
    }

    let rd_q25 = nlsf_encode(
        indices,
        nlsf_q15,
        config.cb,
        &nlsf_w_qw[..order],
        nlsf_mu_q20,
        config.n_survivors,
        config.signal_type,
    );

    // Convert the quantized NLSFs to second-half prediction coefficients.
    nlsf2a(&mut pred_coef_q12[1][..order], nlsf_q15);

    if do_interpolate {
        // Interpolate with the quantized NLSFs and convert for the first
        // half of the frame.
        interpolate(
            &mut nlsf0_temp_q15[..order],
            prev_nlsf_q15,
            nlsf_q15,
            config.interpolation_factor_q2,
        );
        nlsf2a(&mut pred_coef_q12[0][..order], &nlsf0_temp_q15[..order]);
    } else {
        // No interpolation, both halves use the same coefficients.
        let (first, second) = pred_coef_q12.split_at_mut(1);
        first[0][..order].copy_from_slice(&second[0][..order]);
    }

    rd_q25
}

#[inline]
fn smlawb(a: i32, b: i32, c: i32) -> i32 {
    a.wrapping_add(((i64::from(b) * i64::from(c as i16)) >> 16) as i32)
}

#[inline]
fn smulbb(a: i32, b: i32) -> i32 {
    i32::from(a as i16) * i32::from(b as i16)
}
