//! NLSF codebook for the narrowband and mediumband bandwidths.
//!
//! Ported from `silk/tables_NLSF_CB_NB_MB.c` in the reference Opus
//! implementation, with the packed entropy-selection bytes expanded into
//! explicit per-coefficient [`EcSelector`] records.

use super::tables_nlsf_cb_wb::{EcSelector, SilkNlsfCb};

const NB_MB_ORDER: usize = 10;
const NB_MB_VECTORS: usize = 32;

const fn sel(rate_table: u8, alt_pred: bool) -> EcSelector {
    EcSelector {
        rate_table,
        alt_pred,
    }
}

/// C equivalent: `silk_NLSF_CB1_NB_MB_Q8`.
static SILK_NLSF_CB1_NB_MB_Q8: [u8; NB_MB_VECTORS * NB_MB_ORDER] = [
    12, 35, 60, 83, 108, 132, 157, 180, 206, 228,
    19, 31, 62, 74, 107, 130, 168, 196, 226, 252,
    13, 26, 48, 56, 81, 113, 146, 165, 184, 202,
    12, 22, 45, 83, 106, 146, 187, 224, 236, 252,
    19, 47, 70, 82, 101, 119, 146, 161, 179, 188,
    22, 56, 67, 95, 125, 142, 172, 201, 237, 252,
    4, 20, 62, 86, 118, 134, 165, 179, 222, 252,
    20, 45, 68, 88, 132, 141, 179, 195, 229, 239,
    15, 35, 58, 87, 97, 133, 157, 175, 206, 241,
    2, 26, 50, 68, 95, 117, 128, 165, 192, 223,
    17, 43, 76, 109, 145, 158, 168, 180, 218, 243,
    15, 37, 52, 64, 98, 135, 151, 184, 218, 252,
    12, 34, 55, 66, 75, 113, 137, 176, 217, 252,
    8, 26, 47, 75, 95, 125, 147, 164, 203, 225,
    22, 37, 76, 115, 142, 152, 166, 201, 240, 249,
    11, 44, 74, 93, 113, 147, 171, 197, 227, 252,
    23, 51, 79, 90, 121, 151, 180, 211, 230, 252,
    6, 31, 49, 78, 99, 114, 137, 154, 166, 186,
    20, 30, 45, 70, 84, 122, 153, 171, 185, 196,
    8, 18, 27, 65, 75, 108, 121, 139, 171, 188,
    12, 49, 82, 118, 131, 163, 186, 205, 242, 252,
    15, 31, 66, 89, 111, 150, 163, 176, 216, 227,
    5, 17, 34, 58, 79, 120, 151, 183, 222, 252,
    21, 41, 73, 106, 141, 148, 178, 188, 222, 252,
    13, 33, 65, 86, 117, 154, 197, 231, 243, 252,
    9, 31, 72, 93, 126, 136, 151, 190, 213, 228,
    20, 38, 73, 102, 125, 141, 176, 204, 237, 252,
    17, 43, 66, 90, 103, 127, 166, 205, 214, 231,
    18, 42, 60, 85, 127, 158, 170, 198, 240, 252,
    16, 33, 43, 79, 104, 117, 155, 173, 193, 216,
    22, 47, 85, 105, 114, 141, 171, 196, 233, 241,
    4, 18, 45, 58, 85, 120, 131, 140, 161, 188,
];

/// C equivalent: `silk_NLSF_CB1_iCDF_NB_MB`. The first half is used for
/// inactive and unvoiced frames, the second half for voiced frames.
static SILK_NLSF_CB1_ICDF_NB_MB: [u8; 2 * NB_MB_VECTORS] = [
    212, 178, 148, 129, 108, 96, 85, 82, 79, 77, 61, 59, 57, 56, 51, 49, 48, 45, 42, 41, 40, 38,
    36, 34, 31, 30, 21, 12, 10, 3, 1, 0, 255, 245, 244, 236, 233, 225, 217, 203, 190, 176, 175,
    161, 149, 136, 125, 114, 102, 91, 81, 71, 60, 52, 43, 35, 28, 20, 19, 18, 12, 11, 5, 0,
];

/// C equivalent: `silk_NLSF_PRED_NB_MB_Q8`. Two lists of `order - 1`
/// backward-predictor coefficients.
static SILK_NLSF_PRED_NB_MB_Q8: [u8; 2 * (NB_MB_ORDER - 1)] = [
    179, 138, 140, 148, 151, 149, 153, 151, 163, 116, 67, 82, 59, 92, 72, 100, 89, 92,
];

/// Per-coefficient entropy table and predictor selections, one row per
/// stage-one vector.
static SILK_NLSF_EC_SEL_NB_MB: [EcSelector; NB_MB_VECTORS * NB_MB_ORDER] = [
    sel(0, false), sel(0, false), sel(0, false), sel(0, false), sel(0, false), sel(0, false),
    sel(0, false), sel(0, false), sel(0, false), sel(0, false),
    sel(1, false), sel(3, true), sel(1, true), sel(2, false), sel(2, false), sel(1, false),
    sel(2, false), sel(1, false), sel(1, true), sel(1, false),
    sel(2, false), sel(1, false), sel(1, true), sel(1, false), sel(1, false), sel(1, true),
    sel(1, false), sel(1, false), sel(1, false), sel(1, false),
    sel(1, false), sel(2, false), sel(2, true), sel(2, true), sel(2, false), sel(1, false),
    sel(2, false), sel(1, false), sel(1, false), sel(1, false),
    sel(2, false), sel(3, false), sel(3, false), sel(3, false), sel(3, true), sel(2, false),
    sel(2, true), sel(2, false), sel(2, false), sel(2, false),
    sel(0, false), sel(5, false), sel(3, false), sel(3, false), sel(2, false), sel(2, false),
    sel(2, false), sel(2, false), sel(1, false), sel(1, false),
    sel(0, false), sel(2, false), sel(2, false), sel(2, false), sel(2, false), sel(2, false),
    sel(2, false), sel(2, true), sel(2, false), sel(1, false),
    sel(2, false), sel(3, false), sel(6, true), sel(4, true), sel(4, false), sel(4, false),
    sel(5, false), sel(4, false), sel(5, false), sel(5, false),
    sel(2, false), sel(4, false), sel(5, false), sel(5, false), sel(4, false), sel(5, false),
    sel(4, false), sel(6, false), sel(4, false), sel(4, false),
    sel(2, false), sel(4, false), sel(4, false), sel(7, false), sel(4, false), sel(5, false),
    sel(4, true), sel(5, false), sel(5, false), sel(4, false),
    sel(4, false), sel(3, false), sel(3, false), sel(3, false), sel(2, false), sel(3, false),
    sel(2, false), sel(2, false), sel(2, false), sel(2, false),
    sel(1, false), sel(5, false), sel(5, true), sel(6, false), sel(4, false), sel(5, false),
    sel(4, false), sel(5, false), sel(5, false), sel(5, false),
    sel(2, false), sel(7, false), sel(4, false), sel(6, false), sel(5, false), sel(5, false),
    sel(5, true), sel(5, false), sel(5, true), sel(5, false),
    sel(2, false), sel(7, false), sel(5, false), sel(5, true), sel(5, true), sel(5, false),
    sel(5, false), sel(6, false), sel(5, false), sel(4, false),
    sel(3, false), sel(3, false), sel(5, true), sel(4, false), sel(4, false), sel(5, true),
    sel(4, true), sel(5, false), sel(4, true), sel(4, false),
    sel(2, false), sel(3, false), sel(3, false), sel(5, true), sel(5, false), sel(4, false),
    sel(4, false), sel(4, false), sel(4, false), sel(4, false),
    sel(2, false), sel(4, false), sel(4, false), sel(6, false), sel(4, false), sel(5, false),
    sel(4, false), sel(5, false), sel(5, false), sel(5, false),
    sel(2, false), sel(5, false), sel(4, false), sel(6, false), sel(5, true), sel(5, false),
    sel(5, false), sel(4, false), sel(5, false), sel(4, false),
    sel(2, false), sel(7, false), sel(4, false), sel(5, false), sel(4, false), sel(5, false),
    sel(4, false), sel(5, false), sel(5, false), sel(5, false),
    sel(2, false), sel(5, false), sel(4, false), sel(6, false), sel(7, false), sel(6, false),
    sel(5, false), sel(6, false), sel(5, false), sel(4, false),
    sel(3, false), sel(6, false), sel(7, false), sel(4, true), sel(6, false), sel(5, true),
    sel(5, false), sel(6, false), sel(4, false), sel(5, false),
    sel(2, false), sel(7, false), sel(6, false), sel(4, false), sel(4, false), sel(4, true),
    sel(5, false), sel(4, false), sel(5, true), sel(5, false),
    sel(4, false), sel(5, false), sel(5, false), sel(4, false), sel(6, false), sel(6, false),
    sel(5, true), sel(6, false), sel(5, false), sel(4, false),
    sel(2, false), sel(5, false), sel(5, false), sel(6, false), sel(5, false), sel(6, false),
    sel(4, true), sel(6, false), sel(4, false), sel(4, false),
    sel(4, false), sel(5, false), sel(5, false), sel(5, false), sel(3, true), sel(7, false),
    sel(4, false), sel(5, false), sel(5, false), sel(4, false),
    sel(2, false), sel(3, false), sel(4, false), sel(5, false), sel(5, false), sel(6, false),
    sel(4, false), sel(5, false), sel(5, false), sel(4, false),
    sel(2, false), sel(3, false), sel(2, true), sel(3, false), sel(3, false), sel(4, false),
    sel(2, false), sel(3, false), sel(3, false), sel(3, false),
    sel(1, false), sel(1, false), sel(2, false), sel(2, false), sel(2, false), sel(2, false),
    sel(2, false), sel(3, true), sel(2, false), sel(2, false),
    sel(4, false), sel(5, false), sel(5, true), sel(6, false), sel(6, false), sel(6, false),
    sel(5, false), sel(6, true), sel(4, false), sel(5, false),
    sel(3, false), sel(5, false), sel(5, false), sel(4, false), sel(4, false), sel(4, false),
    sel(4, false), sel(3, false), sel(3, true), sel(2, false),
    sel(2, false), sel(5, false), sel(3, false), sel(7, false), sel(5, false), sel(5, false),
    sel(4, false), sel(4, true), sel(5, false), sel(4, false),
    sel(4, false), sel(4, false), sel(5, true), sel(4, false), sel(5, false), sel(6, false),
    sel(5, false), sel(6, false), sel(5, false), sel(4, false),
];

/// C equivalent: `silk_NLSF_CB2_Rates_NB_MB_Q5` (eight tables of nine
/// entries, selected through [`EcSelector::rate_table`]).
static SILK_NLSF_EC_RATES_NB_MB_Q5: [u8; 72] = [
    255, 255, 255, 131, 6, 145, 255, 255, 255,
    255, 255, 224, 93, 15, 96, 255, 255, 255,
    255, 255, 192, 83, 25, 71, 224, 255, 255,
    255, 255, 160, 74, 34, 66, 160, 255, 255,
    255, 205, 128, 73, 43, 57, 173, 255, 255,
    255, 205, 125, 71, 48, 58, 131, 255, 255,
    255, 166, 109, 73, 57, 62, 106, 205, 255,
    255, 255, 123, 65, 55, 69, 99, 173, 255,
];

/// C equivalent: `silk_NLSF_DELTA_MIN_NB_MB_Q15`.
static SILK_NLSF_DELTA_MIN_NB_MB_Q15: [i16; NB_MB_ORDER + 1] = [
    250, 3, 6, 3, 3, 3, 4, 3, 3, 3, 461,
];

/// C equivalent: `silk_NLSF_CB_NB_MB`.
pub static SILK_NLSF_CB_NB_MB: SilkNlsfCb = SilkNlsfCb {
    order: NB_MB_ORDER as i16,
    n_vectors: NB_MB_VECTORS as i16,
    quant_step_size_q16: 11_796, // 0.18 in Q16
    inv_quant_step_size_q6: 356, // 1 / 0.18 in Q6
    cb1_nlsf_q8: &SILK_NLSF_CB1_NB_MB_Q8,
    cb1_icdf: &SILK_NLSF_CB1_ICDF_NB_MB,
    pred_q8: &SILK_NLSF_PRED_NB_MB_Q8,
    ec_sel: &SILK_NLSF_EC_SEL_NB_MB,
    ec_rates_q5: &SILK_NLSF_EC_RATES_NB_MB_Q5,
    delta_min_q15: &SILK_NLSF_DELTA_MIN_NB_MB_Q15,
};
