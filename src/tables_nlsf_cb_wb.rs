//! NLSF codebook for the wideband bandwidth, together with the codebook
//! metadata type shared by all bandwidths.
//!
//! Ported from `silk/tables_NLSF_CB_WB.c` in the reference Opus
//! implementation. The packed entropy-selection bytes of the C tables are
//! expanded into explicit per-coefficient [`EcSelector`] records.

/// Entropy coding selection for a single NLSF coefficient.
///
/// `rate_table` picks one of the eight stage-two rate tables and `alt_pred`
/// switches to the secondary backward-predictor list.
#[derive(Clone, Copy, Debug)]
pub struct EcSelector {
    pub rate_table: u8,
    pub alt_pred: bool,
}

/// NLSF codebook metadata.
///
/// C equivalent: `silk_NLSF_CB_struct`. All tables are static and immutable;
/// `ec_sel` holds `n_vectors * order` selector records.
pub struct SilkNlsfCb {
    pub order: i16,
    pub n_vectors: i16,
    pub quant_step_size_q16: i16,
    pub inv_quant_step_size_q6: i16,
    pub cb1_nlsf_q8: &'static [u8],
    pub cb1_icdf: &'static [u8],
    pub pred_q8: &'static [u8],
    pub ec_sel: &'static [EcSelector],
    pub ec_rates_q5: &'static [u8],
    pub delta_min_q15: &'static [i16],
}

const WB_ORDER: usize = 16;
const WB_VECTORS: usize = 32;

const fn sel(rate_table: u8, alt_pred: bool) -> EcSelector {
    EcSelector {
        rate_table,
        alt_pred,
    }
}

/// C equivalent: `silk_NLSF_CB1_WB_Q8`.
static SILK_NLSF_CB1_WB_Q8: [u8; WB_VECTORS * WB_ORDER] = [
    7, 23, 38, 54, 69, 85, 100, 116, 131, 147, 162, 178, 193, 208, 223, 239,
    20, 29, 40, 47, 59, 81, 102, 125, 133, 147, 154, 170, 192, 214, 221, 235,
    11, 32, 49, 55, 79, 98, 118, 140, 148, 160, 173, 184, 192, 201, 225, 232,
    5, 28, 33, 41, 66, 75, 82, 93, 103, 128, 138, 148, 173, 181, 198, 212,
    18, 41, 60, 85, 98, 116, 130, 151, 173, 179, 184, 201, 222, 234, 248, 253,
    3, 24, 38, 55, 76, 100, 111, 118, 137, 149, 160, 184, 205, 224, 243, 253,
    4, 27, 36, 50, 65, 88, 110, 123, 147, 173, 189, 207, 225, 232, 242, 253,
    22, 48, 67, 74, 81, 93, 110, 127, 139, 151, 157, 181, 195, 205, 223, 248,
    22, 29, 45, 70, 82, 101, 109, 136, 150, 162, 167, 188, 204, 230, 236, 251,
    12, 22, 31, 54, 67, 78, 101, 109, 122, 134, 144, 150, 158, 166, 192, 213,
    22, 37, 61, 79, 87, 94, 110, 120, 135, 160, 180, 202, 221, 239, 248, 253,
    22, 44, 56, 69, 85, 103, 122, 139, 153, 171, 194, 208, 215, 226, 233, 253,
    21, 47, 70, 79, 86, 95, 102, 128, 137, 159, 173, 197, 207, 227, 239, 248,
    8, 17, 23, 40, 56, 72, 87, 106, 120, 129, 146, 160, 172, 184, 203, 214,
    12, 29, 44, 53, 68, 91, 111, 130, 149, 157, 171, 179, 197, 216, 229, 253,
    18, 41, 54, 61, 78, 85, 99, 118, 144, 157, 177, 184, 200, 212, 232, 248,
    17, 24, 38, 58, 79, 99, 105, 115, 126, 150, 169, 186, 197, 206, 226, 250,
    23, 30, 37, 43, 49, 56, 81, 93, 116, 128, 139, 160, 173, 184, 193, 204,
    5, 28, 53, 73, 97, 113, 123, 131, 142, 154, 167, 184, 202, 210, 223, 229,
    14, 22, 39, 58, 72, 95, 108, 131, 153, 166, 174, 197, 205, 213, 236, 253,
    9, 29, 44, 57, 78, 86, 107, 128, 148, 170, 181, 190, 198, 220, 234, 253,
    8, 28, 37, 58, 74, 90, 108, 132, 141, 151, 159, 173, 191, 212, 237, 253,
    14, 38, 51, 65, 71, 83, 100, 112, 134, 150, 168, 179, 205, 212, 231, 250,
    14, 37, 59, 67, 84, 90, 115, 121, 128, 144, 153, 177, 195, 217, 226, 253,
    17, 38, 45, 70, 77, 92, 107, 128, 140, 163, 175, 191, 200, 217, 231, 237,
    20, 32, 49, 65, 77, 96, 115, 136, 149, 163, 174, 189, 208, 217, 223, 228,
    13, 31, 46, 67, 74, 87, 109, 131, 137, 149, 175, 191, 204, 220, 229, 246,
    12, 36, 57, 75, 82, 96, 113, 132, 152, 178, 187, 203, 212, 228, 241, 253,
    8, 30, 52, 69, 81, 107, 117, 127, 136, 144, 163, 188, 200, 207, 230, 253,
    5, 10, 33, 60, 75, 90, 102, 125, 142, 160, 172, 180, 200, 208, 227, 253,
    6, 16, 28, 42, 61, 76, 91, 101, 117, 142, 158, 180, 194, 211, 220, 232,
    12, 20, 35, 49, 60, 72, 90, 112, 131, 147, 157, 166, 177, 192, 209, 237,
];

/// C equivalent: `silk_NLSF_CB1_iCDF_WB`. The first half is used for
/// inactive and unvoiced frames, the second half for voiced frames.
static SILK_NLSF_CB1_ICDF_WB: [u8; 2 * WB_VECTORS] = [
    225, 204, 201, 184, 183, 175, 158, 154, 153, 135, 119, 115, 113, 110, 109, 99, 98, 95, 79,
    68, 52, 50, 48, 45, 43, 32, 31, 27, 18, 10, 3, 0, 255, 251, 235, 230, 212, 201, 196, 182,
    167, 166, 163, 151, 138, 124, 110, 104, 90, 78, 76, 70, 69, 57, 45, 34, 24, 21, 11, 6, 5, 4,
    3, 0,
];

/// C equivalent: `silk_NLSF_PRED_WB_Q8`. Two lists of `order - 1`
/// backward-predictor coefficients.
static SILK_NLSF_PRED_WB_Q8: [u8; 2 * (WB_ORDER - 1)] = [
    175, 148, 160, 176, 178, 173, 174, 164, 177, 174, 196, 182, 198, 192, 182, 68, 62, 66, 60,
    72, 117, 85, 90, 118, 136, 151, 142, 160, 142, 155,
];

/// Per-coefficient entropy table and predictor selections, one row per
/// stage-one vector.
static SILK_NLSF_EC_SEL_WB: [EcSelector; WB_VECTORS * WB_ORDER] = [
    sel(0, false), sel(0, false), sel(0, false), sel(0, false), sel(0, false), sel(0, false),
    sel(0, false), sel(0, false), sel(0, false), sel(0, false), sel(0, false), sel(0, false),
    sel(0, false), sel(0, false), sel(0, true), sel(0, false),
    sel(2, false), sel(3, false), sel(3, false), sel(3, false), sel(3, false), sel(3, true),
    sel(2, false), sel(2, false), sel(2, false), sel(2, false), sel(2, false), sel(1, true),
    sel(1, false), sel(1, true), sel(0, false), sel(3, false),
    sel(2, false), sel(5, false), sel(5, false), sel(3, false), sel(7, false), sel(4, false),
    sel(4, false), sel(5, false), sel(2, false), sel(5, false), sel(4, false), sel(5, false),
    sel(5, false), sel(4, false), sel(3, false), sel(3, false),
    sel(0, false), sel(2, false), sel(1, false), sel(2, false), sel(2, false), sel(1, false),
    sel(1, false), sel(1, true), sel(1, false), sel(1, false), sel(0, false), sel(0, false),
    sel(0, false), sel(0, false), sel(0, false), sel(1, false),
    sel(0, false), sel(6, false), sel(5, false), sel(4, false), sel(6, false), sel(4, false),
    sel(7, false), sel(5, false), sel(4, false), sel(4, false), sel(4, false), sel(5, true),
    sel(5, false), sel(4, false), sel(4, false), sel(3, false),
    sel(0, false), sel(3, false), sel(5, true), sel(5, false), sel(4, false), sel(3, false),
    sel(3, false), sel(5, false), sel(3, false), sel(3, false), sel(3, false), sel(3, false),
    sel(3, false), sel(3, false), sel(2, false), sel(4, false),
    sel(0, false), sel(0, false), sel(0, true), sel(0, false), sel(0, true), sel(0, false),
    sel(0, false), sel(0, false), sel(0, false), sel(0, true), sel(0, false), sel(0, false),
    sel(0, true), sel(0, false), sel(0, false), sel(0, false),
    sel(0, false), sel(2, true), sel(6, false), sel(3, false), sel(7, false), sel(2, false),
    sel(5, false), sel(3, true), sel(4, false), sel(5, false), sel(5, true), sel(4, false),
    sel(3, false), sel(3, false), sel(2, false), sel(3, false),
    sel(0, false), sel(6, false), sel(2, false), sel(6, true), sel(6, false), sel(4, false),
    sel(5, false), sel(4, false), sel(6, false), sel(5, false), sel(4, false), sel(4, false),
    sel(5, false), sel(3, false), sel(3, false), sel(3, false),
    sel(2, false), sel(1, false), sel(0, false), sel(0, false), sel(0, false), sel(0, false),
    sel(0, false), sel(0, false), sel(0, false), sel(0, false), sel(0, false), sel(0, false),
    sel(0, false), sel(0, false), sel(0, false), sel(0, false),
    sel(0, false), sel(5, false), sel(5, false), sel(5, true), sel(6, true), sel(3, false),
    sel(6, true), sel(6, false), sel(6, false), sel(5, false), sel(0, true), sel(5, false),
    sel(4, false), sel(0, false), sel(1, false), sel(3, false),
    sel(0, false), sel(5, false), sel(5, false), sel(0, false), sel(1, false), sel(4, false),
    sel(2, false), sel(0, false), sel(2, false), sel(5, false), sel(4, false), sel(0, false),
    sel(5, false), sel(3, false), sel(0, false), sel(3, false),
    sel(1, false), sel(3, false), sel(5, false), sel(3, false), sel(7, false), sel(0, false),
    sel(0, false), sel(2, false), sel(0, false), sel(5, false), sel(5, true), sel(0, false),
    sel(3, false), sel(3, false), sel(0, false), sel(3, false),
    sel(0, false), sel(0, false), sel(2, false), sel(6, true), sel(3, true), sel(3, false),
    sel(2, false), sel(0, false), sel(4, true), sel(5, false), sel(1, true), sel(4, false),
    sel(2, false), sel(4, false), sel(0, false), sel(2, false),
    sel(0, false), sel(6, false), sel(5, false), sel(1, false), sel(0, true), sel(0, false),
    sel(0, false), sel(0, false), sel(1, true), sel(5, false), sel(1, false), sel(4, false),
    sel(1, true), sel(4, true), sel(0, false), sel(3, false),
    sel(0, false), sel(7, false), sel(5, false), sel(3, false), sel(2, true), sel(1, false),
    sel(5, false), sel(4, false), sel(6, false), sel(5, false), sel(3, false), sel(0, false),
    sel(0, true), sel(4, false), sel(2, true), sel(0, false),
    sel(0, false), sel(4, false), sel(4, false), sel(6, false), sel(7, true), sel(1, false),
    sel(1, false), sel(4, true), sel(2, false), sel(2, false), sel(3, false), sel(4, false),
    sel(0, false), sel(1, false), sel(5, false), sel(0, false),
    sel(2, false), sel(1, false), sel(0, false), sel(3, false), sel(3, false), sel(1, true),
    sel(5, false), sel(0, false), sel(3, false), sel(0, false), sel(4, false), sel(5, false),
    sel(4, false), sel(0, false), sel(0, false), sel(1, false),
    sel(0, false), sel(3, true), sel(2, false), sel(2, false), sel(7, false), sel(4, false),
    sel(0, false), sel(3, false), sel(3, false), sel(2, true), sel(0, false), sel(5, false),
    sel(1, false), sel(0, false), sel(0, false), sel(2, false),
    sel(1, false), sel(0, false), sel(0, false), sel(2, false), sel(1, false), sel(4, false),
    sel(3, false), sel(0, false), sel(2, false), sel(0, false), sel(4, false), sel(0, false),
    sel(3, false), sel(0, false), sel(3, false), sel(5, false),
    sel(2, false), sel(1, true), sel(4, false), sel(5, false), sel(2, false), sel(3, false),
    sel(3, false), sel(0, false), sel(0, false), sel(5, false), sel(3, false), sel(4, false),
    sel(5, false), sel(4, false), sel(1, false), sel(4, false),
    sel(1, false), sel(2, false), sel(0, false), sel(2, false), sel(4, false), sel(1, false),
    sel(2, false), sel(0, false), sel(0, false), sel(6, false), sel(3, false), sel(0, false),
    sel(1, false), sel(0, false), sel(2, false), sel(1, false),
    sel(0, false), sel(1, false), sel(6, false), sel(1, false), sel(7, false), sel(2, true),
    sel(7, false), sel(0, false), sel(0, false), sel(5, false), sel(4, false), sel(4, false),
    sel(5, false), sel(3, true), sel(2, false), sel(1, false),
    sel(2, false), sel(0, false), sel(5, true), sel(3, false), sel(6, false), sel(1, false),
    sel(1, false), sel(4, false), sel(0, false), sel(2, false), sel(0, false), sel(6, false),
    sel(5, false), sel(1, false), sel(0, false), sel(1, false),
    sel(1, false), sel(6, false), sel(5, false), sel(0, false), sel(7, false), sel(4, true),
    sel(0, false), sel(0, false), sel(0, false), sel(0, false), sel(0, false), sel(1, false),
    sel(0, false), sel(4, false), sel(4, false), sel(0, false),
    sel(0, false), sel(6, true), sel(0, false), sel(2, false), sel(0, false), sel(2, true),
    sel(3, false), sel(3, false), sel(0, false), sel(4, false), sel(0, true), sel(1, false),
    sel(4, false), sel(0, false), sel(0, false), sel(3, false),
    sel(2, false), sel(3, false), sel(5, false), sel(0, false), sel(0, true), sel(4, false),
    sel(1, false), sel(3, false), sel(1, true), sel(4, false), sel(0, false), sel(6, false),
    sel(1, false), sel(1, false), sel(3, false), sel(3, false),
    sel(2, false), sel(5, false), sel(4, false), sel(3, false), sel(0, false), sel(4, false),
    sel(1, false), sel(5, false), sel(4, false), sel(1, false), sel(2, false), sel(5, false),
    sel(5, false), sel(1, false), sel(3, false), sel(1, false),
    sel(3, false), sel(0, true), sel(0, false), sel(0, true), sel(2, false), sel(2, true),
    sel(5, false), sel(0, false), sel(0, false), sel(0, false), sel(0, false), sel(4, false),
    sel(4, false), sel(0, true), sel(1, false), sel(3, false),
    sel(0, false), sel(6, false), sel(3, false), sel(2, false), sel(6, false), sel(0, false),
    sel(5, true), sel(5, false), sel(4, false), sel(0, false), sel(0, false), sel(0, false),
    sel(4, false), sel(4, false), sel(3, false), sel(0, false),
    sel(2, false), sel(0, false), sel(0, false), sel(4, false), sel(7, false), sel(3, false),
    sel(7, false), sel(5, false), sel(5, false), sel(0, false), sel(1, false), sel(0, false),
    sel(3, false), sel(4, false), sel(0, true), sel(0, false),
    sel(1, false), sel(3, false), sel(0, false), sel(2, false), sel(7, false), sel(3, false),
    sel(0, false), sel(3, false), sel(5, false), sel(3, false), sel(4, false), sel(3, false),
    sel(1, false), sel(0, false), sel(1, false), sel(3, false),
];

/// C equivalent: `silk_NLSF_CB2_Rates_WB_Q5` (eight tables of nine entries,
/// selected through [`EcSelector::rate_table`]).
static SILK_NLSF_EC_RATES_WB_Q5: [u8; 72] = [
    255, 255, 255, 155, 5, 155, 255, 255, 255,
    255, 255, 224, 102, 15, 92, 255, 255, 255,
    255, 255, 205, 83, 24, 73, 224, 255, 255,
    255, 255, 150, 76, 33, 63, 224, 255, 255,
    255, 192, 120, 77, 43, 55, 182, 255, 255,
    255, 255, 134, 72, 43, 59, 141, 255, 255,
    255, 255, 131, 66, 50, 66, 107, 192, 255,
    255, 166, 115, 75, 55, 53, 125, 255, 255,
];

/// C equivalent: `silk_NLSF_DELTA_MIN_WB_Q15`.
static SILK_NLSF_DELTA_MIN_WB_Q15: [i16; WB_ORDER + 1] = [
    100, 3, 40, 3, 3, 3, 5, 14, 14, 10, 11, 3, 8, 9, 7, 3, 347,
];

/// C equivalent: `silk_NLSF_CB_WB`.
pub static SILK_NLSF_CB_WB: SilkNlsfCb = SilkNlsfCb {
    order: WB_ORDER as i16,
    n_vectors: WB_VECTORS as i16,
    quant_step_size_q16: 9_830, // 0.15 in Q16
    inv_quant_step_size_q6: 427, // 1 / 0.15 in Q6
    cb1_nlsf_q8: &SILK_NLSF_CB1_WB_Q8,
    cb1_icdf: &SILK_NLSF_CB1_ICDF_WB,
    pred_q8: &SILK_NLSF_PRED_WB_Q8,
    ec_sel: &SILK_NLSF_EC_SEL_WB,
    ec_rates_q5: &SILK_NLSF_EC_RATES_WB_Q5,
    delta_min_q15: &SILK_NLSF_DELTA_MIN_WB_Q15,
};
