#![no_std]

//! Fixed-point conversion and quantization routines for normalized line
//! spectral frequencies (NLSFs), ported from the SILK layer of the reference
//! Opus implementation.

pub mod a2nlsf;
pub mod bwexpander_32;
pub mod interpolate;
pub mod lin2log;
pub mod lpc_inv_pred_gain;
pub mod nlsf2a;
pub mod nlsf_decode;
pub mod nlsf_del_dec_quant;
pub mod nlsf_encode;
pub mod nlsf_stabilize;
pub mod nlsf_unpack;
pub mod nlsf_vq;
pub mod nlsf_vq_weights_laroia;
pub mod process_nlsfs;
pub mod sort;
pub mod table_lsf_cos;
pub mod tables_nlsf_cb_nb_mb;
pub mod tables_nlsf_cb_wb;

pub use interpolate::MAX_LPC_ORDER;
pub use process_nlsfs::FrameSignalType;
pub use tables_nlsf_cb_nb_mb::SILK_NLSF_CB_NB_MB;
pub use tables_nlsf_cb_wb::{EcSelector, SilkNlsfCb, SILK_NLSF_CB_WB};
