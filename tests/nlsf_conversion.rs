use silk_nlsf::a2nlsf::a2nlsf;
use silk_nlsf::lpc_inv_pred_gain::lpc_inverse_pred_gain;
use silk_nlsf::nlsf2a::nlsf2a;
use silk_nlsf::nlsf_decode::nlsf_decode;
use silk_nlsf::nlsf_stabilize::nlsf_stabilize;
use silk_nlsf::tables_nlsf_cb_nb_mb::SILK_NLSF_CB_NB_MB;
use silk_nlsf::tables_nlsf_cb_wb::{SilkNlsfCb, SILK_NLSF_CB_WB};

struct Lcg(u32);

impl Lcg {
    fn next(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        self.0
    }

    fn next_range(&mut self, limit: u32) -> u32 {
        self.next() % limit
    }
}

/// Draws a decodable index vector and decodes it, producing a realistic,
/// well-behaved NLSF vector.
fn random_decoded_nlsf(rng: &mut Lcg, cb: &SilkNlsfCb, nlsf: &mut [i16]) {
    let order = cb.order as usize;
    let mut indices = [0i8; 17];
    indices[0] = rng.next_range(cb.n_vectors as u32) as i8;
    for slot in indices[1..=order].iter_mut() {
        *slot = rng.next_range(9) as i8 - 4;
    }
    nlsf_decode(nlsf, &indices[..=order], cb);
}

#[test]
fn decoded_vectors_convert_to_stable_predictors() {
    let mut rng = Lcg(0x5117);
    for cb in [&SILK_NLSF_CB_NB_MB, &SILK_NLSF_CB_WB] {
        let order = cb.order as usize;
        for _ in 0..200 {
            let mut nlsf = [0i16; 16];
            random_decoded_nlsf(&mut rng, cb, &mut nlsf[..order]);

            let mut a_q12 = [0i16; 16];
            nlsf2a(&mut a_q12[..order], &nlsf[..order]);

            assert!(lpc_inverse_pred_gain(&a_q12[..order]) > 0);
        }
    }
}

#[test]
fn nlsf_to_lpc_and_back_preserves_the_spectrum() {
    let mut rng = Lcg(0xda7a);
    for cb in [&SILK_NLSF_CB_NB_MB, &SILK_NLSF_CB_WB] {
        let order = cb.order as usize;
        for _ in 0..100 {
            let mut nlsf = [0i16; 16];
            random_decoded_nlsf(&mut rng, cb, &mut nlsf[..order]);

            let mut a_q12 = [0i16; 16];
            nlsf2a(&mut a_q12[..order], &nlsf[..order]);

            let mut a_q16 = [0i32; 16];
            for (q16, &q12) in a_q16.iter_mut().zip(a_q12.iter()) {
                *q16 = i32::from(q12) << 4;
            }

            let mut recovered = [0i16; 16];
            a2nlsf(&mut recovered[..order], &mut a_q16[..order]);

            for (k, (&orig, &back)) in nlsf[..order].iter().zip(recovered.iter()).enumerate() {
                let err = (i32::from(orig) - i32::from(back)).abs();
                assert!(err < 2500, "coefficient {k}: {orig} vs {back}");
            }
        }
    }
}

#[test]
fn recovered_frequencies_are_ordered() {
    let mut rng = Lcg(0xbeef);
    for _ in 0..100 {
        let mut a_q16 = [0i32; 16];
        for value in a_q16.iter_mut() {
            *value = rng.next_range(32_768) as i32 - 16_384;
        }

        let mut nlsf = [0i16; 16];
        a2nlsf(&mut nlsf, &mut a_q16);

        for pair in nlsf.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert!(nlsf[0] >= 0);
    }
}

#[test]
fn stabilizer_is_idempotent() {
    let mut rng = Lcg(0x1234);
    for cb in [&SILK_NLSF_CB_NB_MB, &SILK_NLSF_CB_WB] {
        let order = cb.order as usize;
        for _ in 0..200 {
            let mut nlsf = [0i16; 16];
            for value in nlsf[..order].iter_mut() {
                *value = rng.next_range(32_768) as i16;
            }

            nlsf_stabilize(&mut nlsf[..order], cb.delta_min_q15);
            let first = nlsf;
            nlsf_stabilize(&mut nlsf[..order], cb.delta_min_q15);

            assert_eq!(first, nlsf);
        }
    }
}
