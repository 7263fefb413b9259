use crate::labhe::{Labhe, LabheCiphertext0, LabheCiphertext1, LabheParam};
use bhjl::bhjl::{Bhjl, BhjlCiphertext};
use log::debug;
use num_bigint::BigUint;
use rayon::prelude::*;
use util::mod_pow2;

impl Labhe {
    /// Multiplies two level-0 ciphertexts into a level-1 ciphertext of
    /// `m0 * m1 - mask0 * mask1`.
    pub fn hommul_lev0(
        param: &LabheParam,
        ct0: &LabheCiphertext0,
        ct1: &LabheCiphertext0,
    ) -> LabheCiphertext1 {
        let c = Bhjl::hom_smul(param, param.enc1(), &(&ct0.a * &ct1.a));
        let c = Bhjl::hom_add(param, &c, &Bhjl::hom_smul(param, &ct0.eb, &ct1.a));
        let c = Bhjl::hom_add(param, &c, &Bhjl::hom_smul(param, &ct1.eb, &ct0.a));
        LabheCiphertext1(c)
    }

    pub fn hommul_lev0_batch(
        param: &LabheParam,
        cts0: &[LabheCiphertext0],
        cts1: &[LabheCiphertext0],
    ) -> Vec<LabheCiphertext1> {
        debug!("multiplying {} level-0 ciphertext pairs", cts0.len());
        cts0.par_iter()
            .zip_eq(cts1)
            .map(|(ct0, ct1)| Labhe::hommul_lev0(param, ct0, ct1))
            .collect()
    }

    pub fn homadd_lev0(
        param: &LabheParam,
        ct0: &LabheCiphertext0,
        ct1: &LabheCiphertext0,
    ) -> LabheCiphertext0 {
        LabheCiphertext0 {
            a: mod_pow2(&(&ct0.a + &ct1.a), param.k()),
            eb: Bhjl::hom_add(param, &ct0.eb, &ct1.eb),
        }
    }

    /// Sums `cts`, an empty slice sums to `(0, Enc(0))` with trivial
    /// randomness.
    pub fn homadd_lev0_batch(param: &LabheParam, cts: &[LabheCiphertext0]) -> LabheCiphertext0 {
        cts.par_iter()
            .cloned()
            .reduce(LabheCiphertext0::identity, |ct0, ct1| {
                Labhe::homadd_lev0(param, &ct0, &ct1)
            })
    }

    /// Sums only the `a` components, for decryption with offline material.
    pub fn homadd_lev0_batch_flat(param: &LabheParam, cts: &[LabheCiphertext0]) -> BigUint {
        let a = cts.iter().map(LabheCiphertext0::a).sum::<BigUint>();
        mod_pow2(&a, param.k())
    }

    pub fn homadd_lev1(
        param: &LabheParam,
        ct0: &LabheCiphertext1,
        ct1: &LabheCiphertext1,
    ) -> LabheCiphertext1 {
        LabheCiphertext1(Bhjl::hom_add(param, ct0, ct1))
    }

    pub fn homadd_lev1_batch(param: &LabheParam, cts: &[LabheCiphertext1]) -> LabheCiphertext1 {
        cts.par_iter().cloned().reduce(
            || LabheCiphertext1(BhjlCiphertext::identity()),
            |ct0, ct1| Labhe::homadd_lev1(param, &ct0, &ct1),
        )
    }

    pub fn homsub_lev1(
        param: &LabheParam,
        ct0: &LabheCiphertext1,
        ct1: &LabheCiphertext1,
    ) -> LabheCiphertext1 {
        LabheCiphertext1(Bhjl::hom_sub(param, ct0, ct1))
    }

    pub fn homsmul_lev1(param: &LabheParam, ct: &LabheCiphertext1, s: &BigUint) -> LabheCiphertext1 {
        LabheCiphertext1(Bhjl::hom_smul(param, ct, s))
    }
}
