use crate::labhe::{Labhe, LabheCiphertext0, LabheMask, LabheParam, LabheSecretKey};
use bhjl::bhjl::{Bhjl, BhjlRandomizer};
use core::iter::repeat_with;
use itertools::Itertools;
use log::debug;
use num_bigint::BigUint;
use rand::RngCore;
use rayon::prelude::*;
use util::{izip_eq, mod_pow2, wipe, Label};

impl Labhe {
    pub fn encrypt_offline(
        param: &LabheParam,
        sk: &LabheSecretKey,
        label: Label,
        rng: &mut impl RngCore,
    ) -> LabheMask {
        let x = Bhjl::sample_randomizer(param, rng);
        Labhe::mask_with_randomizer(param, sk, label, x)
    }

    /// Offline phase for labels `start..start + count`. Randomizers are drawn
    /// from `rng` in label order, so a seeded `rng` gives a reproducible batch.
    pub fn encrypt_offline_batch(
        param: &LabheParam,
        sk: &LabheSecretKey,
        start: Label,
        count: usize,
        rng: &mut impl RngCore,
    ) -> Vec<LabheMask> {
        debug!("offline encryption of {count} labels from {start}");
        let xs = repeat_with(|| Bhjl::sample_randomizer(param, rng))
            .take(count)
            .collect_vec();
        xs.into_par_iter()
            .enumerate()
            .map(|(i, x)| Labhe::mask_with_randomizer(param, sk, start.offset(i), x))
            .collect()
    }

    fn mask_with_randomizer(
        param: &LabheParam,
        sk: &LabheSecretKey,
        label: Label,
        x: BhjlRandomizer,
    ) -> LabheMask {
        let mut mask = sk.mask(label);
        let eb = Bhjl::encrypt_with_randomizer(param, &mask, x);
        let b = param.two_k() - &mask;
        wipe(&mut mask);
        LabheMask { b, eb }
    }

    pub fn encrypt_online(param: &LabheParam, mask: &LabheMask, m: &BigUint) -> LabheCiphertext0 {
        debug_assert!(m < param.two_k());
        let a = mod_pow2(&(mask.b() + m), param.k());
        LabheCiphertext0::new(a, mask.eb().clone())
    }

    pub fn encrypt_online_batch(
        param: &LabheParam,
        masks: &[LabheMask],
        ms: &[BigUint],
    ) -> Vec<LabheCiphertext0> {
        debug!("online encryption of {} messages", ms.len());
        izip_eq!(masks, ms)
            .map(|(mask, m)| Labhe::encrypt_online(param, mask, m))
            .collect()
    }
}
