use crate::{
    error::Result,
    labhe::{
        Labhe, LabheCiphertext0, LabheCiphertext1, LabheMasterKey, LabheParam, LabhePublicKey,
        LabheSecretKey,
    },
};
use bhjl::bhjl::Bhjl;
use log::{debug, warn};
use num_bigint::BigUint;
use num_traits::Zero;
use util::{izip_eq, mod_pow2, to_fixed_be, wipe, Label, SK_SIZE};
use zeroize::Zeroize;

impl Labhe {
    /// Recovers a sender's PRF key from its public key. Encodings shorter than
    /// [`SK_SIZE`] bytes are left-padded with zeros.
    pub fn decrypt_offline_indep(
        param: &LabheParam,
        msk: &LabheMasterKey,
        pk: &LabhePublicKey,
    ) -> Result<LabheSecretKey> {
        Labhe::secret_key_from_biguint(Bhjl::decrypt(param, msk, pk))
    }

    fn secret_key_from_biguint(mut sk: BigUint) -> Result<LabheSecretKey> {
        let bytes = to_fixed_be::<SK_SIZE>(&sk);
        wipe(&mut sk);
        match bytes {
            Ok(mut bytes) => {
                let sk = LabheSecretKey::from_bytes(bytes);
                bytes.zeroize();
                Ok(sk)
            }
            Err(err) => {
                warn!("sender secret key recovery failed: {err}");
                Err(err.into())
            }
        }
    }

    /// `b = Σ mask_i mod 2^k` over labels `start..start + count`.
    pub fn decrypt_offline_sum0_sk(
        param: &LabheParam,
        sk: &LabheSecretKey,
        start: Label,
        count: usize,
    ) -> BigUint {
        debug!("offline sum decryption of {count} labels from {start}");
        let b = start.range(count).map(|label| sk.mask(label)).sum::<BigUint>();
        mod_pow2(&b, param.k())
    }

    pub fn decrypt_offline_sum0(
        param: &LabheParam,
        msk: &LabheMasterKey,
        pk: &LabhePublicKey,
        start: Label,
        count: usize,
    ) -> Result<BigUint> {
        let sk = Labhe::decrypt_offline_indep(param, msk, pk)?;
        Ok(Labhe::decrypt_offline_sum0_sk(param, &sk, start, count))
    }

    /// `b = Σ mask1_i * mask2_i mod 2^k`, pairing label `start1 + i` of the
    /// first sender with label `start2 + i` of the second.
    pub fn decrypt_offline_ip_sk(
        param: &LabheParam,
        sk1: &LabheSecretKey,
        sk2: &LabheSecretKey,
        start1: Label,
        start2: Label,
        count: usize,
    ) -> BigUint {
        debug!("offline inner product decryption of {count} labels from {start1} and {start2}");
        izip_eq!(start1.range(count), start2.range(count)).fold(
            BigUint::zero(),
            |acc, (label1, label2)| {
                let v = sk1.mask(label1) * sk2.mask(label2);
                mod_pow2(&(acc + v), param.k())
            },
        )
    }

    pub fn decrypt_offline_ip(
        param: &LabheParam,
        msk: &LabheMasterKey,
        pk1: &LabhePublicKey,
        pk2: &LabhePublicKey,
        start1: Label,
        start2: Label,
        count: usize,
    ) -> Result<BigUint> {
        let sk1 = Labhe::decrypt_offline_indep(param, msk, pk1)?;
        let sk2 = Labhe::decrypt_offline_indep(param, msk, pk2)?;
        Ok(Labhe::decrypt_offline_ip_sk(
            param, &sk1, &sk2, start1, start2, count,
        ))
    }

    pub fn decrypt_online1(
        param: &LabheParam,
        msk: &LabheMasterKey,
        ct: &LabheCiphertext1,
        b: &BigUint,
    ) -> BigUint {
        mod_pow2(&(Bhjl::decrypt(param, msk, ct) + b), param.k())
    }

    pub fn decrypt_online0(param: &LabheParam, a: &BigUint, b: &BigUint) -> BigUint {
        mod_pow2(&(a + b), param.k())
    }

    /// Decrypts a level-0 ciphertext without offline material by unmasking
    /// with its own `eb`.
    pub fn decrypt_nooff0(
        param: &LabheParam,
        msk: &LabheMasterKey,
        ct: &LabheCiphertext0,
    ) -> BigUint {
        mod_pow2(&(Bhjl::decrypt(param, msk, ct.eb()) + ct.a()), param.k())
    }
}
