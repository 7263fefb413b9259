use crate::error::Result;
use bhjl::bhjl::{Bhjl, BhjlCiphertext, BhjlParam, BhjlSecretKey};
use core::fmt::{self, Debug, Formatter};
use derive_more::{Deref, From, Into};
use log::debug;
use num_bigint::BigUint;
use num_traits::{One, Zero};
use rand::{CryptoRng, RngCore};
use util::{from_be, prf, wipe, CodecError, Label, NONCE_SIZE, SK_SIZE};
use zeroize::{Zeroize, ZeroizeOnDrop};

mod decrypt;
mod encrypt;
mod eval;

#[derive(Debug)]
pub struct Labhe;

/// Public parameters shared by every sender, evaluator and the decryptor.
#[derive(Clone, Debug, PartialEq, Eq, Deref)]
pub struct LabheParam {
    #[deref]
    bhjl: BhjlParam,
    enc1: BhjlCiphertext,
}

impl LabheParam {
    pub fn new(bhjl: BhjlParam, enc1: BhjlCiphertext) -> Self {
        assert_eq!(bhjl.k(), 8 * NONCE_SIZE);

        Self { bhjl, enc1 }
    }

    pub fn bhjl(&self) -> &BhjlParam {
        &self.bhjl
    }

    /// Encryption of `1` consumed by [`Labhe::hommul_lev0`].
    pub fn enc1(&self) -> &BhjlCiphertext {
        &self.enc1
    }
}

#[derive(Clone, Debug, Deref)]
pub struct LabheMasterKey(BhjlSecretKey);

/// Sender PRF key.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct LabheSecretKey([u8; SK_SIZE]);

impl LabheSecretKey {
    pub fn from_bytes(bytes: [u8; SK_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; SK_SIZE] {
        &self.0
    }

    pub(crate) fn to_biguint(&self) -> BigUint {
        from_be(&self.0)
    }

    /// `F(sk, label)` read as a big-endian integer.
    pub(crate) fn mask(&self, label: Label) -> BigUint {
        let mut nonce = prf(&self.0, &label.to_bytes());
        let mask = from_be(&nonce);
        nonce.zeroize();
        mask
    }
}

impl Debug for LabheSecretKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("LabheSecretKey(..)")
    }
}

/// Sender secret key encrypted under the master parameters.
#[derive(Clone, Debug, PartialEq, Eq, Deref, From, Into)]
pub struct LabhePublicKey(BhjlCiphertext);

impl LabhePublicKey {
    pub fn to_bytes(&self) -> Vec<u8> {
        self.0.to_bytes()
    }

    pub fn from_bytes(bytes: &[u8]) -> core::result::Result<Self, CodecError> {
        BhjlCiphertext::from_bytes(bytes).map(Self)
    }
}

/// Offline material of one label: `b = 2^k - mask` and `eb = Enc(mask)`.
#[derive(Clone, Debug)]
pub struct LabheMask {
    b: BigUint,
    eb: BhjlCiphertext,
}

impl Drop for LabheMask {
    fn drop(&mut self) {
        self.wipe();
    }
}

impl LabheMask {
    fn wipe(&mut self) {
        wipe(&mut self.b);
    }

    pub fn b(&self) -> &BigUint {
        &self.b
    }

    pub fn eb(&self) -> &BhjlCiphertext {
        &self.eb
    }
}

/// Level-0 ciphertext `(a, eb)` with `a = m - mask mod 2^k` and
/// `eb = Enc(mask)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabheCiphertext0 {
    a: BigUint,
    eb: BhjlCiphertext,
}

impl LabheCiphertext0 {
    pub fn new(a: BigUint, eb: BhjlCiphertext) -> Self {
        Self { a, eb }
    }

    pub(crate) fn identity() -> Self {
        Self::new(BigUint::zero(), BhjlCiphertext::identity())
    }

    pub fn a(&self) -> &BigUint {
        &self.a
    }

    pub fn eb(&self) -> &BhjlCiphertext {
        &self.eb
    }
}

/// Level-1 ciphertext, a plain [`BhjlCiphertext`] once multiplied.
#[derive(Clone, Debug, PartialEq, Eq, Deref, From, Into)]
pub struct LabheCiphertext1(BhjlCiphertext);

impl Labhe {
    /// Master setup of the public-key variant, run once by the decryptor.
    pub fn setup(l: usize, k: usize, rng: &mut impl RngCore) -> (LabheParam, LabheMasterKey) {
        assert_eq!(k, 8 * NONCE_SIZE);

        let (bhjl, sk) = Bhjl::param_gen(l, k, rng);
        let enc1 = Bhjl::encrypt(&bhjl, &BigUint::one(), rng);
        debug!("master setup done for l = {l}, k = {k}");
        (LabheParam::new(bhjl, enc1), LabheMasterKey(sk))
    }

    /// Setup of the symmetric variant where the decryptor is the only sender
    /// and keeps the PRF key instead of publishing an encryption of it.
    pub fn setup_symmetric(
        l: usize,
        k: usize,
        rng: &mut (impl RngCore + CryptoRng),
    ) -> Result<(LabheParam, LabheMasterKey, LabheSecretKey)> {
        let sk = Labhe::sk_gen(rng)?;
        let (param, msk) = Labhe::setup(l, k, rng);
        Ok((param, msk, sk))
    }

    pub fn sk_gen(rng: &mut (impl RngCore + CryptoRng)) -> Result<LabheSecretKey> {
        let mut bytes = [0; SK_SIZE];
        if let Err(err) = rng.try_fill_bytes(&mut bytes) {
            bytes.zeroize();
            return Err(err.into());
        }
        let sk = LabheSecretKey(bytes);
        bytes.zeroize();
        Ok(sk)
    }

    pub fn pk_gen(param: &LabheParam, sk: &LabheSecretKey, rng: &mut impl RngCore) -> LabhePublicKey {
        let mut sk = sk.to_biguint();
        let pk = Bhjl::encrypt(param, &sk, rng);
        wipe(&mut sk);
        LabhePublicKey(pk)
    }

    /// Sender identity, created once and reused for a whole stream of labels.
    pub fn key_gen(
        param: &LabheParam,
        rng: &mut (impl RngCore + CryptoRng),
    ) -> Result<(LabheSecretKey, LabhePublicKey)> {
        let sk = Labhe::sk_gen(rng)?;
        let pk = Labhe::pk_gen(param, &sk, rng);
        Ok((sk, pk))
    }
}

#[cfg(test)]
pub(crate) mod test {
    use crate::{
        error::LabheError,
        labhe::{Labhe, LabheMasterKey, LabheParam, LabhePublicKey, LabheSecretKey},
    };
    use bhjl::bhjl::Bhjl;
    use num_bigint::BigUint;
    use num_traits::Zero;
    use rand::{rngs::StdRng, thread_rng, CryptoRng, RngCore, SeedableRng};
    use std::sync::OnceLock;
    use util::{from_be, Label, SK_SIZE};

    pub(crate) fn testing_setup() -> &'static (LabheParam, LabheMasterKey) {
        static SETUP: OnceLock<(LabheParam, LabheMasterKey)> = OnceLock::new();
        SETUP.get_or_init(|| Labhe::setup(1024, 128, &mut StdRng::seed_from_u64(128)))
    }

    struct FailingRng;

    impl RngCore for FailingRng {
        fn next_u32(&mut self) -> u32 {
            unimplemented!()
        }

        fn next_u64(&mut self) -> u64 {
            unimplemented!()
        }

        fn fill_bytes(&mut self, _: &mut [u8]) {
            unimplemented!()
        }

        fn try_fill_bytes(&mut self, _: &mut [u8]) -> Result<(), rand::Error> {
            Err(rand::Error::new("entropy pool closed"))
        }
    }

    impl CryptoRng for FailingRng {}

    #[test]
    fn key_gen() {
        let mut rng = StdRng::from_entropy();
        let (param, msk) = testing_setup();
        let (sk, pk) = Labhe::key_gen(param, &mut rng).unwrap();
        assert_eq!(Bhjl::decrypt(param, msk, &pk), from_be(sk.as_bytes()));
        let (sk1, pk1) = Labhe::key_gen(param, &mut rng).unwrap();
        assert_ne!(sk, sk1);
        assert_ne!(pk, pk1);
    }

    #[test]
    fn key_gen_without_entropy() {
        let (param, _) = testing_setup();
        assert!(matches!(
            Labhe::key_gen(param, &mut FailingRng),
            Err(LabheError::Entropy(_))
        ));
    }

    #[test]
    fn enc1() {
        let (param, msk) = testing_setup();
        assert_eq!(Bhjl::decrypt(param, msk, param.enc1()), BigUint::from(1u32));
    }

    #[test]
    fn public_key_bytes() {
        let (param, msk) = testing_setup();
        let (sk, pk) = Labhe::key_gen(param, &mut thread_rng()).unwrap();
        let pk = LabhePublicKey::from_bytes(&pk.to_bytes()).unwrap();
        assert_eq!(Bhjl::decrypt(param, msk, &pk), from_be(sk.as_bytes()));
    }

    #[test]
    fn secret_key_debug_is_redacted() {
        let sk = LabheSecretKey::from_bytes([0xab; SK_SIZE]);
        assert_eq!(format!("{sk:?}"), "LabheSecretKey(..)");
        let (_, msk) = testing_setup();
        assert!(!format!("{msk:?}").contains(&msk.p().to_string()));
    }

    #[test]
    #[should_panic]
    fn setup_rejects_short_messages() {
        Labhe::setup(512, 64, &mut thread_rng());
    }

    #[test]
    #[should_panic]
    fn setup_rejects_wide_messages() {
        Labhe::setup(512, 160, &mut thread_rng());
    }

    #[test]
    #[should_panic]
    fn param_rejects_wide_messages() {
        let mut rng = StdRng::seed_from_u64(160);
        let (bhjl, _) = Bhjl::param_gen(512, 160, &mut rng);
        let enc1 = Bhjl::encrypt(&bhjl, &BigUint::from(1u32), &mut rng);
        LabheParam::new(bhjl, enc1);
    }

    #[test]
    fn mask_wipe() {
        let mut rng = thread_rng();
        let (param, _) = testing_setup();
        let (sk, _) = Labhe::key_gen(param, &mut rng).unwrap();
        let mut mask = Labhe::encrypt_offline(param, &sk, Label::new(0), &mut rng);
        assert!(!mask.b().is_zero());
        mask.wipe();
        assert!(mask.b().is_zero());
    }
}
