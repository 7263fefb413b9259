use core::{
    fmt::{self, Debug, Formatter},
    iter::repeat_with,
};
use derive_more::{Deref, From, Into};
use log::debug;
use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::RngCore;
use util::{
    decode_be, encode_be, is_quadratic_non_residue, mod_inv, pow2, random_prime,
    random_two_adic_prime, wipe, CodecError,
};

#[derive(Debug)]
pub struct Bhjl;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BhjlParam {
    n: BigUint,
    y: BigUint,
    k: usize,
    two_k: BigUint,
}

impl BhjlParam {
    pub fn new(n: BigUint, y: BigUint, k: usize) -> Self {
        assert!(k >= 1);
        assert!(y < n);

        Self {
            n,
            y,
            k,
            two_k: pow2(k),
        }
    }

    pub fn n(&self) -> &BigUint {
        &self.n
    }

    pub fn y(&self) -> &BigUint {
        &self.y
    }

    /// Bit-length of plaintexts.
    pub fn k(&self) -> usize {
        self.k
    }

    pub fn two_k(&self) -> &BigUint {
        &self.two_k
    }
}

#[derive(Clone)]
pub struct BhjlSecretKey {
    p: BigUint,
    d: BigUint,
    k: usize,
    two_k_minus_1: BigUint,
    p_minus_1_by_two_k: BigUint,
}

impl BhjlSecretKey {
    /// Precomputes the decryption constants from the prime factor `p` of `n`
    /// and the non-residue `y`.
    pub fn new(p: BigUint, y: &BigUint, k: usize) -> Self {
        assert!(k >= 1);
        assert!((&p - 1u32).trailing_zeros() >= Some(k as u64));

        let p_minus_1_by_two_k = (&p - 1u32) >> k;
        let d = mod_inv(&y.modpow(&p_minus_1_by_two_k, &p), &p).expect("y is a unit modulo p");
        Self {
            p,
            d,
            k,
            two_k_minus_1: pow2(k - 1),
            p_minus_1_by_two_k,
        }
    }

    pub fn p(&self) -> &BigUint {
        &self.p
    }

    pub fn d(&self) -> &BigUint {
        &self.d
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn two_k_minus_1(&self) -> &BigUint {
        &self.two_k_minus_1
    }

    pub fn p_minus_1_by_two_k(&self) -> &BigUint {
        &self.p_minus_1_by_two_k
    }
}

impl Debug for BhjlSecretKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("BhjlSecretKey")
            .field("k", &self.k)
            .finish_non_exhaustive()
    }
}

impl Drop for BhjlSecretKey {
    fn drop(&mut self) {
        wipe(&mut self.p);
        wipe(&mut self.d);
        wipe(&mut self.p_minus_1_by_two_k);
    }
}

/// Uniform `x` in `[0, n)` consumed by one encryption.
#[derive(Clone, Debug)]
pub struct BhjlRandomizer(BigUint);

#[derive(Clone, Debug, PartialEq, Eq, Deref, From, Into)]
pub struct BhjlCiphertext(pub(crate) BigUint);

impl BhjlCiphertext {
    /// Encryption of `0` with randomizer `1`, the neutral element of
    /// [`Bhjl::hom_add`].
    pub fn identity() -> Self {
        Self(BigUint::one())
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        encode_be(&self.0)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        let (v, rest) = decode_be(bytes)?;
        if !rest.is_empty() {
            return Err(CodecError::Trailing(rest.len()));
        }
        Ok(Self(v))
    }
}

impl Bhjl {
    pub const DEFAULT_MODULUS_BITS: usize = 2048;
    pub const DEFAULT_MESSAGE_BITS: usize = 128;

    /// Generates an `l`-bit modulus `n = p * q` with `p = 1 mod 2^k` and a
    /// `y` that is a non-residue modulo both `p` and `q`.
    pub fn param_gen(l: usize, k: usize, rng: &mut impl RngCore) -> (BhjlParam, BhjlSecretKey) {
        assert!(l / 2 > k + 1);

        let p = random_two_adic_prime(l / 2, k, rng);
        let q = loop {
            let q = random_prime(l / 2, rng);
            if q != p {
                break q;
            }
        };
        Bhjl::key_from_factors(p, q, k, rng)
    }

    pub fn key_from_factors(
        p: BigUint,
        q: BigUint,
        k: usize,
        rng: &mut impl RngCore,
    ) -> (BhjlParam, BhjlSecretKey) {
        let n = &p * &q;
        let (tries, y) = repeat_with(|| rng.gen_biguint_below(&n))
            .enumerate()
            .find(|(_, y)| is_quadratic_non_residue(y, &p) && is_quadratic_non_residue(y, &q))
            .unwrap();
        debug!("sampled non-residue y after {} candidates", tries + 1);
        let sk = BhjlSecretKey::new(p, &y, k);
        (BhjlParam::new(n, y, k), sk)
    }

    pub fn sample_randomizer(param: &BhjlParam, rng: &mut impl RngCore) -> BhjlRandomizer {
        BhjlRandomizer(rng.gen_biguint_below(param.n()))
    }

    pub fn encrypt(param: &BhjlParam, m: &BigUint, rng: &mut impl RngCore) -> BhjlCiphertext {
        let x = Bhjl::sample_randomizer(param, rng);
        Bhjl::encrypt_with_randomizer(param, m, x)
    }

    pub fn encrypt_with_randomizer(
        param: &BhjlParam,
        m: &BigUint,
        BhjlRandomizer(x): BhjlRandomizer,
    ) -> BhjlCiphertext {
        debug_assert!(m < param.two_k());
        let n = param.n();
        BhjlCiphertext(x.modpow(param.two_k(), n) * param.y().modpow(m, n) % n)
    }

    /// Recovers the plaintext one bit at a time, least significant first,
    /// testing whether the remaining power residue symbol is trivial.
    pub fn decrypt(_: &BhjlParam, sk: &BhjlSecretKey, ct: &BhjlCiphertext) -> BigUint {
        let (p, one) = (sk.p(), BigUint::one());
        let mut c = ct.0.modpow(sk.p_minus_1_by_two_k(), p);
        let mut d = sk.d().clone();
        let mut e = sk.two_k_minus_1().clone();
        let mut m = BigUint::zero();
        for j in 0..sk.k() - 1 {
            if c.modpow(&e, p) != one {
                m |= &one << j;
                c = c * &d % p;
            }
            d = &d * &d % p;
            e >>= 1;
        }
        if c != one {
            m |= &one << (sk.k() - 1);
        }
        m
    }

    pub fn hom_add(param: &BhjlParam, ct0: &BhjlCiphertext, ct1: &BhjlCiphertext) -> BhjlCiphertext {
        BhjlCiphertext(&ct0.0 * &ct1.0 % param.n())
    }

    pub fn hom_sub(param: &BhjlParam, ct0: &BhjlCiphertext, ct1: &BhjlCiphertext) -> BhjlCiphertext {
        let inv = mod_inv(&ct1.0, param.n()).expect("ciphertext is not invertible modulo n");
        BhjlCiphertext(&ct0.0 * inv % param.n())
    }

    pub fn hom_smul(param: &BhjlParam, ct: &BhjlCiphertext, s: &BigUint) -> BhjlCiphertext {
        BhjlCiphertext(ct.0.modpow(s, param.n()))
    }
}
