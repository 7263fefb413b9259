use core::iter::repeat_with;
use log::debug;
use num_bigint::{BigUint, RandBigInt};
use num_traits::One;
use rand::RngCore;

const MILLER_RABIN_REPS: usize = 20;

pub fn probably_prime(candidate: &BigUint, reps: usize) -> bool {
    let candidate = num_bigint_dig::BigUint::from_bytes_be(&candidate.to_bytes_be());
    num_bigint_dig::prime::probably_prime(&candidate, reps)
}

/// Samples a `bits`-bit prime with the top bit set.
pub fn random_prime(bits: usize, rng: &mut impl RngCore) -> BigUint {
    assert!(bits > 1);
    let top = BigUint::one() << (bits - 1);
    let candidates = repeat_with(|| rng.gen_biguint(bits as u64 - 1) | &top | BigUint::one());
    first_prime(bits, candidates)
}

/// Samples a `bits`-bit prime `p` with `p = 1 mod 2^log_n`.
pub fn random_two_adic_prime(bits: usize, log_n: usize, rng: &mut impl RngCore) -> BigUint {
    assert!(bits > log_n + 1);
    let t_bits = bits - log_n;
    let top = BigUint::one() << (t_bits - 1);
    let candidates = repeat_with(|| {
        let t = rng.gen_biguint(t_bits as u64 - 1) | &top;
        (t << log_n) + 1u32
    });
    first_prime(bits, candidates)
}

fn first_prime(bits: usize, candidates: impl IntoIterator<Item = BigUint>) -> BigUint {
    let (tries, prime) = candidates
        .into_iter()
        .enumerate()
        .find(|(_, candidate)| probably_prime(candidate, MILLER_RABIN_REPS))
        .unwrap();
    debug!("sampled {bits}-bit prime after {} candidates", tries + 1);
    prime
}

/// Euler's criterion, `p` must be an odd prime.
pub fn is_quadratic_non_residue(v: &BigUint, p: &BigUint) -> bool {
    let order = p - 1u32;
    v.modpow(&(&order >> 1), p) == order
}
