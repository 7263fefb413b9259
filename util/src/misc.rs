use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};

pub fn pow2(k: usize) -> BigUint {
    BigUint::one() << k
}

/// Keeps the low `k` bits of `v`.
pub fn mod_pow2(v: &BigUint, k: usize) -> BigUint {
    v & &(pow2(k) - 1u32)
}

pub fn mod_inv(v: &BigUint, q: &BigUint) -> Option<BigUint> {
    let (v, q) = (BigInt::from(v.clone()), BigInt::from(q.clone()));
    let egcd = v.extended_gcd(&q);
    if !egcd.gcd.is_one() {
        return None;
    }
    egcd.x.mod_floor(&q).to_biguint()
}

/// Overwrites the limbs of `v` with zeros in place. Best effort: copies made
/// earlier by arithmetic are not reached.
pub fn wipe(v: &mut BigUint) {
    let len = v.iter_u32_digits().len();
    v.assign_from_slice(&vec![0; len]);
    debug_assert!(v.is_zero());
}

#[macro_export]
macro_rules! izip_eq {
    (@closure $p:pat => $tup:expr) => {
        |$p| $tup
    };
    (@closure $p:pat => ($($tup:tt)*) , $_iter:expr $(, $tail:expr)*) => {
        $crate::izip_eq!(@closure ($p, b) => ($($tup)*, b) $(, $tail)*)
    };
    ($first:expr $(,)*) => {
        itertools::__std_iter::IntoIterator::into_iter($first)
    };
    ($first:expr, $second:expr $(,)*) => {
        itertools::Itertools::zip_eq($crate::izip_eq!($first), $second)
    };
    ($first:expr $(, $rest:expr)* $(,)*) => {{
        let t = $crate::izip_eq!($first);
        $(let t = $crate::izip_eq!(t, $rest);)*
        t.map($crate::izip_eq!(@closure a => (a) $(, $rest)*))
    }};
}

#[cfg(test)]
mod test {
    use crate::misc::{mod_inv, mod_pow2, pow2, wipe};
    use num_bigint::{BigUint, RandBigInt};
    use num_traits::{One, Zero};
    use rand::thread_rng;

    #[test]
    fn reduce_mod_pow2() {
        let mut rng = thread_rng();
        for k in [1, 7, 64, 128, 200] {
            let v = rng.gen_biguint(300);
            assert_eq!(mod_pow2(&v, k), &v % pow2(k));
        }
    }

    #[test]
    fn inverse() {
        let mut rng = thread_rng();
        let q = BigUint::from(1_000_000_007u64);
        for _ in 0..100 {
            let v = rng.gen_biguint_below(&q);
            if v.is_zero() {
                assert_eq!(mod_inv(&v, &q), None);
                continue;
            }
            let inv = mod_inv(&v, &q).unwrap();
            assert!((v * inv % &q).is_one());
        }
        assert_eq!(mod_inv(&BigUint::from(6u32), &BigUint::from(9u32)), None);
    }

    #[test]
    fn wipe_limbs() {
        let mut v = thread_rng().gen_biguint(1024);
        wipe(&mut v);
        assert!(v.is_zero());
    }
}
