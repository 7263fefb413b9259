mod bytes;
mod misc;
mod prf;
mod prime;

pub use bytes::{decode_be, encode_be, from_be, to_fixed_be, CodecError};
pub use misc::{mod_inv, mod_pow2, pow2, wipe};
pub use num_bigint::{BigInt, BigUint, RandBigInt};
pub use prf::{prf, Label, LABEL_SIZE, NONCE_SIZE, SK_SIZE};
pub use prime::{is_quadratic_non_residue, probably_prime, random_prime, random_two_adic_prime};
