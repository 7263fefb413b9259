//! Implementation of labeled homomorphic encryption from
//! [\[BCF17\]](https://eprint.iacr.org/2017/326.pdf) instantiated over the
//! [`bhjl`] cryptosystem.
//!
//! Senders derive per-label masks from a PRF keyed by their own secret, so the
//! expensive part of encryption happens offline and the online part is a
//! single addition modulo `2^k`. An evaluator can multiply two level-0
//! ciphertexts once and then add, subtract and scale the level-1 results. The
//! decryptor recovers sender keys from their public keys and reconstructs the
//! mask of the evaluated function offline.

pub mod error;
pub mod labhe;

pub use error::{LabheError, Result};
