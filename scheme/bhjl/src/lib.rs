//! Implementation of the Joye-Libert cryptosystem from
//! [\[JL13\]](https://eprint.iacr.org/2013/435.pdf) with the parameters and
//! precomputed decryption of [\[BHJL17\]](https://doi.org/10.1007/s00145-016-9229-5).

pub mod bhjl;
