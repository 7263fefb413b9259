use derive_more::{Display, From, Into};

pub const SK_SIZE: usize = 16;
pub const LABEL_SIZE: usize = 16;
pub const NONCE_SIZE: usize = 16;

const PRF_CONTEXT: &str = "labhe-bhjl 2024-01-01 label prf";

/// Keyed PRF `F(key, label) -> nonce`, instantiated with the BLAKE3 XOF in
/// key derivation mode absorbing the key then the label.
pub fn prf(key: &[u8; SK_SIZE], label: &[u8; LABEL_SIZE]) -> [u8; NONCE_SIZE] {
    let mut hasher = blake3::Hasher::new_derive_key(PRF_CONTEXT);
    hasher.update(key);
    hasher.update(label);
    let mut nonce = [0; NONCE_SIZE];
    hasher.finalize_xof().fill(&mut nonce);
    nonce
}

/// Position of a message in a sender's stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, From, Into)]
pub struct Label(u32);

impl Label {
    pub fn new(v: u32) -> Self {
        Self(v)
    }

    pub fn offset(self, i: usize) -> Self {
        match u32::try_from(i).ok().and_then(|i| self.0.checked_add(i)) {
            Some(v) => Self(v),
            None => panic!("label counter overflow: {} + {i}", self.0),
        }
    }

    /// The `count` consecutive labels starting at `self`.
    pub fn range(self, count: usize) -> impl Iterator<Item = Label> + Clone {
        (0..count).map(move |i| self.offset(i))
    }

    /// Little-endian counter in the first 4 bytes, the rest zero.
    pub fn to_bytes(self) -> [u8; LABEL_SIZE] {
        let mut bytes = [0; LABEL_SIZE];
        bytes[..4].copy_from_slice(&self.0.to_le_bytes());
        bytes
    }
}

#[cfg(test)]
mod test {
    use crate::prf::{prf, Label, SK_SIZE};
    use itertools::Itertools;
    use rand::{thread_rng, RngCore};

    #[test]
    fn label_encoding() {
        assert_eq!(Label::new(0).to_bytes(), [0; 16]);
        assert_eq!(
            Label::new(0x0403_0201).to_bytes(),
            [1, 2, 3, 4, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0]
        );
        assert_eq!(
            Label::new(1000).range(3).collect_vec(),
            [1000, 1001, 1002].map(Label::new)
        );
    }

    #[test]
    #[should_panic]
    fn label_overflow() {
        Label::new(u32::MAX).offset(1);
    }

    #[test]
    fn deterministic() {
        let mut key = [0; SK_SIZE];
        thread_rng().fill_bytes(&mut key);
        for label in Label::new(0).range(32) {
            assert_eq!(prf(&key, &label.to_bytes()), prf(&key, &label.to_bytes()));
        }
    }

    #[test]
    fn distinct_outputs() {
        let mut keys = [[0; SK_SIZE]; 2];
        keys.iter_mut().for_each(|key| thread_rng().fill_bytes(key));
        let nonces = keys
            .iter()
            .cartesian_product(Label::new(0).range(64))
            .map(|(key, label)| prf(key, &label.to_bytes()))
            .collect_vec();
        assert!(nonces.iter().all_unique());
    }
}
