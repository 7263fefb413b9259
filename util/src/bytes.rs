use num_bigint::BigUint;
use thiserror::Error;

const LEN_PREFIX: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("input truncated: expected {expected} bytes, found {actual}")]
    Truncated { expected: usize, actual: usize },
    #[error("value needs {actual} bytes, exceeding the fixed width of {expected}")]
    TooLong { expected: usize, actual: usize },
    #[error("{0} unexpected trailing bytes")]
    Trailing(usize),
}

pub fn from_be(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Big-endian encoding of `v` left-padded with zeros to exactly `N` bytes.
pub fn to_fixed_be<const N: usize>(v: &BigUint) -> Result<[u8; N], CodecError> {
    let minimal = v.to_bytes_be();
    if minimal.len() > N {
        return Err(CodecError::TooLong {
            expected: N,
            actual: minimal.len(),
        });
    }
    let mut bytes = [0; N];
    bytes[N - minimal.len()..].copy_from_slice(&minimal);
    Ok(bytes)
}

/// Length-prefixed big-endian encoding, the prefix is a big-endian `u32`.
pub fn encode_be(v: &BigUint) -> Vec<u8> {
    let magnitude = v.to_bytes_be();
    let mut bytes = Vec::with_capacity(LEN_PREFIX + magnitude.len());
    bytes.extend((magnitude.len() as u32).to_be_bytes());
    bytes.extend(magnitude);
    bytes
}

/// Inverse of [`encode_be`], returns the decoded value and the unread input.
pub fn decode_be(bytes: &[u8]) -> Result<(BigUint, &[u8]), CodecError> {
    let truncated = |expected| CodecError::Truncated {
        expected,
        actual: bytes.len(),
    };
    let (prefix, rest) = bytes
        .split_first_chunk::<LEN_PREFIX>()
        .ok_or_else(|| truncated(LEN_PREFIX))?;
    let len = u32::from_be_bytes(*prefix) as usize;
    if rest.len() < len {
        return Err(truncated(LEN_PREFIX + len));
    }
    let (magnitude, rest) = rest.split_at(len);
    Ok((from_be(magnitude), rest))
}
