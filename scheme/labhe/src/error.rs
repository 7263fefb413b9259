use thiserror::Error;
use util::CodecError;

#[derive(Debug, Error)]
pub enum LabheError {
    #[error("recovered sender secret key is malformed: {0}")]
    KeyRecovery(#[from] CodecError),

    #[error("entropy source unavailable: {0}")]
    Entropy(#[from] rand::Error),
}

pub type Result<T> = core::result::Result<T, LabheError>;
