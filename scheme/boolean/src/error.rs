use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },
    #[error("key generation failed at {stage}: {reason}")]
    KeyGenerationFailure { stage: &'static str, reason: String },
    #[error("deserialization failed: {0}")]
    Deserialization(#[from] DeserializationError),
    #[error("serialization failed: {0}")]
    Serialization(String),
    #[error("entropy source failed: {0}")]
    Entropy(String),
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
}

/// Reasons a buffer is rejected, nothing is constructed in any of these cases.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DeserializationError {
    #[error("buffer is truncated")]
    Truncated,
    #[error("bad magic bytes")]
    BadMagic,
    #[error("unsupported format version {0}")]
    UnsupportedVersion(u16),
    #[error("unexpected object kind, expected {expected}, found {found}")]
    UnexpectedKind { expected: u8, found: u8 },
    #[error("size mismatch in `{field}`: expected {expected}, found {found}")]
    SizeMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("malformed body: {0}")]
    Malformed(String),
    #[error("trailing bytes after body")]
    TrailingBytes,
}

pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid_parameter(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn key_generation(stage: &'static str, err: impl ToString) -> Self {
        Self::KeyGenerationFailure {
            stage,
            reason: err.to_string(),
        }
    }
}
