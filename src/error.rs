use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("Access of {len} bytes at offset {offset} exceeds buffer capacity {capacity}")]
    OutOfBounds {
        offset: usize,
        len: usize,
        capacity: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error(transparent)]
    OutOfBounds(#[from] BufferError),

    #[error(
        "Back-reference distance {distance} underflows hunk {hunk} (only {produced} bytes produced)"
    )]
    BackReferenceUnderflow {
        hunk: usize,
        distance: u16,
        produced: usize,
    },

    #[error("Decoded image holds {actual} bytes, expected {expected}")]
    ImageSizeMismatch { expected: u64, actual: u64 },
}
