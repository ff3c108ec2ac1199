//! Decoding errors.

use thiserror::Error;

/// Errors produced while decoding a fixed-size `UserAssist` blob.
///
/// None of these are fatal to a run: the dispatcher turns them into skip notices.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The blob length does not match the layout being decoded.
    #[error("expected {expected} bytes, got {actual}")]
    Length { expected: usize, actual: usize },

    /// The blob length matches none of the known value layouts.
    #[error("unrecognized value length: {0} bytes")]
    UnrecognizedLength(usize),

    /// A field extends past the end of the blob.
    #[error("field {field} out of bounds at offset {offset}")]
    Truncated { field: &'static str, offset: usize },
}
