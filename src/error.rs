//! The error taxonomy for the sbro codec.
//!
//! Every failure a caller can observe from `compress` or `decompress` is one
//! of these variants. All of them are fatal to the current call; the codec
//! never retries internally and never returns partial output.

use thiserror::Error;

/// Everything that can go wrong while packing or unpacking an sbro container.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SbroError {
    /// The first four bytes of the container are not `SBRO`.
    #[error("not an sbro container (bad magic)")]
    BadMagic,

    /// The container version byte is not 1.
    #[error("unsupported container version {0}")]
    UnsupportedVersion(u8),

    /// The input ends before the fixed header and code-length tables do.
    #[error("container header is truncated")]
    TruncatedHeader,

    /// The bitstream ran out of bits before decoding completed.
    #[error("bitstream ended before decoding completed")]
    EndOfStream,

    /// The bitstream decoded to something the format does not allow.
    #[error("corrupt bitstream: {0}")]
    CorruptStream(&'static str),

    /// Decoding terminated with fewer bytes than the header declared.
    #[error("decoded {actual} bytes but the header declared {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    /// The encoder's own reconstruction disagreed with its input. Never
    /// observable from a valid input.
    #[error("encoder self-check failed: {0}")]
    InternalError(&'static str),
}
