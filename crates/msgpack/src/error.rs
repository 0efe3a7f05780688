//! Encoder and decoder error types.

use bytepack_buffers::BufferError;
use thiserror::Error;

/// Serialization failure.
///
/// Recoverable; the value is left untouched and nothing has been written.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("serialize buffer overflow: encoded size {size} exceeds limit {limit}")]
    BufferOverflow { size: usize, limit: usize },
}

/// Deserialization failure.
///
/// Returned for any input that is not well-formed MessagePack. Recoverable;
/// the decoder never panics on malformed input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid MessagePack byte 0x{0:02x} at offset {1}")]
    InvalidByte(u8, usize),
    #[error("invalid UTF-8 in string")]
    InvalidUtf8,
    #[error("nesting depth limit exceeded")]
    DepthLimit,
    #[error("{0} trailing byte(s) after value")]
    TrailingBytes(usize),
}

impl From<BufferError> for DecodeError {
    fn from(err: BufferError) -> Self {
        match err {
            BufferError::EndOfBuffer => DecodeError::UnexpectedEof,
            BufferError::InvalidUtf8 => DecodeError::InvalidUtf8,
        }
    }
}
