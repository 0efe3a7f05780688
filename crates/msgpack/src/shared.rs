//! Convenience wrappers — the serialize/deserialize entry points.

use crate::constants::DEFAULT_SIZE_LIMIT;
use crate::decoder::MsgPackDecoder;
use crate::encoder::MsgPackEncoder;
use crate::error::{DecodeError, EncodeError};
use crate::size::encoded_size;
use crate::value::Value;

/// Branded MessagePack byte payload alias.
pub type MsgPack = Vec<u8>;

/// Encode a [`Value`] into MessagePack bytes.
///
/// No size cap: the output grows to whatever the value needs. Use
/// [`serialize_safe`] when oversized inputs must be rejected instead.
pub fn serialize(value: &Value) -> MsgPack {
    let mut encoder = MsgPackEncoder::new();
    encoder.encode(value)
}

/// Encode a [`Value`], rejecting values whose encoded size exceeds
/// [`DEFAULT_SIZE_LIMIT`].
///
/// The size check runs before any output is buffered, so an over-limit
/// value costs a traversal rather than a failed allocation.
pub fn serialize_safe(value: &Value) -> Result<MsgPack, EncodeError> {
    serialize_safe_with_limit(value, DEFAULT_SIZE_LIMIT)
}

/// [`serialize_safe`] with an explicit size limit in bytes.
pub fn serialize_safe_with_limit(value: &Value, limit: usize) -> Result<MsgPack, EncodeError> {
    let size = encoded_size(value);
    if size > limit {
        return Err(EncodeError::BufferOverflow { size, limit });
    }
    let mut encoder = MsgPackEncoder::new();
    Ok(encoder.encode(value))
}

/// Decode the first MessagePack value in `bytes`, ignoring trailing bytes.
pub fn deserialize(bytes: &[u8]) -> Result<Value, DecodeError> {
    MsgPackDecoder::new().decode(bytes)
}

/// Decode `bytes` as exactly one MessagePack value.
///
/// Fails on any malformed input, including well-formed values followed by
/// trailing bytes.
pub fn deserialize_safe(bytes: &[u8]) -> Result<Value, DecodeError> {
    MsgPackDecoder::new().decode_exact(bytes)
}
