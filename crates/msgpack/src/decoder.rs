//! `MsgPackDecoder` — total MessagePack decoder.

use bytepack_buffers::Reader;

use super::constants::*;
use crate::error::DecodeError;
use crate::extension::Extension;
use crate::value::Value;

/// MessagePack decoder.
///
/// Total over arbitrary input: any byte string that is not well-formed
/// MessagePack yields a [`DecodeError`], never a panic. Length headers are
/// validated against the remaining input before payloads are allocated, so
/// a forged `bin32`/`str32` header cannot trigger a huge allocation, and
/// nesting is bounded by `max_depth` so a nested-container bomb cannot
/// exhaust the stack.
pub struct MsgPackDecoder {
    max_depth: usize,
}

impl Default for MsgPackDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgPackDecoder {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Decode the first value in `bytes`. Trailing bytes are ignored.
    pub fn decode(&self, bytes: &[u8]) -> Result<Value, DecodeError> {
        let (value, _) = self.decode_with_consumed(bytes)?;
        Ok(value)
    }

    /// Decode one value and require it to span the whole input.
    pub fn decode_exact(&self, bytes: &[u8]) -> Result<Value, DecodeError> {
        let (value, consumed) = self.decode_with_consumed(bytes)?;
        if consumed < bytes.len() {
            return Err(DecodeError::TrailingBytes(bytes.len() - consumed));
        }
        Ok(value)
    }

    /// Decode one value and report how many input bytes it spanned.
    pub fn decode_with_consumed(&self, bytes: &[u8]) -> Result<(Value, usize), DecodeError> {
        let mut reader = Reader::new(bytes);
        let value = self.read_any(&mut reader, 0)?;
        Ok((value, reader.x))
    }

    fn read_any(&self, r: &mut Reader<'_>, depth: usize) -> Result<Value, DecodeError> {
        if depth >= self.max_depth {
            return Err(DecodeError::DepthLimit);
        }
        let offset = r.x;
        let byte = r.u8()?;
        match byte {
            0x00..=0x7f => Ok(Value::Int(byte as i64)),
            0x80..=0x8f => self.read_map(r, (byte & 0x0f) as usize, depth),
            0x90..=0x9f => self.read_arr(r, (byte & 0x0f) as usize, depth),
            0xa0..=0xbf => read_str(r, (byte & 0x1f) as usize),
            NIL => Ok(Value::Null),
            RESERVED => Err(DecodeError::InvalidByte(byte, offset)),
            FALSE => Ok(Value::Bool(false)),
            TRUE => Ok(Value::Bool(true)),
            BIN8 => {
                let len = r.u8()? as usize;
                read_bin(r, len)
            }
            BIN16 => {
                let len = r.u16()? as usize;
                read_bin(r, len)
            }
            BIN32 => {
                let len = r.u32()? as usize;
                read_bin(r, len)
            }
            EXT8 => {
                let len = r.u8()? as usize;
                read_ext(r, len)
            }
            EXT16 => {
                let len = r.u16()? as usize;
                read_ext(r, len)
            }
            EXT32 => {
                let len = r.u32()? as usize;
                read_ext(r, len)
            }
            FLOAT32 => Ok(Value::Float(r.f32()? as f64)),
            FLOAT64 => Ok(Value::Float(r.f64()?)),
            UINT8 => Ok(Value::Int(r.u8()? as i64)),
            UINT16 => Ok(Value::Int(r.u16()? as i64)),
            UINT32 => Ok(Value::Int(r.u32()? as i64)),
            UINT64 => {
                let u = r.u64()?;
                if u <= i64::MAX as u64 {
                    Ok(Value::Int(u as i64))
                } else {
                    Ok(Value::UInt(u))
                }
            }
            INT8 => Ok(Value::Int(r.i8()? as i64)),
            INT16 => Ok(Value::Int(r.i16()? as i64)),
            INT32 => Ok(Value::Int(r.i32()? as i64)),
            INT64 => Ok(Value::Int(r.i64()?)),
            FIXEXT1 => read_ext(r, 1),
            FIXEXT2 => read_ext(r, 2),
            FIXEXT4 => read_ext(r, 4),
            FIXEXT8 => read_ext(r, 8),
            FIXEXT16 => read_ext(r, 16),
            STR8 => {
                let len = r.u8()? as usize;
                read_str(r, len)
            }
            STR16 => {
                let len = r.u16()? as usize;
                read_str(r, len)
            }
            STR32 => {
                let len = r.u32()? as usize;
                read_str(r, len)
            }
            ARR16 => {
                let len = r.u16()? as usize;
                self.read_arr(r, len, depth)
            }
            ARR32 => {
                let len = r.u32()? as usize;
                self.read_arr(r, len, depth)
            }
            MAP16 => {
                let len = r.u16()? as usize;
                self.read_map(r, len, depth)
            }
            MAP32 => {
                let len = r.u32()? as usize;
                self.read_map(r, len, depth)
            }
            // 0xe0..=0xff: negative fixint
            _ => Ok(Value::Int(byte as i8 as i64)),
        }
    }

    fn read_arr(
        &self,
        r: &mut Reader<'_>,
        length: usize,
        depth: usize,
    ) -> Result<Value, DecodeError> {
        // Each element takes at least one input byte, so a forged count
        // cannot reserve more than the remaining input.
        let mut items = Vec::with_capacity(length.min(r.size()));
        for _ in 0..length {
            items.push(self.read_any(r, depth + 1)?);
        }
        Ok(Value::Array(items))
    }

    fn read_map(
        &self,
        r: &mut Reader<'_>,
        length: usize,
        depth: usize,
    ) -> Result<Value, DecodeError> {
        let mut pairs = Vec::with_capacity(length.min(r.size() / 2));
        for _ in 0..length {
            let key = self.read_any(r, depth + 1)?;
            let value = self.read_any(r, depth + 1)?;
            pairs.push((key, value));
        }
        Ok(Value::Map(pairs))
    }
}

fn read_str(r: &mut Reader<'_>, length: usize) -> Result<Value, DecodeError> {
    Ok(Value::Str(r.utf8(length)?.to_owned()))
}

fn read_bin(r: &mut Reader<'_>, length: usize) -> Result<Value, DecodeError> {
    Ok(Value::Bin(r.buf(length)?.to_vec()))
}

fn read_ext(r: &mut Reader<'_>, length: usize) -> Result<Value, DecodeError> {
    let tag = r.i8()?;
    let data = r.buf(length)?.to_vec();
    Ok(Value::Ext(Extension::new(tag, data)))
}
