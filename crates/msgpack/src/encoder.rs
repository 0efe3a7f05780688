//! `MsgPackEncoder` — canonical MessagePack encoder.

use bytepack_buffers::Writer;

use super::constants::*;
use crate::extension::Extension;
use crate::value::Value;

/// MessagePack encoder.
///
/// Always emits the smallest wire representation for a value: integers use
/// the fixint/int8..64/uint8..64 families, strings the fixstr/str8/16/32
/// family, and so on. Non-negative integers take the uint family.
///
/// Encoding never fails; the output buffer grows as needed. The size-limited
/// path lives in [`crate::serialize_safe`], which measures the value with
/// [`crate::encoded_size`] before any buffering happens.
pub struct MsgPackEncoder {
    pub writer: Writer,
}

impl Default for MsgPackEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgPackEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    pub fn with_writer(writer: Writer) -> Self {
        Self { writer }
    }

    /// Encode a value and return the MessagePack bytes.
    pub fn encode(&mut self, value: &Value) -> Vec<u8> {
        self.writer.reset();
        self.write_any(value);
        self.writer.flush()
    }

    /// Encode a `serde_json::Value` directly.
    pub fn encode_json(&mut self, value: &serde_json::Value) -> Vec<u8> {
        self.encode(&Value::from(value.clone()))
    }

    pub fn write_any(&mut self, value: &Value) {
        match value {
            Value::Null => self.write_null(),
            Value::Bool(b) => self.write_boolean(*b),
            Value::Int(i) => self.write_integer(*i),
            Value::UInt(u) => self.write_u_integer(*u),
            Value::Float(f) => self.write_float(*f),
            Value::Str(s) => self.write_str(s),
            Value::Bin(b) => self.write_bin(b),
            Value::Array(arr) => self.write_arr(arr),
            Value::Map(pairs) => self.write_map(pairs),
            Value::Ext(ext) => self.write_ext(ext),
        }
    }

    pub fn write_null(&mut self) {
        self.writer.u8(NIL);
    }

    pub fn write_boolean(&mut self, b: bool) {
        self.writer.u8(if b { TRUE } else { FALSE });
    }

    pub fn write_integer(&mut self, int: i64) {
        if int >= 0 {
            self.write_u_integer(int as u64);
            return;
        }
        let w = &mut self.writer;
        w.ensure_capacity(9);
        let x = w.x;
        if int >= -32 {
            // negative fixint
            w.uint8[x] = int as u8;
            w.x = x + 1;
        } else if int >= i8::MIN as i64 {
            w.uint8[x] = INT8;
            w.uint8[x + 1] = int as u8;
            w.x = x + 2;
        } else if int >= i16::MIN as i64 {
            w.uint8[x] = INT16;
            let b = (int as i16).to_be_bytes();
            w.uint8[x + 1..x + 3].copy_from_slice(&b);
            w.x = x + 3;
        } else if int >= i32::MIN as i64 {
            w.uint8[x] = INT32;
            let b = (int as i32).to_be_bytes();
            w.uint8[x + 1..x + 5].copy_from_slice(&b);
            w.x = x + 5;
        } else {
            w.uint8[x] = INT64;
            let b = int.to_be_bytes();
            w.uint8[x + 1..x + 9].copy_from_slice(&b);
            w.x = x + 9;
        }
    }

    pub fn write_u_integer(&mut self, uint: u64) {
        let w = &mut self.writer;
        w.ensure_capacity(9);
        let x = w.x;
        if uint <= 0x7f {
            // positive fixint
            w.uint8[x] = uint as u8;
            w.x = x + 1;
        } else if uint <= 0xff {
            w.uint8[x] = UINT8;
            w.uint8[x + 1] = uint as u8;
            w.x = x + 2;
        } else if uint <= 0xffff {
            w.uint8[x] = UINT16;
            let b = (uint as u16).to_be_bytes();
            w.uint8[x + 1..x + 3].copy_from_slice(&b);
            w.x = x + 3;
        } else if uint <= 0xffff_ffff {
            w.uint8[x] = UINT32;
            let b = (uint as u32).to_be_bytes();
            w.uint8[x + 1..x + 5].copy_from_slice(&b);
            w.x = x + 5;
        } else {
            w.uint8[x] = UINT64;
            let b = uint.to_be_bytes();
            w.uint8[x + 1..x + 9].copy_from_slice(&b);
            w.x = x + 9;
        }
    }

    pub fn write_float(&mut self, float: f64) {
        self.writer.u8f64(FLOAT64, float);
    }

    pub fn write_str(&mut self, s: &str) {
        self.write_str_hdr(s.len());
        self.writer.utf8(s);
    }

    pub fn write_str_hdr(&mut self, length: usize) {
        let w = &mut self.writer;
        if length <= 0x1f {
            w.u8(OVERLAY_FIXSTR | length as u8);
        } else if length <= 0xff {
            w.u8u8(STR8, length as u8);
        } else if length <= 0xffff {
            w.u8u16(STR16, length as u16);
        } else {
            w.u8u32(STR32, length as u32);
        }
    }

    pub fn write_bin(&mut self, buf: &[u8]) {
        self.write_bin_hdr(buf.len());
        self.writer.buf(buf);
    }

    pub fn write_bin_hdr(&mut self, length: usize) {
        let w = &mut self.writer;
        if length <= 0xff {
            w.u8u8(BIN8, length as u8);
        } else if length <= 0xffff {
            w.u8u16(BIN16, length as u16);
        } else {
            w.u8u32(BIN32, length as u32);
        }
    }

    pub fn write_arr(&mut self, arr: &[Value]) {
        self.write_arr_hdr(arr.len());
        for item in arr {
            self.write_any(item);
        }
    }

    pub fn write_arr_hdr(&mut self, length: usize) {
        let w = &mut self.writer;
        if length <= 0x0f {
            w.u8(OVERLAY_FIXARR | length as u8);
        } else if length <= 0xffff {
            w.u8u16(ARR16, length as u16);
        } else {
            w.u8u32(ARR32, length as u32);
        }
    }

    pub fn write_map(&mut self, pairs: &[(Value, Value)]) {
        self.write_map_hdr(pairs.len());
        for (key, value) in pairs {
            self.write_any(key);
            self.write_any(value);
        }
    }

    pub fn write_map_hdr(&mut self, length: usize) {
        let w = &mut self.writer;
        if length <= 0x0f {
            w.u8(OVERLAY_FIXMAP | length as u8);
        } else if length <= 0xffff {
            w.u8u16(MAP16, length as u16);
        } else {
            w.u8u32(MAP32, length as u32);
        }
    }

    pub fn write_ext(&mut self, ext: &Extension) {
        self.write_ext_hdr(ext.data.len());
        self.writer.u8(ext.tag as u8);
        self.writer.buf(&ext.data);
    }

    pub fn write_ext_hdr(&mut self, length: usize) {
        let w = &mut self.writer;
        match length {
            1 => w.u8(FIXEXT1),
            2 => w.u8(FIXEXT2),
            4 => w.u8(FIXEXT4),
            8 => w.u8(FIXEXT8),
            16 => w.u8(FIXEXT16),
            _ if length <= 0xff => w.u8u8(EXT8, length as u8),
            _ if length <= 0xffff => w.u8u16(EXT16, length as u16),
            _ => w.u8u32(EXT32, length as u32),
        }
    }
}
