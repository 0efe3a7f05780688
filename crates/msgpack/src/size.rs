//! Exact encoded-size computation.

use crate::value::Value;

/// Returns the exact number of bytes [`crate::MsgPackEncoder`] produces for
/// `value`, without allocating an output buffer.
///
/// The safe serialize path uses this to reject oversized values before any
/// buffering happens, so an over-limit input costs a traversal, not an
/// allocation. Must stay in lockstep with the encoder's format selection.
pub fn encoded_size(value: &Value) -> usize {
    match value {
        Value::Null | Value::Bool(_) => 1,
        Value::Int(i) => int_size(*i),
        Value::UInt(u) => uint_size(*u),
        Value::Float(_) => 9,
        Value::Str(s) => str_hdr_size(s.len()) + s.len(),
        Value::Bin(b) => bin_hdr_size(b.len()) + b.len(),
        Value::Array(arr) => {
            arr_hdr_size(arr.len()) + arr.iter().map(encoded_size).sum::<usize>()
        }
        Value::Map(pairs) => {
            map_hdr_size(pairs.len())
                + pairs
                    .iter()
                    .map(|(k, v)| encoded_size(k) + encoded_size(v))
                    .sum::<usize>()
        }
        Value::Ext(ext) => ext_hdr_size(ext.data.len()) + 1 + ext.data.len(),
    }
}

fn int_size(int: i64) -> usize {
    if int >= 0 {
        return uint_size(int as u64);
    }
    if int >= -32 {
        1
    } else if int >= i8::MIN as i64 {
        2
    } else if int >= i16::MIN as i64 {
        3
    } else if int >= i32::MIN as i64 {
        5
    } else {
        9
    }
}

fn uint_size(uint: u64) -> usize {
    if uint <= 0x7f {
        1
    } else if uint <= 0xff {
        2
    } else if uint <= 0xffff {
        3
    } else if uint <= 0xffff_ffff {
        5
    } else {
        9
    }
}

fn str_hdr_size(length: usize) -> usize {
    if length <= 0x1f {
        1
    } else if length <= 0xff {
        2
    } else if length <= 0xffff {
        3
    } else {
        5
    }
}

fn bin_hdr_size(length: usize) -> usize {
    if length <= 0xff {
        2
    } else if length <= 0xffff {
        3
    } else {
        5
    }
}

fn arr_hdr_size(length: usize) -> usize {
    if length <= 0x0f {
        1
    } else if length <= 0xffff {
        3
    } else {
        5
    }
}

fn map_hdr_size(length: usize) -> usize {
    arr_hdr_size(length)
}

fn ext_hdr_size(length: usize) -> usize {
    match length {
        1 | 2 | 4 | 8 | 16 => 1,
        _ if length <= 0xff => 2,
        _ if length <= 0xffff => 3,
        _ => 5,
    }
}
