//! MessagePack encoding/decoding for bytepack.
//!
//! The crate exposes two surfaces:
//!
//! - Codec types ([`MsgPackEncoder`], [`MsgPackEncoderStable`],
//!   [`MsgPackDecoder`], [`MsgPackToJsonConverter`]) for callers that reuse
//!   buffers or need configuration.
//! - Free-function entry points ([`serialize`], [`serialize_safe`],
//!   [`deserialize`], [`deserialize_safe`]) for one-shot use.
//!
//! The `_safe` variants carry the error contract the rest of the workspace
//! is built around: any malformed input to deserialization and any
//! over-limit input to serialization surfaces as a recoverable error with a
//! human-readable message, never a panic, a bad allocation, or a silently
//! wrong value.
//!
//! ```
//! use bytepack_msgpack::{deserialize_safe, serialize_safe, Value};
//!
//! let bytes = serialize_safe(&Value::Str("hello".into())).unwrap();
//! assert_eq!(deserialize_safe(&bytes).unwrap(), Value::Str("hello".into()));
//!
//! // Not a single well-formed MessagePack value:
//! let err = deserialize_safe(b"asdfasfdasdfsafd").unwrap_err();
//! assert!(!err.to_string().is_empty());
//! ```

mod constants;
mod convert;
mod decoder;
mod encoder;
mod encoder_stable;
mod error;
mod extension;
mod shared;
mod size;
mod value;

pub use constants::{DEFAULT_MAX_DEPTH, DEFAULT_SIZE_LIMIT};
pub use convert::{value_to_json, MsgPackToJsonConverter};
pub use decoder::MsgPackDecoder;
pub use encoder::MsgPackEncoder;
pub use encoder_stable::MsgPackEncoderStable;
pub use error::{DecodeError, EncodeError};
pub use extension::Extension;
pub use shared::{
    deserialize, deserialize_safe, serialize, serialize_safe, serialize_safe_with_limit, MsgPack,
};
pub use size::encoded_size;
pub use value::Value;

#[cfg(test)]
mod tests {
    use super::*;

    // --- Encoder format selection ---

    #[test]
    fn encoder_primitives() {
        let mut enc = MsgPackEncoder::new();
        assert_eq!(enc.encode(&Value::Null), &[0xc0]);
        assert_eq!(enc.encode(&Value::Bool(true)), &[0xc3]);
        assert_eq!(enc.encode(&Value::Bool(false)), &[0xc2]);
        // positive fixint
        assert_eq!(enc.encode(&Value::Int(0)), &[0x00]);
        assert_eq!(enc.encode(&Value::Int(127)), &[0x7f]);
        // negative fixint
        assert_eq!(enc.encode(&Value::Int(-1)), &[0xff]);
        assert_eq!(enc.encode(&Value::Int(-32)), &[0xe0]);
    }

    #[test]
    fn encoder_int_families() {
        let mut enc = MsgPackEncoder::new();
        assert_eq!(enc.encode(&Value::Int(128)), &[0xcc, 0x80]);
        assert_eq!(enc.encode(&Value::Int(256)), &[0xcd, 0x01, 0x00]);
        assert_eq!(enc.encode(&Value::Int(65536))[0], 0xce);
        assert_eq!(enc.encode(&Value::Int(1 << 32))[0], 0xcf);
        assert_eq!(enc.encode(&Value::Int(-33)), &[0xd0, 0xdf]);
        assert_eq!(enc.encode(&Value::Int(-129)), &[0xd1, 0xff, 0x7f]);
        assert_eq!(enc.encode(&Value::Int(-40000))[0], 0xd2);
        assert_eq!(enc.encode(&Value::Int(i64::MIN))[0], 0xd3);
        assert_eq!(enc.encode(&Value::UInt(u64::MAX))[0], 0xcf);
    }

    #[test]
    fn encoder_string() {
        let mut enc = MsgPackEncoder::new();
        let out = enc.encode(&Value::Str("hello".into()));
        // fixstr: 0xa0 | 5 = 0xa5, then 5 bytes
        assert_eq!(out[0], 0xa5);
        assert_eq!(&out[1..], b"hello");
        // 32 chars no longer fit fixstr
        let out = enc.encode(&Value::Str("x".repeat(32)));
        assert_eq!(out[0], 0xd9);
        assert_eq!(out[1], 32);
        let out = enc.encode(&Value::Str("x".repeat(256)));
        assert_eq!(out[0], 0xda);
    }

    #[test]
    fn encoder_binary() {
        let mut enc = MsgPackEncoder::new();
        let data = vec![1u8, 2, 3];
        let out = enc.encode(&Value::Bin(data.clone()));
        // bin8: 0xc4, length, data
        assert_eq!(out[0], 0xc4);
        assert_eq!(out[1], 3);
        assert_eq!(&out[2..], &data);
    }

    #[test]
    fn encoder_array_and_map() {
        let mut enc = MsgPackEncoder::new();
        let arr = Value::Array(vec![Value::Null, Value::Int(1)]);
        let out = enc.encode(&arr);
        assert_eq!(out, &[0x92, 0xc0, 0x01]);
        let obj = Value::Map(vec![("a".into(), Value::Int(1))]);
        let out = enc.encode(&obj);
        assert_eq!(out, &[0x81, 0xa1, b'a', 0x01]);
    }

    #[test]
    fn encoder_array16_boundary() {
        let mut enc = MsgPackEncoder::new();
        let items: Vec<Value> = (0..15).map(Value::Int).collect();
        assert_eq!(enc.encode(&Value::Array(items))[0], 0x9f);
        let items: Vec<Value> = (0..16).map(Value::Int).collect();
        let bytes = enc.encode(&Value::Array(items));
        assert_eq!(bytes[0], 0xdc);
        assert_eq!(u16::from_be_bytes([bytes[1], bytes[2]]), 16);
    }

    #[test]
    fn encoder_ext_families() {
        let mut enc = MsgPackEncoder::new();
        let out = enc.encode(&Value::Ext(Extension::new(-1, vec![0; 4])));
        // fixext4, tag, 4 payload bytes
        assert_eq!(out[0], 0xd6);
        assert_eq!(out[1], 0xff);
        assert_eq!(out.len(), 6);
        let out = enc.encode(&Value::Ext(Extension::new(5, vec![0; 3])));
        assert_eq!(out[0], 0xc7);
        assert_eq!(out[1], 3);
        assert_eq!(out[2], 5);
    }

    #[test]
    fn encoder_stable_sorts_keys() {
        let mut enc = MsgPackEncoderStable::new();
        let obj = Value::Map(vec![
            ("z".into(), Value::Int(1)),
            ("a".into(), Value::Int(2)),
        ]);
        let out = enc.encode(&obj);
        // fixmap(2); first key should be "a"
        assert_eq!(out[0], 0x82);
        assert_eq!(out[1], 0xa1);
        assert_eq!(out[2], b'a');
    }

    #[test]
    fn encoder_stable_is_deterministic_for_nested_maps() {
        let mut stable = MsgPackEncoderStable::new();
        let a = Value::Array(vec![Value::Map(vec![
            ("b".into(), Value::Int(1)),
            ("a".into(), Value::Int(2)),
        ])]);
        let b = Value::Array(vec![Value::Map(vec![
            ("a".into(), Value::Int(2)),
            ("b".into(), Value::Int(1)),
        ])]);
        assert_eq!(stable.encode(&a), stable.encode(&b));
    }

    // --- Decoder ---

    #[test]
    fn decoder_primitives() {
        let dec = MsgPackDecoder::new();
        assert_eq!(dec.decode(&[0xc0]).unwrap(), Value::Null);
        assert_eq!(dec.decode(&[0xc3]).unwrap(), Value::Bool(true));
        assert_eq!(dec.decode(&[0xc2]).unwrap(), Value::Bool(false));
        assert_eq!(dec.decode(&[0x7f]).unwrap(), Value::Int(127));
        assert_eq!(dec.decode(&[0xff]).unwrap(), Value::Int(-1));
    }

    #[test]
    fn decoder_uint64_above_i64_range_surfaces_as_uint() {
        let dec = MsgPackDecoder::new();
        let mut bytes = vec![0xcf];
        bytes.extend_from_slice(&u64::MAX.to_be_bytes());
        assert_eq!(dec.decode(&bytes).unwrap(), Value::UInt(u64::MAX));
        // In-range uint64 normalizes to Int.
        let mut bytes = vec![0xcf];
        bytes.extend_from_slice(&42u64.to_be_bytes());
        assert_eq!(dec.decode(&bytes).unwrap(), Value::Int(42));
    }

    #[test]
    fn decoder_float32_widens() {
        let dec = MsgPackDecoder::new();
        let mut bytes = vec![0xca];
        bytes.extend_from_slice(&1.5f32.to_be_bytes());
        assert_eq!(dec.decode(&bytes).unwrap(), Value::Float(1.5));
    }

    #[test]
    fn roundtrip_mixed_value() {
        let mut enc = MsgPackEncoder::new();
        let dec = MsgPackDecoder::new();
        let value = Value::Map(vec![
            ("nil".into(), Value::Null),
            ("flag".into(), Value::Bool(true)),
            ("count".into(), Value::Int(-70000)),
            ("big".into(), Value::UInt(u64::MAX)),
            ("pi".into(), Value::Float(3.5)),
            ("name".into(), Value::Str("bytepack".into())),
            ("blob".into(), Value::Bin(vec![0xde, 0xad, 0xbe, 0xef])),
            (
                "items".into(),
                Value::Array(vec![Value::Int(1), Value::Str("two".into())]),
            ),
            (Value::Int(7), Value::Str("int key".into())),
            (
                "stamp".into(),
                Value::Ext(Extension::new(-1, vec![0, 0, 0, 1])),
            ),
        ]);
        let bytes = enc.encode(&value);
        assert_eq!(dec.decode_exact(&bytes).unwrap(), value);
    }

    // --- Decoder error paths ---

    #[test]
    fn empty_input_returns_error() {
        let dec = MsgPackDecoder::new();
        assert_eq!(dec.decode(&[]), Err(DecodeError::UnexpectedEof));
    }

    #[test]
    fn truncated_str8_returns_error() {
        let dec = MsgPackDecoder::new();
        // str8, length byte = 5, then only 2 bytes of payload
        assert_eq!(
            dec.decode(&[0xd9, 0x05, b'h', b'i']),
            Err(DecodeError::UnexpectedEof)
        );
    }

    #[test]
    fn truncated_bin8_returns_error() {
        let dec = MsgPackDecoder::new();
        // bin8, length=3, only 1 byte given
        assert_eq!(
            dec.decode(&[0xc4, 0x03, 0xde]),
            Err(DecodeError::UnexpectedEof)
        );
    }

    #[test]
    fn truncated_array_returns_error() {
        let dec = MsgPackDecoder::new();
        // fixarray with 3 elements, but no element data follows
        assert_eq!(dec.decode(&[0x93]), Err(DecodeError::UnexpectedEof));
    }

    #[test]
    fn reserved_byte_returns_error() {
        let dec = MsgPackDecoder::new();
        assert_eq!(dec.decode(&[0xc1]), Err(DecodeError::InvalidByte(0xc1, 0)));
        // Also at a nested offset.
        assert_eq!(
            dec.decode(&[0x91, 0xc1]),
            Err(DecodeError::InvalidByte(0xc1, 1))
        );
    }

    #[test]
    fn invalid_utf8_in_str_returns_error() {
        let dec = MsgPackDecoder::new();
        // fixstr(2) with invalid UTF-8 payload
        assert_eq!(
            dec.decode(&[0xa2, 0xff, 0xfe]),
            Err(DecodeError::InvalidUtf8)
        );
    }

    #[test]
    fn forged_bin32_length_does_not_allocate() {
        let dec = MsgPackDecoder::new();
        // bin32 claiming u32::MAX bytes with a 2-byte payload
        let bytes = [0xc6, 0xff, 0xff, 0xff, 0xff, 0x01, 0x02];
        assert_eq!(dec.decode(&bytes), Err(DecodeError::UnexpectedEof));
    }

    #[test]
    fn nested_array_bomb_hits_depth_limit() {
        let dec = MsgPackDecoder::new();
        // 10_000 nested single-element arrays
        let bytes = vec![0x91u8; 10_000];
        assert_eq!(dec.decode(&bytes), Err(DecodeError::DepthLimit));
        // A shallow decoder trips earlier configs too.
        let shallow = MsgPackDecoder::with_max_depth(4);
        let bytes = [0x91, 0x91, 0x91, 0x91, 0xc0];
        assert_eq!(shallow.decode(&bytes), Err(DecodeError::DepthLimit));
    }

    #[test]
    fn decode_exact_rejects_trailing_bytes() {
        let dec = MsgPackDecoder::new();
        // One null followed by two garbage bytes.
        let bytes = [0xc0, 0xaa, 0xbb];
        assert_eq!(dec.decode(&bytes).unwrap(), Value::Null);
        assert_eq!(dec.decode_exact(&bytes), Err(DecodeError::TrailingBytes(2)));
        let (value, consumed) = dec.decode_with_consumed(&bytes).unwrap();
        assert_eq!(value, Value::Null);
        assert_eq!(consumed, 1);
    }

    // --- Entry points ---

    #[test]
    fn deserialize_ignores_trailing_deserialize_safe_does_not() {
        let bytes = b"asdfasfdasdfsafd";
        // 'a' is a positive fixint, so the lax variant sees a value...
        assert_eq!(deserialize(bytes).unwrap(), Value::Int(b'a' as i64));
        // ...but the input as a whole is not one well-formed value.
        let err = deserialize_safe(bytes).unwrap_err();
        assert_eq!(err, DecodeError::TrailingBytes(15));
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn serialize_safe_overflow() {
        let value = Value::Str("9".repeat(1000));
        let err = serialize_safe_with_limit(&value, 64).unwrap_err();
        let EncodeError::BufferOverflow { size, limit } = err;
        assert_eq!(size, 1003);
        assert_eq!(limit, 64);
        // Under the limit the same value encodes fine.
        assert!(serialize_safe_with_limit(&value, 1003).is_ok());
    }

    #[test]
    fn serialize_and_safe_variant_agree_on_bytes() {
        let value = Value::Array(vec![Value::Int(1), Value::Str("x".into())]);
        assert_eq!(serialize(&value), serialize_safe(&value).unwrap());
    }

    // --- encoded_size ---

    #[test]
    fn encoded_size_matches_encoder_output() {
        let mut enc = MsgPackEncoder::new();
        let values = vec![
            Value::Null,
            Value::Bool(false),
            Value::Int(127),
            Value::Int(128),
            Value::Int(-33),
            Value::Int(i64::MIN),
            Value::UInt(u64::MAX),
            Value::Float(2.5),
            Value::Str("x".repeat(31)),
            Value::Str("x".repeat(32)),
            Value::Str("x".repeat(70_000)),
            Value::Bin(vec![0; 300]),
            Value::Array((0..20).map(Value::Int).collect()),
            Value::Map(vec![
                ("k".into(), Value::Int(1)),
                (Value::Int(-5), Value::Null),
            ]),
            Value::Ext(Extension::new(-1, vec![0; 8])),
            Value::Ext(Extension::new(3, vec![0; 5])),
        ];
        for value in values {
            assert_eq!(
                encoded_size(&value),
                enc.encode(&value).len(),
                "size mismatch for {value:?}"
            );
        }
    }

    // --- JSON conversion ---

    #[test]
    fn msgpack_to_json_converter() {
        let mut enc = MsgPackEncoder::new();
        let conv = MsgPackToJsonConverter::new();
        let obj = Value::Map(vec![
            ("n".into(), Value::Null),
            ("b".into(), Value::Bool(true)),
            ("i".into(), Value::Int(42)),
            ("s".into(), Value::Str("hi".into())),
            (Value::Int(9), Value::Str("int key".into())),
        ]);
        let bytes = enc.encode(&obj);
        let json_str = conv.convert(&bytes).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("valid JSON");
        assert_eq!(parsed["n"], serde_json::Value::Null);
        assert_eq!(parsed["b"], serde_json::Value::Bool(true));
        assert_eq!(parsed["i"], serde_json::json!(42));
        assert_eq!(parsed["s"], serde_json::json!("hi"));
        assert_eq!(parsed["9"], serde_json::json!("int key"));
    }

    #[test]
    fn converter_propagates_decode_errors() {
        let conv = MsgPackToJsonConverter::new();
        assert_eq!(conv.convert(&[0xc1]), Err(DecodeError::InvalidByte(0xc1, 0)));
    }

    #[test]
    fn json_value_conversion_roundtrip() {
        let json = serde_json::json!({
            "a": [1, -2, true, null, "x"],
            "nested": {"k": 3.5}
        });
        let value = Value::from(json.clone());
        assert_eq!(value_to_json(value), json);
    }

    #[test]
    fn value_accessors() {
        let value = Value::Map(vec![("k".into(), Value::Int(3))]);
        assert_eq!(value.get("k").and_then(Value::as_int), Some(3));
        assert_eq!(value.get("missing"), None);
        assert_eq!(Value::Str("s".into()).as_str(), Some("s"));
    }
}
