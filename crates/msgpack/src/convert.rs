//! MessagePack-to-JSON conversion for payload inspection.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde_json::Value as JsonValue;

use crate::decoder::MsgPackDecoder;
use crate::error::DecodeError;
use crate::value::Value;

/// Convert a decoded [`Value`] into a JSON view.
///
/// Lossy where JSON has no counterpart: binary payloads become base64 text,
/// extensions become `{"ext": tag, "data": <base64>}` objects, non-finite
/// floats become null, and non-string map keys are stringified.
pub fn value_to_json(value: Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(b),
        Value::Int(i) => JsonValue::from(i),
        Value::UInt(u) => JsonValue::from(u),
        Value::Float(f) => serde_json::Number::from_f64(f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::Str(s) => JsonValue::String(s),
        Value::Bin(b) => JsonValue::String(BASE64.encode(b)),
        Value::Array(arr) => JsonValue::Array(arr.into_iter().map(value_to_json).collect()),
        Value::Map(pairs) => {
            let mut obj = serde_json::Map::with_capacity(pairs.len());
            for (key, val) in pairs {
                obj.insert(json_key(key), value_to_json(val));
            }
            JsonValue::Object(obj)
        }
        Value::Ext(ext) => {
            let mut obj = serde_json::Map::with_capacity(2);
            obj.insert("ext".to_owned(), JsonValue::from(ext.tag));
            obj.insert("data".to_owned(), JsonValue::String(BASE64.encode(ext.data)));
            JsonValue::Object(obj)
        }
    }
}

fn json_key(key: Value) -> String {
    match key {
        Value::Str(s) => s,
        Value::Int(i) => i.to_string(),
        Value::UInt(u) => u.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_owned(),
        other => value_to_json(other).to_string(),
    }
}

/// Converts MessagePack payloads into JSON strings.
///
/// ```
/// use bytepack_msgpack::{serialize, MsgPackToJsonConverter, Value};
///
/// let bytes = serialize(&Value::Map(vec![("a".into(), Value::Int(1))]));
/// let conv = MsgPackToJsonConverter::new();
/// assert_eq!(conv.convert(&bytes).unwrap(), r#"{"a":1}"#);
/// ```
pub struct MsgPackToJsonConverter {
    decoder: MsgPackDecoder,
}

impl Default for MsgPackToJsonConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgPackToJsonConverter {
    pub fn new() -> Self {
        Self {
            decoder: MsgPackDecoder::new(),
        }
    }

    /// Decode `bytes` and render the value as a JSON string.
    pub fn convert(&self, bytes: &[u8]) -> Result<String, DecodeError> {
        let value = self.decoder.decode_exact(bytes)?;
        // value_to_json never produces non-finite numbers, so rendering
        // cannot fail.
        Ok(serde_json::to_string(&value_to_json(value)).unwrap_or_default())
    }
}
