//! `MsgPackEncoderStable` — deterministic MessagePack encoder.

use crate::encoder::MsgPackEncoder;
use crate::value::Value;

/// Stable MessagePack encoder.
///
/// Same wire formats as [`MsgPackEncoder`], but map entries are written in
/// the order of their encoded key bytes, so semantically equal maps always
/// produce identical output regardless of insertion order. Keys are ordered
/// by their encoded form rather than a string compare because map keys are
/// not restricted to strings.
pub struct MsgPackEncoderStable {
    pub encoder: MsgPackEncoder,
}

impl Default for MsgPackEncoderStable {
    fn default() -> Self {
        Self::new()
    }
}

impl MsgPackEncoderStable {
    pub fn new() -> Self {
        Self {
            encoder: MsgPackEncoder::new(),
        }
    }

    /// Encode a value and return the MessagePack bytes.
    pub fn encode(&mut self, value: &Value) -> Vec<u8> {
        self.encoder.writer.reset();
        self.write_any(value);
        self.encoder.writer.flush()
    }

    pub fn write_any(&mut self, value: &Value) {
        match value {
            Value::Array(arr) => {
                self.encoder.write_arr_hdr(arr.len());
                for item in arr {
                    self.write_any(item);
                }
            }
            Value::Map(pairs) => {
                let mut keyed: Vec<(Vec<u8>, &Value, &Value)> = pairs
                    .iter()
                    .map(|(k, v)| {
                        let mut key_enc = MsgPackEncoder::new();
                        (key_enc.encode(k), k, v)
                    })
                    .collect();
                keyed.sort_by(|a, b| a.0.cmp(&b.0));
                self.encoder.write_map_hdr(keyed.len());
                for (_, key, val) in keyed {
                    self.encoder.write_any(key);
                    self.write_any(val);
                }
            }
            other => self.encoder.write_any(other),
        }
    }
}
