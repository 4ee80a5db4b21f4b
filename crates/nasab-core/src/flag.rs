//! 0/1 encoding for boolean flags
//!
//! The persistence layer stores flags such as `is_living` as integers.
//! Fields opt in with `#[serde(with = "crate::flag")]`; deserialization
//! also accepts plain JSON booleans.

use serde::{Deserialize, Deserializer, Serializer};

/// Encode a flag the way the database stores it
pub fn encode(value: bool) -> u8 {
    u8::from(value)
}

/// Decode a stored flag (any non-zero value is set)
pub fn decode(value: i64) -> bool {
    value != 0
}

pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(encode(*value))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredFlag {
    Bool(bool),
    Int(i64),
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match StoredFlag::deserialize(deserializer)? {
        StoredFlag::Bool(b) => b,
        StoredFlag::Int(i) => decode(i),
    })
}
