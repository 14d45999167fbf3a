//! Lenient deserializers for values the remote API sends in more than one shape.
//!
//! Decimal and bigint columns come back as JSON strings from some endpoints and
//! as numbers from others; optional text columns may be `null`.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Int(i64),
    Float(f64),
    Str(String),
}

/// `12.5`, `"12.50"` → `12.5`.
pub fn decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Int(n) => Ok(n as f64),
        NumberOrString::Float(n) => Ok(n),
        NumberOrString::Str(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid decimal: {s:?}"))),
    }
}

/// `7`, `"7"` → `7`.
pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Int(n) => Ok(n),
        NumberOrString::Float(n) if n.fract() == 0.0 => Ok(n as i64),
        NumberOrString::Float(n) => Err(serde::de::Error::custom(format!(
            "expected an integer, got {n}"
        ))),
        NumberOrString::Str(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| serde::de::Error::custom(format!("invalid integer: {s:?}"))),
    }
}

/// `null` → `""`.
pub fn string_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
