//! Value: what a stack cell holds.
//!
//! Stack cells are semantically untyped — the same cell can be read as
//! a number or a string depending on the instruction. Strings are raw
//! bytes, not UTF-8 text, since a cell must be able to hold any single
//! byte (0x00-0xFF) round-trippably; coercions recompute at each read
//! rather than maintaining a dual cache.

use crate::error::{EngineError, EngineResult};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Str(Vec<u8>),
}

impl Value {
    /// Parse as a signed 64-bit decimal. Fatal `BadNumber` on failure.
    pub fn as_int(&self) -> EngineResult<i64> {
        match self {
            Value::Int(n) => Ok(*n),
            Value::Str(bytes) => std::str::from_utf8(bytes)
                .ok()
                .and_then(|s| s.parse::<i64>().ok())
                .ok_or_else(|| EngineError::BadNumber(String::from_utf8_lossy(bytes).into_owned())),
        }
    }

    /// Raw bytes: a string's own bytes as-is, or an integer's canonical
    /// base-10 encoding.
    pub fn as_bytes(&self) -> Vec<u8> {
        match self {
            Value::Str(bytes) => bytes.clone(),
            Value::Int(n) => n.to_string().into_bytes(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(bytes) => write!(f, "{}", String::from_utf8_lossy(bytes)),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s.into_bytes())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_round_trips_through_str() {
        for n in [0_i64, 1, -1, 9223372036854775807, -9223372036854775808] {
            let v = Value::Int(n);
            let bytes = v.as_bytes();
            let back = Value::Str(bytes).as_int().unwrap();
            assert_eq!(back, n);
        }
    }

    #[test]
    fn zero_has_no_leading_zeros() {
        assert_eq!(Value::Int(0).as_bytes(), vec![b'0']);
        assert_eq!(Value::Int(-0).as_bytes(), vec![b'0']);
    }

    #[test]
    fn bad_number_is_fatal() {
        let v = Value::Str(b"not a number".to_vec());
        assert_eq!(
            v.as_int().unwrap_err(),
            EngineError::BadNumber("not a number".to_string())
        );
    }

    #[test]
    fn str_of_str_is_identity() {
        let v = Value::Str(b"abc".to_vec());
        assert_eq!(v.as_bytes(), b"abc".to_vec());
    }

    #[test]
    fn a_high_byte_round_trips_without_utf8_inflation() {
        let v = Value::Str(vec![0xC8]);
        assert_eq!(v.as_bytes(), vec![0xC8]);
        assert_eq!(v.as_bytes().len(), 1);
    }
}
