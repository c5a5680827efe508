//! Document value types for CursorPage
//!
//! This module provides the values that flow through cursor filters:
//! - Value: an enum supporting all JSON types plus ObjectId, DateTime, Binary
//! - ObjectId: the 12-byte identity value used by document databases

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// ObjectId type for MongoDB compatibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId([u8; 12]);

impl ObjectId {
    /// Create a new ObjectId
    pub fn new() -> Self {
        let mut bytes = [0u8; 12];
        // Timestamp (4 bytes)
        let timestamp = Utc::now().timestamp() as u32;
        bytes[0..4].copy_from_slice(&timestamp.to_be_bytes());

        // Random value (5 bytes)
        let random: [u8; 5] = rand::random();
        bytes[4..9].copy_from_slice(&random);

        // Counter (3 bytes)
        let counter = rand::random::<u32>() & 0x00FF_FFFF;
        bytes[9..12].copy_from_slice(&counter.to_be_bytes()[1..4]);

        Self(bytes)
    }

    /// Create from bytes
    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    /// Parse a 24 character hex string
    pub fn parse_str(s: &str) -> Result<Self, DocumentError> {
        let decoded = hex::decode(s).map_err(|_| DocumentError::InvalidObjectId(s.to_string()))?;
        let bytes: [u8; 12] = decoded
            .try_into()
            .map_err(|_| DocumentError::InvalidObjectId(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for ObjectId {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// Value type supporting all JSON types plus ObjectId, DateTime, Binary
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 32-bit integer
    Int32(i32),
    /// 64-bit integer
    Int64(i64),
    /// 64-bit floating point
    Float64(f64),
    /// String value
    String(String),
    /// Binary data
    Binary(Vec<u8>),
    /// Array of values
    Array(Vec<Value>),
    /// Object with string keys and value values
    Object(BTreeMap<String, Value>),
    /// ObjectId for MongoDB compatibility
    ObjectId(ObjectId),
    /// DateTime with UTC timezone
    DateTime(DateTime<Utc>),
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int32(i)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int64(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float64(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Binary(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(arr: Vec<Value>) -> Self {
        Value::Array(arr)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(obj: BTreeMap<String, Value>) -> Self {
        Value::Object(obj)
    }
}

impl From<ObjectId> for Value {
    fn from(oid: ObjectId) -> Self {
        Value::ObjectId(oid)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::DateTime(dt)
    }
}

/// Document value errors
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("Invalid ObjectId: {0}")]
    InvalidObjectId(String),

    #[error("Invalid extended JSON value: {0}")]
    InvalidExtendedJson(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_id_creation() {
        let oid1 = ObjectId::new();
        let oid2 = ObjectId::new();
        assert_ne!(oid1, oid2);
    }

    #[test]
    fn test_object_id_hex() {
        let oid = ObjectId::from_bytes([0x5f, 0, 0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
        let text = oid.to_string();
        assert_eq!(text, "5f0000010203040506070809");
        assert_eq!(text.parse::<ObjectId>().unwrap(), oid);
    }

    #[test]
    fn test_object_id_rejects_bad_hex() {
        assert!(ObjectId::parse_str("xyz").is_err());
        assert!(ObjectId::parse_str("0102").is_err());
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(Value::from(42i32), Value::Int32(42));
        assert_eq!(Value::from(42i64), Value::Int64(42));
        assert_eq!(Value::from("test"), Value::String("test".to_string()));

        let oid = ObjectId::new();
        assert_eq!(Value::from(oid), Value::ObjectId(oid));
    }
}
