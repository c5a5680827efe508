//! Filter parser for converting native JSON to a filter tree
//!
//! Accepts the shape produced by the wire codec, plus the `{field: value}`
//! equality shorthand and implicit AND over multiple keys

use super::ast::{CompareOp, Filter};
use super::wire::json_to_value;
use crate::document::Value;
use serde_json::Value as JsonValue;

/// Parser for native JSON filters
pub struct FilterParser;

impl FilterParser {
    /// Parse a filter from a JSON string
    pub fn parse(json: &str) -> Result<Filter, FilterParseError> {
        let value: JsonValue = serde_json::from_str(json)
            .map_err(|e| FilterParseError::InvalidJson(e.to_string()))?;

        Self::parse_filter(&value)
    }

    /// Parse a filter from a JSON value
    pub fn parse_filter(value: &JsonValue) -> Result<Filter, FilterParseError> {
        let obj = match value {
            JsonValue::Object(obj) => obj,
            _ => {
                return Err(FilterParseError::InvalidFormat(
                    "Filter must be an object".to_string(),
                ))
            }
        };

        let mut filters = Vec::new();

        for (key, val) in obj {
            match key.as_str() {
                "$and" => filters.push(Filter::And(Self::parse_list(key, val)?)),
                "$or" => filters.push(Filter::Or(Self::parse_list(key, val)?)),
                k if k.starts_with('$') => {
                    return Err(FilterParseError::UnsupportedOperator(key.clone()));
                }
                _ => filters.push(Self::parse_field_condition(key, val)?),
            }
        }

        Ok(Self::combine(filters))
    }

    fn parse_list(key: &str, value: &JsonValue) -> Result<Vec<Filter>, FilterParseError> {
        let arr = value
            .as_array()
            .ok_or_else(|| FilterParseError::InvalidFormat(format!("{} must be an array", key)))?;
        arr.iter().map(Self::parse_filter).collect()
    }

    /// Parse a field condition
    fn parse_field_condition(field: &str, value: &JsonValue) -> Result<Filter, FilterParseError> {
        let operators = match value {
            JsonValue::Object(obj) if obj.keys().any(|k| is_operator_key(k)) => obj,
            // Direct value comparison (equality)
            _ => return Ok(Filter::eq(field, Self::value(value)?)),
        };

        let mut filters = Vec::new();
        for (op, val) in operators {
            let op: CompareOp = op
                .parse()
                .map_err(|_| FilterParseError::UnsupportedOperator(op.clone()))?;
            filters.push(Filter::compare(field, op, Self::value(val)?));
        }

        Ok(Self::combine(filters))
    }

    fn value(json: &JsonValue) -> Result<Value, FilterParseError> {
        json_to_value(json).map_err(|e| FilterParseError::InvalidFormat(e.to_string()))
    }

    fn combine(mut filters: Vec<Filter>) -> Filter {
        match filters.len() {
            0 => Filter::Empty,
            1 => filters.remove(0),
            _ => Filter::And(filters),
        }
    }
}

/// Extended JSON wrappers are values, not operators
fn is_operator_key(key: &str) -> bool {
    key.starts_with('$') && !matches!(key, "$oid" | "$date" | "$binary" | "$numberLong")
}

/// Filter parsing errors
#[derive(Debug, thiserror::Error)]
pub enum FilterParseError {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Unsupported operator: {0}")]
    UnsupportedOperator(String),
}
