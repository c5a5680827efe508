//! Native filter representation
//!
//! Converts filters, sorts and values to the nested-document JSON shape the
//! database driver consumes (`{"$or": [...]}`, `{field: {"$gt": v}}`).
//! Scalars the JSON data model lacks use extended JSON wrappers:
//! `{"$oid": hex}`, `{"$date": rfc3339}`, `{"$binary": base64}` and
//! `{"$numberLong": decimal}`. A bare JSON integer is a 32-bit value when it
//! fits, so 64-bit integers always carry the wrapper.

use super::ast::{Filter, Sort};
use crate::document::{DocumentError, ObjectId, Value};
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use serde_json::{Map, Number, Value as JsonValue};
use std::collections::BTreeMap;

/// Convert a value to extended JSON
pub fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Int32(i) => JsonValue::Number((*i).into()),
        Value::Int64(i) => wrapped("$numberLong", i.to_string()),
        // Non-finite floats have no JSON form
        Value::Float64(f) => Number::from_f64(*f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Value::String(s) => JsonValue::String(s.clone()),
        Value::Binary(b) => wrapped("$binary", general_purpose::STANDARD.encode(b)),
        Value::Array(arr) => JsonValue::Array(arr.iter().map(value_to_json).collect()),
        Value::Object(obj) => JsonValue::Object(
            obj.iter()
                .map(|(k, v)| (k.clone(), value_to_json(v)))
                .collect(),
        ),
        Value::ObjectId(oid) => wrapped("$oid", oid.to_string()),
        Value::DateTime(dt) => wrapped("$date", dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
    }
}

fn wrapped(key: &str, text: String) -> JsonValue {
    let mut map = Map::new();
    map.insert(key.to_string(), JsonValue::String(text));
    JsonValue::Object(map)
}

/// Convert extended JSON back to a value
pub fn json_to_value(json: &JsonValue) -> Result<Value, DocumentError> {
    match json {
        JsonValue::Null => Ok(Value::Null),
        JsonValue::Bool(b) => Ok(Value::Bool(*b)),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                if i >= i32::MIN as i64 && i <= i32::MAX as i64 {
                    Ok(Value::Int32(i as i32))
                } else {
                    Ok(Value::Int64(i))
                }
            } else if let Some(f) = n.as_f64() {
                Ok(Value::Float64(f))
            } else {
                Err(DocumentError::InvalidExtendedJson(format!(
                    "number out of range: {}",
                    n
                )))
            }
        }
        JsonValue::String(s) => Ok(Value::String(s.clone())),
        JsonValue::Array(arr) => {
            let values: Result<Vec<_>, _> = arr.iter().map(json_to_value).collect();
            Ok(Value::Array(values?))
        }
        JsonValue::Object(obj) => {
            if obj.len() == 1 {
                if let Some((key, JsonValue::String(text))) = obj.iter().next() {
                    match key.as_str() {
                        "$oid" => return Ok(Value::ObjectId(ObjectId::parse_str(text)?)),
                        "$date" => return parse_date(text).map(Value::DateTime),
                        "$binary" => {
                            return general_purpose::STANDARD
                                .decode(text)
                                .map(Value::Binary)
                                .map_err(|e| DocumentError::InvalidExtendedJson(e.to_string()))
                        }
                        "$numberLong" => {
                            return text.parse::<i64>().map(Value::Int64).map_err(|e| {
                                DocumentError::InvalidExtendedJson(format!(
                                    "$numberLong {}: {}",
                                    text, e
                                ))
                            })
                        }
                        _ => {}
                    }
                }
            }

            let mut map = BTreeMap::new();
            for (k, v) in obj {
                map.insert(k.clone(), json_to_value(v)?);
            }
            Ok(Value::Object(map))
        }
    }
}

fn parse_date(text: &str) -> Result<DateTime<Utc>, DocumentError> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DocumentError::InvalidExtendedJson(format!("$date {}: {}", text, e)))
}

/// Convert a filter to its native JSON form
pub fn filter_to_json(filter: &Filter) -> JsonValue {
    let mut map = Map::new();
    match filter {
        Filter::Empty => {}
        Filter::Compare { field, op, value } => {
            let mut condition = Map::new();
            condition.insert(op.as_str().to_string(), value_to_json(value));
            map.insert(field.clone(), JsonValue::Object(condition));
        }
        Filter::And(filters) => {
            map.insert(
                "$and".to_string(),
                JsonValue::Array(filters.iter().map(filter_to_json).collect()),
            );
        }
        Filter::Or(filters) => {
            map.insert(
                "$or".to_string(),
                JsonValue::Array(filters.iter().map(filter_to_json).collect()),
            );
        }
    }
    JsonValue::Object(map)
}

/// Convert a sort to its native JSON form (`{field: 1 | -1}`)
pub fn sort_to_json(sort: &Sort) -> JsonValue {
    let mut map = Map::new();
    for (field, order) in &sort.fields {
        map.insert(field.clone(), JsonValue::Number(order.as_i32().into()));
    }
    JsonValue::Object(map)
}

impl Serialize for Filter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        filter_to_json(self).serialize(serializer)
    }
}

/// Keys go out in sort priority order
impl Serialize for Sort {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (field, order) in &self.fields {
            map.serialize_entry(field, &order.as_i32())?;
        }
        map.end()
    }
}
