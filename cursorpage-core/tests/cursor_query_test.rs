//! Integration tests for cursor filters and field resolution
//!
//! Covers the public contract used by the pagination layer:
//! - arity rules of the cursor builder
//! - the native shape of single and tie-broken filters
//! - tag resolution against a document type's field table

use cursorpage_core::{
    build_cursor_query, decode_cursor, encode_cursor, filter_to_json, resolve_field_name_by_tag,
    CompareOp, CursorError, FieldDescriptor, Filter, FilterParser, TypeDescriptor, Value,
};
use proptest::prelude::*;
use serde_json::json;

fn item_type() -> TypeDescriptor {
    TypeDescriptor::new("item")
        .field(FieldDescriptor::new("ID").tag("json", "id").bson("_id"))
        .field(FieldDescriptor::new("Name").tag("json", "name").bson("name"))
        .field(
            FieldDescriptor::new("UserID")
                .tag("json", "userId")
                .bson("userId,omitempty"),
        )
        .field(
            FieldDescriptor::new("CreatedAt")
                .tag("json", "createdAt")
                .bson("createdAt"),
        )
}

#[test]
fn test_wrong_arity_with_secondary_sort() {
    let result = build_cursor_query(true, "name", CompareOp::Gt, &["abc".into()]);
    let err = result.unwrap_err();
    assert!(err
        .to_string()
        .contains("wrong number of cursor field values specified"));
}

#[test]
fn test_wrong_arity_without_secondary_sort() {
    let result = build_cursor_query(false, "_id", CompareOp::Lt, &[]);
    assert!(matches!(result, Err(CursorError::InvalidArity { .. })));
}

#[test]
fn test_query_with_secondary_sort() {
    let op: CompareOp = "$gt".parse().unwrap();
    let filter =
        build_cursor_query(true, "name", op, &["test item".into(), "123".into()]).unwrap();

    assert_eq!(
        filter_to_json(&filter),
        json!({"$or": [
            {"name": {"$gt": "test item"}},
            {"$and": [
                {"name": {"$eq": "test item"}},
                {"_id": {"$gt": "123"}}
            ]}
        ]})
    );
}

#[test]
fn test_query_without_secondary_sort() {
    let op: CompareOp = "$lt".parse().unwrap();
    let filter = build_cursor_query(false, "_id", op, &["123".into()]).unwrap();
    assert_eq!(filter_to_json(&filter), json!({"_id": {"$lt": "123"}}));
}

#[test]
fn test_built_filter_parses_back() {
    let filter = build_cursor_query(
        true,
        "createdAt",
        CompareOp::Lte,
        &[Value::Int64(1_700_000_000_000), Value::from("abc")],
    )
    .unwrap();

    let wire = serde_json::to_string(&filter).unwrap();
    assert_eq!(FilterParser::parse(&wire).unwrap(), filter);
}

#[test]
fn test_resolve_field_names() {
    let ty = item_type();
    assert_eq!(resolve_field_name_by_tag(Some(&ty), "name"), "Name");
    assert_eq!(resolve_field_name_by_tag(Some(&ty), "userId"), "UserID");
    assert_eq!(resolve_field_name_by_tag(Some(&ty), "_id"), "ID");
    assert_eq!(resolve_field_name_by_tag(Some(&ty), "notastructfield"), "");
    assert_eq!(resolve_field_name_by_tag(Some(&ty), ""), "");
    assert_eq!(resolve_field_name_by_tag(None, "name"), "");
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i32>().prop_map(Value::Int32),
        any::<i64>().prop_map(Value::Int64),
        "[a-z ]{0,12}".prop_map(Value::String),
        any::<bool>().prop_map(Value::Bool),
    ]
}

fn op_strategy() -> impl Strategy<Value = CompareOp> {
    prop_oneof![
        Just(CompareOp::Gt),
        Just(CompareOp::Gte),
        Just(CompareOp::Lt),
        Just(CompareOp::Lte),
    ]
}

proptest! {
    /// Only one value resumes a single-field sort and only two resume a
    /// tie-broken sort; every other count is rejected.
    #[test]
    fn prop_arity_is_enforced(
        secondary in any::<bool>(),
        op in op_strategy(),
        values in prop::collection::vec(value_strategy(), 0..5)
    ) {
        let expected = if secondary { 2 } else { 1 };
        let result = build_cursor_query(secondary, "field", op, &values);
        if values.len() == expected {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(
                result,
                Err(CursorError::InvalidArity { expected, actual: values.len() })
            );
        }
    }

    /// Identical inputs always give identical filters
    #[test]
    fn prop_builder_is_deterministic(
        op in op_strategy(),
        primary in value_strategy(),
        id in value_strategy()
    ) {
        let values = vec![primary, id];
        let first = build_cursor_query(true, "name", op, &values).unwrap();
        let second = build_cursor_query(true, "name", op, &values).unwrap();
        prop_assert_eq!(filter_to_json(&first), filter_to_json(&second));
        prop_assert!(matches!(&first, Filter::Or(branches) if branches.len() == 2));
    }

    /// A token gives back exactly the values it was made from, integer
    /// width included
    #[test]
    fn prop_token_restores_values(
        values in prop::collection::vec(value_strategy(), 0..4)
    ) {
        let token = encode_cursor(&values);
        prop_assert_eq!(decode_cursor(&token).unwrap(), values);
    }

    /// Options after the first comma never take part in matching
    #[test]
    fn prop_tag_options_are_ignored(
        tag in "[a-zA-Z_][a-zA-Z0-9_]{0,10}",
        options in "(,[a-z]{1,8}){0,3}"
    ) {
        let ty = TypeDescriptor::new("t")
            .field(FieldDescriptor::new("Field").bson(format!("{}{}", tag, options)));
        prop_assert_eq!(resolve_field_name_by_tag(Some(&ty), &tag), "Field");
        prop_assert_eq!(resolve_field_name_by_tag(Some(&ty), &tag), resolve_field_name_by_tag(Some(&ty), &tag));
    }
}
