//! Unit tests for scalar values and nested nodes.

use rstest::rstest;

use super::{Node, Value};

#[rstest]
#[case(Value::Null, "null")]
#[case(Value::Bool(true), "true")]
#[case(Value::Integer(-4), "-4")]
#[case(Value::Float(1.5), "1.5")]
#[case(Value::from("text"), "text")]
#[case(Value::Bytes(b"raw".to_vec()), "raw")]
#[case(Value::List(vec![Value::from(1), Value::from("x")]), "[1, x]")]
fn display_forms(#[case] value: Value, #[case] expected: &str) {
    assert_eq!(value.to_string(), expected);
}

#[rstest]
fn bytes_pass_through_unchanged() {
    let raw = vec![0_u8, 159, 146, 150];
    assert_eq!(Value::Bytes(raw.clone()).to_bytes(), raw);
}

#[rstest]
fn option_maps_none_to_null() {
    assert_eq!(Value::from(None::<i64>), Value::Null);
    assert_eq!(Value::from(Some("a")), Value::from("a"));
}

#[rstest]
fn table_builder_collects_entries() {
    let node = Node::table([("a", Node::from(1)), ("b", Node::from("two"))]);
    let table = node.as_table().cloned().unwrap_or_default();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get("b").and_then(Node::as_value), Some(&Value::from("two")));
}

#[rstest]
fn values_serialise_natively() -> anyhow::Result<()> {
    let node = Node::table([
        ("flag", Node::from(true)),
        ("list", Node::from(vec![Value::from(1), Value::Null])),
    ]);
    let json = serde_json::to_value(&node)?;
    assert_eq!(json, serde_json::json!({"flag": true, "list": [1, null]}));
    Ok(())
}
