//! Conversion from parsed JSON values.

use serde_json::Value as JsonValue;

use crate::{ConfigError, ConfigResult, ConfigResultExt, Nested, Node, Value};

use super::{element_path, table_in_array};

/// Convert a parsed JSON object into a nested mapping.
///
/// Arrays become [`Value::List`] leaves; integers that fit `i64` stay
/// integers and every other number becomes a float.
///
/// # Errors
///
/// Returns [`ConfigError::Construction`] when `value` is not an object or an
/// array contains an object.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use strata_config::sources::json::from_json;
/// use strata_config::{FlatStore, Lookup};
///
/// let nested = from_json(&json!({"db": {"port": 5432}}))?;
/// let store = FlatStore::from_nested(&nested, false);
/// assert_eq!(store.get_int("db.port")?, 5432);
/// # Ok::<_, std::sync::Arc<strata_config::ConfigError>>(())
/// ```
pub fn from_json(value: &JsonValue) -> ConfigResult<Nested> {
    let JsonValue::Object(map) = value else {
        return Err(ConfigError::construction("JSON configuration must be an object")).into_config();
    };
    map.iter()
        .map(|(key, child)| Ok((key.clone(), node(key, child)?)))
        .collect()
}

fn node(path: &str, value: &JsonValue) -> ConfigResult<Node> {
    match value {
        JsonValue::Object(map) => map
            .iter()
            .map(|(key, child)| {
                let child_path = crate::key_path::join(Some(path), key);
                Ok((key.clone(), node(&child_path, child)?))
            })
            .collect::<ConfigResult<Nested>>()
            .map(Node::Table),
        other => leaf(path, other).map(Node::Leaf),
    }
}

fn leaf(path: &str, value: &JsonValue) -> ConfigResult<Value> {
    Ok(match value {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(flag) => Value::Bool(*flag),
        JsonValue::Number(number) => number.as_i64().map_or_else(
            || Value::Float(number.as_f64().unwrap_or(f64::NAN)),
            Value::Integer,
        ),
        JsonValue::String(text) => Value::String(text.clone()),
        JsonValue::Array(items) => Value::List(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| leaf(&element_path(path, index), item))
                .collect::<ConfigResult<Vec<_>>>()?,
        ),
        JsonValue::Object(_) => return Err(table_in_array(path)),
    })
}
