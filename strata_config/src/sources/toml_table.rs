//! Conversion from parsed TOML tables.

use toml::{Table, Value as TomlValue};

use crate::{ConfigResult, Nested, Node, Value};

use super::{element_path, table_in_array};

/// Convert a parsed TOML table into a nested mapping.
///
/// Arrays become [`Value::List`] leaves and datetimes become their RFC 3339
/// text.
///
/// # Errors
///
/// Returns [`crate::ConfigError::Construction`] when an array contains a
/// table.
///
/// # Examples
///
/// ```
/// use strata_config::sources::toml_table::from_toml;
/// use strata_config::{FlatStore, Lookup};
///
/// let table: toml::Table = toml::from_str("[db]\nport = 5432\n").map_err(|e| e.to_string())?;
/// let store = FlatStore::from_nested(&from_toml(&table)?, false);
/// assert_eq!(store.get_int("db.port")?, 5432);
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
pub fn from_toml(table: &Table) -> ConfigResult<Nested> {
    tables(None, table)
}

fn tables(parent: Option<&str>, table: &Table) -> ConfigResult<Nested> {
    table
        .iter()
        .map(|(key, value)| {
            let path = crate::key_path::join(parent, key);
            let child = match value {
                TomlValue::Table(inner) => Node::Table(tables(Some(&path), inner)?),
                other => Node::Leaf(leaf(&path, other)?),
            };
            Ok((key.clone(), child))
        })
        .collect()
}

fn leaf(path: &str, value: &TomlValue) -> ConfigResult<Value> {
    Ok(match value {
        TomlValue::String(text) => Value::String(text.clone()),
        TomlValue::Integer(number) => Value::Integer(*number),
        TomlValue::Float(number) => Value::Float(*number),
        TomlValue::Boolean(flag) => Value::Bool(*flag),
        TomlValue::Datetime(datetime) => Value::String(datetime.to_string()),
        TomlValue::Array(items) => Value::List(
            items
                .iter()
                .enumerate()
                .map(|(index, item)| leaf(&element_path(path, index), item))
                .collect::<ConfigResult<Vec<_>>>()?,
        ),
        TomlValue::Table(_) => return Err(table_in_array(path)),
    })
}
