//! Scalar casts applied by the [`Lookup`](super::Lookup) accessors.

use std::sync::Arc;

use crate::{ConfigError, ConfigResult, Value};

/// Text accepted as `true` after trimming and lowercasing.
pub const TRUE_LITERALS: [&str; 6] = ["t", "true", "y", "yes", "on", "1"];

/// Text accepted as `false` after trimming and lowercasing.
pub const FALSE_LITERALS: [&str; 7] = ["f", "false", "n", "no", "off", "0", ""];

/// Interpret `text` as a boolean literal.
///
/// # Examples
///
/// ```
/// use strata_config::parse_bool;
/// assert_eq!(parse_bool(" Yes "), Some(true));
/// assert_eq!(parse_bool("off"), Some(false));
/// assert_eq!(parse_bool("maybe"), None);
/// ```
#[must_use]
pub fn parse_bool(text: &str) -> Option<bool> {
    let normalised = text.trim().to_lowercase();
    if TRUE_LITERALS.contains(&normalised.as_str()) {
        Some(true)
    } else if FALSE_LITERALS.contains(&normalised.as_str()) {
        Some(false)
    } else {
        None
    }
}

fn invalid_cast(key: &str, expected: &'static str, value: &Value) -> Arc<ConfigError> {
    Arc::new(ConfigError::InvalidCast {
        key: key.to_owned(),
        expected,
        value: value.to_string(),
    })
}

pub(super) fn to_bool(key: &str, value: &Value) -> ConfigResult<bool> {
    match value {
        Value::Bool(flag) => Ok(*flag),
        Value::Null => Ok(false),
        Value::List(_) => Err(invalid_cast(key, "bool", value)),
        other => {
            let text = other.to_string();
            parse_bool(&text).ok_or_else(|| {
                Arc::new(ConfigError::InvalidBooleanLiteral {
                    key: key.to_owned(),
                    value: text,
                })
            })
        }
    }
}

pub(super) fn to_int(key: &str, value: &Value) -> ConfigResult<i64> {
    match value {
        Value::Integer(number) => Ok(*number),
        Value::Bool(flag) => Ok(i64::from(*flag)),
        // Only integral floats convert; their display form has no fraction.
        Value::Float(_) | Value::String(_) | Value::Bytes(_) => value
            .to_string()
            .trim()
            .parse()
            .map_err(|_| invalid_cast(key, "integer", value)),
        Value::Null | Value::List(_) => Err(invalid_cast(key, "integer", value)),
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "integers beyond 2^53 round like any other float conversion"
)]
fn int_to_float(number: i64) -> f64 {
    number as f64
}

pub(super) fn to_float(key: &str, value: &Value) -> ConfigResult<f64> {
    match value {
        Value::Float(number) => Ok(*number),
        Value::Integer(number) => Ok(int_to_float(*number)),
        Value::Bool(flag) => Ok(if *flag { 1.0 } else { 0.0 }),
        Value::String(_) | Value::Bytes(_) => value
            .to_string()
            .trim()
            .parse()
            .map_err(|_| invalid_cast(key, "float", value)),
        Value::Null | Value::List(_) => Err(invalid_cast(key, "float", value)),
    }
}

/// Substitute `rendered` for every `{}` placeholder in `fmt`.
///
/// `{{` and `}}` produce literal braces.
pub(super) fn format_with(fmt: &str, rendered: &str) -> String {
    let mut out = String::with_capacity(fmt.len() + rendered.len());
    let mut chars = fmt.chars().peekable();
    while let Some(c) = chars.next() {
        match (c, chars.peek()) {
            ('{', Some('{')) | ('}', Some('}')) => {
                chars.next();
                out.push(c);
            }
            ('{', Some('}')) => {
                chars.next();
                out.push_str(rendered);
            }
            _ => out.push(c),
        }
    }
    out
}
