//! Lax coercion of raw JSON values into declared field types
//!
//! | type    | accepted input                                          |
//! |---------|---------------------------------------------------------|
//! | text    | strings                                                 |
//! | integer | integers, integral floats, base-10 integer strings      |
//! | decimal | numbers, finite decimal strings                         |
//! | boolean | booleans, 0/1, yes/no style strings                     |

use serde_json::{Number, Value};

use super::types::{FieldType, FieldValue};

const TRUE_WORDS: [&str; 6] = ["true", "yes", "on", "t", "y", "1"];
const FALSE_WORDS: [&str; 6] = ["false", "no", "off", "f", "n", "0"];

/// Coerces a non-null value to `field_type`. Returns None when the value
/// cannot represent the type.
pub fn coerce(value: &Value, field_type: FieldType) -> Option<FieldValue> {
    match field_type {
        FieldType::Text => value.as_str().map(|s| FieldValue::Text(s.to_string())),
        FieldType::Integer => coerce_integer(value).map(FieldValue::Integer),
        FieldType::Decimal => coerce_decimal(value).map(FieldValue::Decimal),
        FieldType::Boolean => coerce_boolean(value).map(FieldValue::Boolean),
    }
}

fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => integral_number(n),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

/// Integers outside the i64 range cannot be stored and are a type
/// mismatch, not a range violation.
fn integral_number(n: &Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    if n.is_u64() {
        return None;
    }

    let f = n.as_f64()?;
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    if f.fract() == 0.0 && in_range {
        Some(f as i64)
    } else {
        None
    }
}

fn coerce_decimal(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;

    parsed.is_finite().then_some(parsed)
}

fn coerce_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(s) => {
            let word = s.trim().to_ascii_lowercase();
            if TRUE_WORDS.contains(&word.as_str()) {
                Some(true)
            } else if FALSE_WORDS.contains(&word.as_str()) {
                Some(false)
            } else {
                None
            }
        }
        _ => None,
    }
}
