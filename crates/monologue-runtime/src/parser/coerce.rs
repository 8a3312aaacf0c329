//! Conservative schema coercion: the parser's last line of defense before
//! a parsed call is accepted or rejected.

use serde_json::{Map, Value};

use monologue_tools::{ArgSchema, ArgType};

/// Coerce and validate `args` against `schema`/`required`, in place.
///
/// Returns `Err` (with a human-readable reason) if a declared field's
/// value cannot be coerced to an accepted type, or a required argument is
/// missing. Never invents a value for a missing argument.
pub(super) fn coerce_and_validate(
    args: &mut Map<String, Value>,
    schema: &ArgSchema,
    required: &[String],
) -> Result<(), String> {
    for (field, expected) in schema {
        if let Some(value) = args.get(field) {
            match coerce_value(value, expected) {
                Some(coerced) => {
                    args.insert(field.clone(), coerced);
                }
                None => {
                    return Err(format!(
                        "argument '{field}' has type {value:?}, expected {expected:?}"
                    ));
                }
            }
        }
    }
    for field in required {
        if !args.contains_key(field) {
            return Err(format!("missing required argument '{field}'"));
        }
    }
    Ok(())
}

fn coerce_value(value: &Value, expected: &ArgType) -> Option<Value> {
    match expected {
        ArgType::Union(variants) => variants
            .iter()
            .find_map(|variant| coerce_value(value, variant)),
        ArgType::String => match value {
            Value::String(_) => Some(value.clone()),
            Value::Number(n) => Some(Value::String(n.to_string())),
            Value::Bool(b) => Some(Value::String(b.to_string())),
            _ => None,
        },
        ArgType::Integer => match value {
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(value.clone()),
            Value::String(s) => s.trim().parse::<i64>().ok().map(Into::into),
            _ => None,
        },
        ArgType::Float => match value {
            Value::Number(n) => n
                .as_f64()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
            Value::String(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
            _ => None,
        },
        ArgType::Bool => match value {
            Value::Bool(_) => Some(value.clone()),
            _ => None,
        },
        ArgType::Object => match value {
            Value::Object(_) => Some(value.clone()),
            _ => None,
        },
        ArgType::Array => match value {
            Value::Array(_) => Some(value.clone()),
            _ => None,
        },
    }
}
