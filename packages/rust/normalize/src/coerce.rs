//! Best-effort value coercions.
//!
//! Every coercion returns a [`Coercion`] tag instead of failing: a value that
//! cannot be converted comes back untouched as [`Coercion::Unchanged`].

use serde_json::{Number, Value};

/// Separator used by the catalog for multi-valued string fields.
pub const LIST_DELIMITER: &str = ", ";

/// Outcome of applying a coercion rule to one value.
#[derive(Debug, Clone, PartialEq)]
pub enum Coercion {
    /// The value was converted to its typed form.
    Converted(Value),
    /// The rule did not apply; this is the original value.
    Unchanged(Value),
}

impl Coercion {
    pub fn is_converted(&self) -> bool {
        matches!(self, Coercion::Converted(_))
    }

    /// The resulting value, whichever way the coercion went.
    pub fn into_value(self) -> Value {
        match self {
            Coercion::Converted(value) | Coercion::Unchanged(value) => value,
        }
    }

    pub fn value(&self) -> &Value {
        match self {
            Coercion::Converted(value) | Coercion::Unchanged(value) => value,
        }
    }
}

/// Parse the leading whitespace-delimited token of a string as a float.
///
/// `"1 standard"` becomes `1.0`. Non-strings, empty strings, unparseable
/// tokens and non-finite results are returned unchanged.
pub fn to_float(value: &Value) -> Coercion {
    let Value::String(text) = value else {
        return Coercion::Unchanged(value.clone());
    };

    text.split_whitespace()
        .next()
        .and_then(|token| token.parse::<f64>().ok())
        .and_then(Number::from_f64)
        .map(|n| Coercion::Converted(Value::Number(n)))
        .unwrap_or_else(|| Coercion::Unchanged(value.clone()))
}

/// Parse a whole string (surrounding whitespace ignored) as an integer.
pub fn to_int(value: &Value) -> Coercion {
    let Value::String(text) = value else {
        return Coercion::Unchanged(value.clone());
    };

    match text.trim().parse::<i64>() {
        Ok(n) => Coercion::Converted(Value::from(n)),
        Err(_) => Coercion::Unchanged(value.clone()),
    }
}

/// Split a string on `delimiter` into a list of strings.
pub fn to_list(value: &Value, delimiter: &str) -> Coercion {
    let Value::String(text) = value else {
        return Coercion::Unchanged(value.clone());
    };

    let items = text
        .split(delimiter)
        .map(|item| Value::String(item.to_string()))
        .collect();
    Coercion::Converted(Value::Array(items))
}
