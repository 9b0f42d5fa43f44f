//! Coercion of raw command text into typed attribute values.

use serde_json::Value;
use std::fmt;

/// A scalar attribute value supplied from the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl AttrValue {
    /// Coerces raw text into the narrowest matching scalar.
    ///
    /// - all ASCII digits → [`AttrValue::Integer`]
    /// - digits with exactly one `.` (either side may be empty) → [`AttrValue::Float`]
    /// - anything else → [`AttrValue::Text`]
    ///
    /// Signs and exponents are not recognized: `-3` and `1e5` stay text.
    /// Digit strings too large for an `i64` also stay text.
    pub fn coerce(raw: &str) -> Self {
        if is_digits(raw) {
            if let Ok(n) = raw.parse::<i64>() {
                return Self::Integer(n);
            }
        } else if let Some((int, frac)) = raw.split_once('.') {
            if is_digits(&format!("{int}{frac}")) {
                if let Ok(x) = raw.parse::<f64>() {
                    return Self::Float(x);
                }
            }
        }
        Self::Text(raw.to_owned())
    }

    /// Converts into the JSON value stored on an entity.
    pub fn into_json(self) -> Value {
        match self {
            Self::Integer(n) => Value::from(n),
            Self::Float(x) => Value::from(x),
            Self::Text(s) => Value::String(s),
        }
    }
}

impl From<AttrValue> for Value {
    fn from(v: AttrValue) -> Self {
        v.into_json()
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
