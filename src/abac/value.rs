//! Attribute values and the comparison strategies they select

use serde::{Deserialize, Serialize};
use std::fmt;

/// A dynamically-typed attribute or condition literal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(i64),
    String(String),
}

impl AttributeValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttributeValue::String(s) => Some(s),
            AttributeValue::Number(_) => None,
        }
    }

    pub fn as_number(&self) -> Option<i64> {
        match self {
            AttributeValue::Number(n) => Some(*n),
            AttributeValue::String(_) => None,
        }
    }

    /// Name of the variant, used in mismatch errors
    pub fn type_name(&self) -> &'static str {
        match self {
            AttributeValue::String(_) => "string",
            AttributeValue::Number(_) => "number",
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Number(value)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(s) => write!(f, "{:?}", s),
            AttributeValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Comparison strategy declared by an attribute
///
/// Parsing never fails: names are matched case-insensitively and anything other
/// than `number` falls back to string comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ValueType {
    #[default]
    String,
    Number,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Number => "number",
        }
    }

    /// The strategy that naturally holds `value`
    pub fn of(value: &AttributeValue) -> Self {
        match value {
            AttributeValue::String(_) => ValueType::String,
            AttributeValue::Number(_) => ValueType::Number,
        }
    }
}

impl From<&str> for ValueType {
    fn from(name: &str) -> Self {
        if name.eq_ignore_ascii_case("number") {
            ValueType::Number
        } else {
            ValueType::String
        }
    }
}

impl From<String> for ValueType {
    fn from(name: String) -> Self {
        ValueType::from(name.as_str())
    }
}

impl From<ValueType> for String {
    fn from(value_type: ValueType) -> Self {
        value_type.as_str().to_string()
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
